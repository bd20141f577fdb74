//! The effectful dispatch seam.
//!
//! The engine never performs the outbound call itself; the host supplies a
//! [`Dispatcher`] per `execute` call. Handing the dispatcher `&mut Engine`
//! makes re-entrancy expressible: a target may call back into the engine
//! mid-dispatch, and the executed-before-dispatch ordering must reject a
//! second execution of the same action.

use crate::engine::Engine;
use quorum_types::{AccountId, Amount};
use thiserror::Error;

/// A confirmed action handed to the dispatch edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundCall {
    pub target: AccountId,
    pub value: Amount,
    pub payload: Vec<u8>,
    /// Caller-specified bound on how much work the invoked action may
    /// perform. `None` means unbounded; exhaustion is a dispatch failure.
    pub budget: Option<u64>,
}

/// Why a dispatch attempt failed. Dispatch failure is recovered locally by
/// the engine (the action stays re-attemptable), never engine-fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("target rejected the call: {0}")]
    Rejected(String),

    #[error("resource budget exhausted")]
    BudgetExhausted,

    #[error("insufficient engine balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("malformed governance payload")]
    MalformedGovernancePayload,

    #[error("governance mutation rejected: {0}")]
    Governance(String),
}

/// The host's effectful edge: transfer value to the target carrying the
/// payload, optionally under a resource budget.
pub trait Dispatcher {
    fn dispatch(&mut self, call: &OutboundCall, engine: &mut Engine) -> Result<(), DispatchError>;
}

/// Dispatcher that accepts every call without side effects.
#[derive(Debug, Default)]
pub struct NullDispatcher;

impl Dispatcher for NullDispatcher {
    fn dispatch(&mut self, _call: &OutboundCall, _engine: &mut Engine) -> Result<(), DispatchError> {
        Ok(())
    }
}
