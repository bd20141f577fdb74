//! Notification events emitted by the engine.
//!
//! One event per state transition, appended to the engine's event log in
//! transition order, each emitted exactly once.

use crate::{AccountId, ActionId, Amount, Weight};
use serde::{Deserialize, Serialize};

/// An externally observable notification of a state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new action entered the log.
    Proposed { action: ActionId, proposer: AccountId },
    /// An oracle endorsed an action.
    Supported { action: ActionId, oracle: AccountId },
    /// An oracle withdrew its endorsement before execution.
    SupportRevoked { action: ActionId, oracle: AccountId },
    /// The action's dispatch succeeded; the action is final.
    Executed { action: ActionId },
    /// The action's dispatch failed; the action is re-attemptable.
    ExecutionFailed { action: ActionId },
    /// Nonzero value was transferred to the engine with no payload.
    Deposit { from: AccountId, amount: Amount },
    /// Governance added an oracle to the roster.
    OracleAdded { account: AccountId, weight: Weight },
    /// Governance removed an oracle from the roster. A replacement emits
    /// this for the old identity followed by `OracleAdded` for the new one.
    OracleRemoved { account: AccountId },
    /// Governance changed the confirmation threshold (or removal auto-lowered it).
    ThresholdChanged { threshold: Weight },
}
