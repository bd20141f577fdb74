//! Confirmation engine for weighted multi-party authorization.
//!
//! A group of weighted oracles jointly authorizes outbound
//! value-transfer-and-call actions by accumulating support until the
//! configured weight threshold is met. Execution follows
//! checks-effects-interactions ordering so a reentrant call through the
//! dispatch edge can never trigger a second dispatch of the same action.
//!
//! Membership and threshold mutation (the governable variant) is itself an
//! action dispatched through the engine: a confirmed action targeting the
//! engine's own identity carries a bincode-encoded [`GovernanceAction`] as
//! its payload. There is no other mutation entry point.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod governance;

pub use config::{EngineConfig, OracleSpec};
pub use dispatch::{DispatchError, Dispatcher, NullDispatcher, OutboundCall};
pub use engine::{Engine, ExecutionStatus};
pub use error::EngineError;
pub use governance::GovernanceAction;
