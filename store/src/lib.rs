//! Transaction store for the quorum authorization engine.
//!
//! Owns the append-only log of proposed actions and the per-action support
//! sets. Actions are never deleted; their sequence numbers are never reused.
//! Authorization (who may support, whether a supporter is a current oracle)
//! is the engine's concern — the store records what the engine admits.

pub mod action;
pub mod error;
pub mod store;

pub use action::Action;
pub use error::StoreError;
pub use store::ActionStore;
