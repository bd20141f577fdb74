//! Fundamental types for the quorum authorization engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identifiers, value amounts, action sequence numbers,
//! and the notification events the engine emits.

pub mod account;
pub mod action;
pub mod amount;
pub mod event;

pub use account::AccountId;
pub use action::ActionId;
pub use amount::Amount;
pub use event::Event;

/// An oracle's voting weight. All weight sums use checked arithmetic;
/// overflow is a precondition failure, never wraparound.
pub type Weight = u64;
