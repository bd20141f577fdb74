//! Weight ledger for the quorum authorization engine.
//!
//! Owns the oracle roster, the per-oracle weight table, and the confirmation
//! threshold. Every mutation validates before committing, so no observable
//! state ever violates the ledger invariants:
//! - the roster is non-empty and free of duplicates
//! - every weight is positive
//! - `0 < threshold <= total_weight()`

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::WeightLedger;
