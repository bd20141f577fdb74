use quorum_ledger::LedgerError;
use quorum_store::StoreError;
use quorum_types::ActionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("account {0} is not a current oracle")]
    NotOracle(String),

    #[error("caller {caller} does not support action {action}")]
    NotSupporter { action: ActionId, caller: String },

    #[error("engine identity cannot be the zero identifier")]
    ZeroIdentity,

    #[error("engine balance overflow")]
    BalanceOverflow,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
