use quorum_types::ActionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("action {0} not found")]
    UnknownAction(ActionId),

    #[error("action target cannot be the zero identifier")]
    ZeroTarget,

    #[error("account {account} already supports action {action}")]
    DuplicateSupport { action: ActionId, account: String },

    #[error("account {account} does not support action {action}")]
    SupportNotFound { action: ActionId, account: String },

    #[error("action {0} is already executed")]
    AlreadyExecuted(ActionId),

    #[error("invalid range: to {to} < from {from}")]
    InvalidRange { from: u64, to: u64 },
}
