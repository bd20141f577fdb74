use quorum_types::Weight;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} is already an oracle")]
    DuplicateOracle(String),

    #[error("account {0} is not an oracle")]
    UnknownOracle(String),

    #[error("the zero identifier cannot be an oracle")]
    ZeroAccount,

    #[error("oracle weight must be positive")]
    ZeroWeight,

    #[error("threshold must be positive")]
    ZeroThreshold,

    #[error("threshold {threshold} exceeds total weight {total}")]
    ThresholdTooHigh { threshold: Weight, total: Weight },

    #[error("cannot remove the last remaining oracle")]
    LastOracle,

    #[error("weight sum overflow")]
    WeightOverflow,

    #[error("roster cannot be empty")]
    EmptyRoster,
}
