//! Engine construction parameters.

use quorum_types::{AccountId, Weight};
use serde::{Deserialize, Serialize};

/// Everything needed to construct an [`crate::Engine`], serde-derived so a
/// deployment can be described in a config file.
///
/// `governable` is the constructor-time choice between the two engine
/// variants: when true, confirmed actions targeting `identity` are applied
/// as membership/threshold mutations; when false, the roster and threshold
/// are fixed for the engine's lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The engine instance's own account identity.
    pub identity: AccountId,
    /// Initial oracle roster with weights, in roster order.
    pub oracles: Vec<OracleSpec>,
    /// Confirmation threshold; must satisfy `0 < threshold <= sum(weights)`.
    pub threshold: Weight,
    /// Whether the engine's own confirmed actions may mutate its membership.
    pub governable: bool,
}

/// One initial roster entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OracleSpec {
    pub account: AccountId,
    pub weight: Weight,
}

impl EngineConfig {
    /// The roster as `(account, weight)` pairs, the shape the ledger takes.
    pub fn members(&self) -> Vec<(AccountId, Weight)> {
        self.oracles.iter().map(|o| (o.account, o.weight)).collect()
    }
}
