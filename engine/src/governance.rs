//! Governance action payloads.
//!
//! A membership or threshold mutation is expressed as an action whose target
//! is the engine's own identity and whose payload is the bincode encoding of
//! a [`GovernanceAction`]. The engine decodes and applies it only from its
//! own confirmed-execution path; there is no other route to these mutations.

use quorum_types::{AccountId, Weight};
use serde::{Deserialize, Serialize};

/// A membership or threshold mutation, applied atomically on confirmed
/// execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceAction {
    /// Add an oracle and commit a new threshold, re-validated against the
    /// grown roster before anything is applied.
    AddOracle {
        account: AccountId,
        weight: Weight,
        threshold: Weight,
    },
    /// Remove an oracle. The threshold auto-lowers to the new total weight
    /// when the removal would otherwise leave it unreachable.
    RemoveOracle { account: AccountId },
    /// Swap an oracle's identity in place, preserving weight and position.
    ReplaceOracle { old: AccountId, new: AccountId },
    /// Validate and commit a new threshold.
    ChangeThreshold { threshold: Weight },
}

impl GovernanceAction {
    /// Encode as an action payload.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode an action payload.
    pub fn decode(payload: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(payload)
    }
}
