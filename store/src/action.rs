//! Proposed action records.

use quorum_types::{AccountId, Amount};
use serde::{Deserialize, Serialize};

/// A proposed value-transfer-and-call, immutable once created apart from
/// the `executed` flag.
///
/// `executed` transitions false→true when a dispatch is attempted and back
/// to false if that dispatch fails, leaving the action re-attemptable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    /// Recipient of the value transfer and call.
    pub target: AccountId,
    /// Value to transfer on dispatch.
    pub value: Amount,
    /// Opaque call data carried to the target.
    pub payload: Vec<u8>,
    /// Whether the action has been dispatched successfully.
    pub executed: bool,
}

impl Action {
    pub fn new(target: AccountId, value: Amount, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            payload,
            executed: false,
        }
    }
}
