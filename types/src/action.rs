//! Action sequence numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a proposed action — a monotonically increasing sequence
/// number starting at zero, assigned at proposal time and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(u64);

impl ActionId {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The next sequence number after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
