//! The weight ledger — roster, weight table, threshold.

use crate::error::LedgerError;
use quorum_types::{AccountId, Weight};
use std::collections::HashSet;
use tracing::info;

/// The oracle roster with per-oracle weights and the confirmation threshold.
///
/// `roster` and `weights` are position-parallel; `membership` mirrors the
/// roster for O(1) membership tests. Roster order is not semantically
/// meaningful for authorization (the total is what is checked), only for
/// iteration.
#[derive(Clone, Debug)]
pub struct WeightLedger {
    roster: Vec<AccountId>,
    weights: Vec<Weight>,
    membership: HashSet<AccountId>,
    threshold: Weight,
}

impl WeightLedger {
    /// Build a ledger from an initial member list and threshold, enforcing
    /// all invariants atomically: no zero identifiers, no zero weights, no
    /// duplicates, `0 < threshold <= sum(weights)` with a checked sum.
    pub fn new(members: &[(AccountId, Weight)], threshold: Weight) -> Result<Self, LedgerError> {
        if members.is_empty() {
            return Err(LedgerError::EmptyRoster);
        }
        let mut roster = Vec::with_capacity(members.len());
        let mut weights = Vec::with_capacity(members.len());
        let mut membership = HashSet::with_capacity(members.len());
        let mut total: Weight = 0;
        for &(account, weight) in members {
            if account.is_zero() {
                return Err(LedgerError::ZeroAccount);
            }
            if weight == 0 {
                return Err(LedgerError::ZeroWeight);
            }
            if !membership.insert(account) {
                return Err(LedgerError::DuplicateOracle(account.to_string()));
            }
            total = total.checked_add(weight).ok_or(LedgerError::WeightOverflow)?;
            roster.push(account);
            weights.push(weight);
        }
        if threshold == 0 {
            return Err(LedgerError::ZeroThreshold);
        }
        if threshold > total {
            return Err(LedgerError::ThresholdTooHigh { threshold, total });
        }
        Ok(Self {
            roster,
            weights,
            membership,
            threshold,
        })
    }

    /// The account's weight, or zero if it is not currently an oracle.
    pub fn weight_of(&self, account: &AccountId) -> Weight {
        if !self.membership.contains(account) {
            return 0;
        }
        self.roster
            .iter()
            .position(|a| a == account)
            .map(|i| self.weights[i])
            .unwrap_or(0)
    }

    /// Sum of all current weights. Never overflows: every mutation that
    /// grows the sum checks for overflow before committing.
    pub fn total_weight(&self) -> Weight {
        self.weights.iter().sum()
    }

    /// Check that `candidate` is a usable threshold against the current
    /// roster: positive, and reachable by the current total weight.
    pub fn validate_threshold(&self, candidate: Weight) -> Result<(), LedgerError> {
        let total = self.total_weight();
        if candidate == 0 {
            return Err(LedgerError::ZeroThreshold);
        }
        if total == 0 || candidate > total {
            return Err(LedgerError::ThresholdTooHigh {
                threshold: candidate,
                total,
            });
        }
        Ok(())
    }

    /// Append a new oracle to the roster.
    pub fn insert(&mut self, account: AccountId, weight: Weight) -> Result<(), LedgerError> {
        if account.is_zero() {
            return Err(LedgerError::ZeroAccount);
        }
        if weight == 0 {
            return Err(LedgerError::ZeroWeight);
        }
        if self.membership.contains(&account) {
            return Err(LedgerError::DuplicateOracle(account.to_string()));
        }
        self.total_weight()
            .checked_add(weight)
            .ok_or(LedgerError::WeightOverflow)?;
        self.roster.push(account);
        self.weights.push(weight);
        self.membership.insert(account);
        info!(%account, weight, "oracle inserted");
        Ok(())
    }

    /// Remove an oracle by swap-with-last-and-shrink.
    ///
    /// If the removal leaves `threshold > total_weight()`, the threshold is
    /// lowered to the new total as a side effect; the returned value is the
    /// new threshold when that happened, `None` otherwise. Never removes the
    /// last remaining oracle.
    pub fn remove(&mut self, account: &AccountId) -> Result<Option<Weight>, LedgerError> {
        if !self.membership.contains(account) {
            return Err(LedgerError::UnknownOracle(account.to_string()));
        }
        if self.roster.len() == 1 {
            return Err(LedgerError::LastOracle);
        }
        let pos = self
            .roster
            .iter()
            .position(|a| a == account)
            .ok_or_else(|| LedgerError::UnknownOracle(account.to_string()))?;
        self.roster.swap_remove(pos);
        self.weights.swap_remove(pos);
        self.membership.remove(account);
        info!(%account, "oracle removed");

        let total = self.total_weight();
        if self.threshold > total {
            self.threshold = total;
            info!(threshold = total, "threshold auto-lowered after removal");
            return Ok(Some(total));
        }
        Ok(None)
    }

    /// Swap an oracle's identity in place, preserving its weight and
    /// roster position.
    pub fn replace(&mut self, old: &AccountId, new: AccountId) -> Result<(), LedgerError> {
        if new.is_zero() {
            return Err(LedgerError::ZeroAccount);
        }
        if self.membership.contains(&new) {
            return Err(LedgerError::DuplicateOracle(new.to_string()));
        }
        let pos = self
            .roster
            .iter()
            .position(|a| a == old)
            .ok_or_else(|| LedgerError::UnknownOracle(old.to_string()))?;
        self.roster[pos] = new;
        self.membership.remove(old);
        self.membership.insert(new);
        info!(old = %old, new = %new, "oracle replaced");
        Ok(())
    }

    /// Validate and commit a new threshold.
    pub fn set_threshold(&mut self, candidate: Weight) -> Result<(), LedgerError> {
        self.validate_threshold(candidate)?;
        self.threshold = candidate;
        info!(threshold = candidate, "threshold changed");
        Ok(())
    }

    pub fn threshold(&self) -> Weight {
        self.threshold
    }

    pub fn contains(&self, account: &AccountId) -> bool {
        self.membership.contains(account)
    }

    /// The roster in iteration order.
    pub fn roster(&self) -> &[AccountId] {
        &self.roster
    }

    /// The weight table, position-parallel with `roster()`.
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}
