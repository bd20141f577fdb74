//! The append-only action log with per-action support sets.

use crate::action::Action;
use crate::error::StoreError;
use quorum_types::{AccountId, ActionId, Amount};
use tracing::debug;

/// In-memory action log. Index position is the action's sequence number;
/// `support` is position-parallel, holding each action's supporters in
/// endorsement order.
#[derive(Clone, Debug, Default)]
pub struct ActionStore {
    actions: Vec<Action>,
    support: Vec<Vec<AccountId>>,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new action and return its sequence number. No authorization
    /// check happens here.
    pub fn propose(
        &mut self,
        target: AccountId,
        value: Amount,
        payload: Vec<u8>,
    ) -> Result<ActionId, StoreError> {
        if target.is_zero() {
            return Err(StoreError::ZeroTarget);
        }
        let id = ActionId::new(self.actions.len() as u64);
        self.actions.push(Action::new(target, value, payload));
        self.support.push(Vec::new());
        debug!(action = %id, %target, "action appended");
        Ok(id)
    }

    pub fn get(&self, id: ActionId) -> Result<&Action, StoreError> {
        self.actions
            .get(id.raw() as usize)
            .ok_or(StoreError::UnknownAction(id))
    }

    /// Record an account's endorsement of an action.
    pub fn support(&mut self, id: ActionId, account: AccountId) -> Result<(), StoreError> {
        let idx = self.index_of(id)?;
        if self.actions[idx].executed {
            return Err(StoreError::AlreadyExecuted(id));
        }
        if self.support[idx].contains(&account) {
            return Err(StoreError::DuplicateSupport {
                action: id,
                account: account.to_string(),
            });
        }
        self.support[idx].push(account);
        Ok(())
    }

    /// Withdraw an account's endorsement. Executed actions are immutable
    /// history and cannot lose support.
    pub fn revoke(&mut self, id: ActionId, account: &AccountId) -> Result<(), StoreError> {
        let idx = self.index_of(id)?;
        if self.actions[idx].executed {
            return Err(StoreError::AlreadyExecuted(id));
        }
        let pos = self.support[idx]
            .iter()
            .position(|a| a == account)
            .ok_or_else(|| StoreError::SupportNotFound {
                action: id,
                account: account.to_string(),
            })?;
        self.support[idx].remove(pos);
        Ok(())
    }

    pub fn supports(&self, id: ActionId, account: &AccountId) -> Result<bool, StoreError> {
        let idx = self.index_of(id)?;
        Ok(self.support[idx].contains(account))
    }

    /// The action's supporters in endorsement order.
    pub fn supporters(&self, id: ActionId) -> Result<&[AccountId], StoreError> {
        let idx = self.index_of(id)?;
        Ok(&self.support[idx])
    }

    pub fn supporter_count(&self, id: ActionId) -> Result<usize, StoreError> {
        Ok(self.supporters(id)?.len())
    }

    /// Flip the executed flag before dispatch (checks-effects-interactions).
    pub fn mark_executed(&mut self, id: ActionId) -> Result<(), StoreError> {
        let idx = self.index_of(id)?;
        if self.actions[idx].executed {
            return Err(StoreError::AlreadyExecuted(id));
        }
        self.actions[idx].executed = true;
        Ok(())
    }

    /// Reset the executed flag after a failed dispatch, returning the action
    /// to a re-attemptable state.
    pub fn clear_executed(&mut self, id: ActionId) -> Result<(), StoreError> {
        let idx = self.index_of(id)?;
        self.actions[idx].executed = false;
        Ok(())
    }

    /// Total number of actions ever proposed.
    pub fn action_count(&self) -> u64 {
        self.actions.len() as u64
    }

    /// Count actions matching the filter flags: `pending` includes
    /// not-yet-executed actions, `executed` includes executed ones.
    pub fn count(&self, pending: bool, executed: bool) -> u64 {
        self.actions
            .iter()
            .filter(|a| (pending && !a.executed) || (executed && a.executed))
            .count() as u64
    }

    /// Ids of filtered actions, sliced as `[from, to)` over the filtered
    /// sequence. `to < from` is rejected; `to` beyond the filtered count is
    /// clamped.
    pub fn ids_in_range(
        &self,
        from: u64,
        to: u64,
        pending: bool,
        executed: bool,
    ) -> Result<Vec<ActionId>, StoreError> {
        if to < from {
            return Err(StoreError::InvalidRange { from, to });
        }
        let filtered: Vec<ActionId> = self
            .actions
            .iter()
            .enumerate()
            .filter(|(_, a)| (pending && !a.executed) || (executed && a.executed))
            .map(|(i, _)| ActionId::new(i as u64))
            .collect();
        let lo = (from as usize).min(filtered.len());
        let hi = (to as usize).min(filtered.len());
        Ok(filtered[lo..hi].to_vec())
    }

    fn index_of(&self, id: ActionId) -> Result<usize, StoreError> {
        let idx = id.raw() as usize;
        if idx >= self.actions.len() {
            return Err(StoreError::UnknownAction(id));
        }
        Ok(idx)
    }
}
