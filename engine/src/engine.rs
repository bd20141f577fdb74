//! The confirmation engine state machine.

use crate::config::EngineConfig;
use crate::dispatch::{DispatchError, Dispatcher, OutboundCall};
use crate::error::EngineError;
use crate::governance::GovernanceAction;
use quorum_ledger::{LedgerError, WeightLedger};
use quorum_store::{Action, ActionStore};
use quorum_types::{AccountId, ActionId, Amount, Event, Weight};
use tracing::{info, warn};

/// Outcome of an `execute` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The dispatch succeeded; the action is final.
    Executed,
    /// The dispatch failed; the action was reset to re-attemptable.
    ExecutionFailed,
    /// Accumulated support has not reached the threshold; nothing happened.
    NotConfirmed,
}

/// One engine instance: a weight ledger, an action log, a value balance,
/// and an append-only event log. All state is instance-scoped; there are no
/// process-wide singletons.
///
/// Every operation is synchronous to completion and takes `&mut self`, so a
/// concurrent host gets per-instance serialization from the borrow rules.
/// The only re-entrancy hazard is the dispatch edge, and `execute` commits
/// the executed flag strictly before dispatching.
pub struct Engine {
    identity: AccountId,
    governable: bool,
    ledger: WeightLedger,
    store: ActionStore,
    balance: Amount,
    events: Vec<Event>,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        if config.identity.is_zero() {
            return Err(EngineError::ZeroIdentity);
        }
        let ledger = WeightLedger::new(&config.members(), config.threshold)?;
        info!(
            identity = %config.identity,
            oracles = ledger.len(),
            threshold = ledger.threshold(),
            governable = config.governable,
            "engine constructed"
        );
        Ok(Self {
            identity: config.identity,
            governable: config.governable,
            ledger,
            store: ActionStore::new(),
            balance: Amount::ZERO,
            events: Vec::new(),
        })
    }

    // ── Inbound calls ────────────────────────────────────────────────────

    /// Append a new action to the log. Caller must be a current oracle.
    pub fn propose(
        &mut self,
        caller: AccountId,
        target: AccountId,
        value: Amount,
        payload: Vec<u8>,
    ) -> Result<ActionId, EngineError> {
        self.require_oracle(&caller)?;
        let id = self.store.propose(target, value, payload)?;
        self.emit(Event::Proposed {
            action: id,
            proposer: caller,
        });
        Ok(id)
    }

    /// Record the caller's endorsement of an action. Callers are expected to
    /// invoke [`Engine::execute`] opportunistically after every support
    /// change.
    pub fn support(&mut self, caller: AccountId, id: ActionId) -> Result<(), EngineError> {
        self.require_oracle(&caller)?;
        self.store.support(id, caller)?;
        self.emit(Event::Supported {
            action: id,
            oracle: caller,
        });
        Ok(())
    }

    /// Withdraw the caller's endorsement of a not-yet-executed action.
    pub fn revoke(&mut self, caller: AccountId, id: ActionId) -> Result<(), EngineError> {
        self.require_oracle(&caller)?;
        self.store.revoke(id, &caller)?;
        self.emit(Event::SupportRevoked {
            action: id,
            oracle: caller,
        });
        Ok(())
    }

    /// Propose, support, and opportunistically execute as one sequential
    /// operation — the common entry point for a brand-new action.
    pub fn propose_and_support(
        &mut self,
        caller: AccountId,
        target: AccountId,
        value: Amount,
        payload: Vec<u8>,
        budget: Option<u64>,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<(ActionId, ExecutionStatus), EngineError> {
        let id = self.propose(caller, target, value, payload)?;
        self.support(caller, id)?;
        let status = self.execute(caller, id, budget, dispatcher)?;
        Ok((id, status))
    }

    /// Attempt to execute a confirmed action.
    ///
    /// Preconditions (fatal when violated): the caller is a current oracle,
    /// the caller supports the action, the action is not yet executed. An
    /// unconfirmed action is a deliberate no-op (`Ok(NotConfirmed)`), not an
    /// error.
    ///
    /// When confirmed, the executed flag is committed strictly before the
    /// dispatch attempt, so a reentrant call for the same action is rejected
    /// by the not-executed precondition. A failed dispatch resets the flag
    /// and returns `Ok(ExecutionFailed)`; the action may be retried.
    pub fn execute(
        &mut self,
        caller: AccountId,
        id: ActionId,
        budget: Option<u64>,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<ExecutionStatus, EngineError> {
        self.require_oracle(&caller)?;
        if !self.store.supports(id, &caller)? {
            return Err(EngineError::NotSupporter {
                action: id,
                caller: caller.to_string(),
            });
        }
        if self.store.get(id)?.executed {
            return Err(quorum_store::StoreError::AlreadyExecuted(id).into());
        }
        if !self.is_confirmed(id)? {
            return Ok(ExecutionStatus::NotConfirmed);
        }

        // Checks-effects-interactions: commit the flag before dispatching.
        self.store.mark_executed(id)?;
        let action = self.store.get(id)?.clone();

        let mut debited = false;
        let result = if self.governable && action.target == self.identity {
            self.apply_governance(&action.payload)
        } else if action.value.raw() > self.balance.raw() {
            Err(DispatchError::InsufficientBalance {
                needed: action.value,
                available: self.balance,
            })
        } else {
            // Commit the funds before handing control to the target.
            self.balance = self.balance.saturating_sub(action.value);
            debited = true;
            let call = OutboundCall {
                target: action.target,
                value: action.value,
                payload: action.payload.clone(),
                budget,
            };
            dispatcher.dispatch(&call, self)
        };

        match result {
            Ok(()) => {
                info!(action = %id, target = %action.target, "action executed");
                self.emit(Event::Executed { action: id });
                Ok(ExecutionStatus::Executed)
            }
            Err(err) => {
                self.store.clear_executed(id)?;
                if debited {
                    self.balance = self
                        .balance
                        .checked_add(action.value)
                        .ok_or(EngineError::BalanceOverflow)?;
                }
                warn!(action = %id, error = %err, "dispatch failed; action re-attemptable");
                self.emit(Event::ExecutionFailed { action: id });
                Ok(ExecutionStatus::ExecutionFailed)
            }
        }
    }

    /// Accept a plain value transfer with no payload. Nonzero amounts emit a
    /// deposit notification; zero amounts are silently accepted.
    pub fn deposit(&mut self, from: AccountId, amount: Amount) -> Result<(), EngineError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(EngineError::BalanceOverflow)?;
        if !amount.is_zero() {
            self.emit(Event::Deposit { from, amount });
        }
        Ok(())
    }

    // ── Confirmation ─────────────────────────────────────────────────────

    /// Whether accumulated support weight for the action meets the
    /// threshold. Walks the current roster in order, short-circuiting once
    /// the running total reaches the threshold; accounts no longer on the
    /// roster contribute nothing even if their historical support remains.
    pub fn is_confirmed(&self, id: ActionId) -> Result<bool, EngineError> {
        let threshold = self.ledger.threshold();
        let mut accumulated: Weight = 0;
        for (oracle, weight) in self.ledger.roster().iter().zip(self.ledger.weights()) {
            if self.store.supports(id, oracle)? {
                accumulated = accumulated
                    .checked_add(*weight)
                    .ok_or(LedgerError::WeightOverflow)?;
                if accumulated >= threshold {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Total current-roster weight backing the action.
    pub fn support_weight(&self, id: ActionId) -> Result<Weight, EngineError> {
        let mut accumulated: Weight = 0;
        for (oracle, weight) in self.ledger.roster().iter().zip(self.ledger.weights()) {
            if self.store.supports(id, oracle)? {
                accumulated = accumulated
                    .checked_add(*weight)
                    .ok_or(LedgerError::WeightOverflow)?;
            }
        }
        Ok(accumulated)
    }

    // ── Self-governance gate ─────────────────────────────────────────────

    // Reachable only from `execute` on a confirmed self-targeted action;
    // there is no public mutation entry point.
    fn apply_governance(&mut self, payload: &[u8]) -> Result<(), DispatchError> {
        let action = GovernanceAction::decode(payload)
            .map_err(|_| DispatchError::MalformedGovernancePayload)?;
        let gov = |e: LedgerError| DispatchError::Governance(e.to_string());
        match action {
            GovernanceAction::AddOracle {
                account,
                weight,
                threshold,
            } => {
                // Validate the insert and the new threshold together; commit
                // both or neither.
                let previous = self.ledger.threshold();
                let mut next = self.ledger.clone();
                next.insert(account, weight).map_err(gov)?;
                next.set_threshold(threshold).map_err(gov)?;
                self.ledger = next;
                self.emit(Event::OracleAdded { account, weight });
                if threshold != previous {
                    self.emit(Event::ThresholdChanged { threshold });
                }
            }
            GovernanceAction::RemoveOracle { account } => {
                let lowered = self.ledger.remove(&account).map_err(gov)?;
                self.emit(Event::OracleRemoved { account });
                if let Some(threshold) = lowered {
                    self.emit(Event::ThresholdChanged { threshold });
                }
            }
            GovernanceAction::ReplaceOracle { old, new } => {
                let weight = self.ledger.weight_of(&old);
                self.ledger.replace(&old, new).map_err(gov)?;
                self.emit(Event::OracleRemoved { account: old });
                self.emit(Event::OracleAdded { account: new, weight });
            }
            GovernanceAction::ChangeThreshold { threshold } => {
                self.ledger.set_threshold(threshold).map_err(gov)?;
                self.emit(Event::ThresholdChanged { threshold });
            }
        }
        Ok(())
    }

    // ── Read-only queries ────────────────────────────────────────────────

    pub fn identity(&self) -> AccountId {
        self.identity
    }

    pub fn is_governable(&self) -> bool {
        self.governable
    }

    pub fn weight_of(&self, account: &AccountId) -> Weight {
        self.ledger.weight_of(account)
    }

    pub fn roster(&self) -> &[AccountId] {
        self.ledger.roster()
    }

    pub fn weights(&self) -> &[Weight] {
        self.ledger.weights()
    }

    pub fn threshold(&self) -> Weight {
        self.ledger.threshold()
    }

    pub fn action(&self, id: ActionId) -> Result<&Action, EngineError> {
        Ok(self.store.get(id)?)
    }

    pub fn supporters(&self, id: ActionId) -> Result<&[AccountId], EngineError> {
        Ok(self.store.supporters(id)?)
    }

    pub fn supporter_count(&self, id: ActionId) -> Result<usize, EngineError> {
        Ok(self.store.supporter_count(id)?)
    }

    pub fn action_count(&self) -> u64 {
        self.store.action_count()
    }

    pub fn count(&self, pending: bool, executed: bool) -> u64 {
        self.store.count(pending, executed)
    }

    pub fn ids_in_range(
        &self,
        from: u64,
        to: u64,
        pending: bool,
        executed: bool,
    ) -> Result<Vec<ActionId>, EngineError> {
        Ok(self.store.ids_in_range(from, to, pending, executed)?)
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The append-only notification log, in transition order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_oracle(&self, caller: &AccountId) -> Result<(), EngineError> {
        if !self.ledger.contains(caller) {
            return Err(EngineError::NotOracle(caller.to_string()));
        }
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        info!(?event, "notification");
        self.events.push(event);
    }
}
