//! End-to-end scenarios driving the engine through full lifecycles.

use quorum_engine::dispatch::NullDispatcher;
use quorum_engine::{
    DispatchError, Dispatcher, Engine, EngineConfig, EngineError, ExecutionStatus,
    GovernanceAction, OutboundCall,
};
use quorum_engine::config::OracleSpec;
use quorum_store::StoreError;
use quorum_types::{AccountId, Amount, Event};

fn acct(n: u8) -> AccountId {
    AccountId::new([n; 32])
}

fn engine_id() -> AccountId {
    acct(0xEE)
}

fn build(weights: &[u64], threshold: u64, governable: bool) -> Engine {
    let oracles = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| OracleSpec {
            account: acct(i as u8 + 1),
            weight: w,
        })
        .collect();
    Engine::new(&EngineConfig {
        identity: engine_id(),
        oracles,
        threshold,
        governable,
    })
    .unwrap()
}

/// Rejects every call whose budget is below what the "target" needs.
struct MeteredDispatcher {
    required_budget: u64,
}

impl Dispatcher for MeteredDispatcher {
    fn dispatch(&mut self, call: &OutboundCall, _engine: &mut Engine) -> Result<(), DispatchError> {
        match call.budget {
            Some(budget) if budget < self.required_budget => Err(DispatchError::BudgetExhausted),
            _ => Ok(()),
        }
    }
}

#[test]
fn two_of_three_executes_one_does_not() {
    let mut engine = build(&[1, 1, 1], 2, false);
    engine.deposit(acct(40), Amount::new(1_000)).unwrap();

    let (id, status) = engine
        .propose_and_support(acct(1), acct(9), Amount::new(10), vec![], None, &mut NullDispatcher)
        .unwrap();
    assert_eq!(status, ExecutionStatus::NotConfirmed);
    assert!(!engine.is_confirmed(id).unwrap());

    engine.support(acct(2), id).unwrap();
    assert!(engine.is_confirmed(id).unwrap());
    let status = engine.execute(acct(2), id, None, &mut NullDispatcher).unwrap();
    assert_eq!(status, ExecutionStatus::Executed);
    assert_eq!(engine.balance(), Amount::new(990));
    assert_eq!(engine.count(false, true), 1);
    assert_eq!(engine.count(true, false), 0);
}

#[test]
fn governance_removal_auto_lowers_threshold() {
    // Roster [w=2, w=2, w=3], threshold 6: removing a weight-2 oracle must
    // lower the threshold to the new total of 5 without a separate vote.
    let mut engine = build(&[2, 2, 3], 6, true);
    let payload = GovernanceAction::RemoveOracle { account: acct(1) }
        .encode()
        .unwrap();
    let gov = engine
        .propose(acct(1), engine_id(), Amount::ZERO, payload)
        .unwrap();
    engine.support(acct(1), gov).unwrap();
    engine.support(acct(2), gov).unwrap();
    engine.support(acct(3), gov).unwrap();
    let status = engine.execute(acct(3), gov, None, &mut NullDispatcher).unwrap();
    assert_eq!(status, ExecutionStatus::Executed);

    assert_eq!(engine.threshold(), 5);
    assert_eq!(engine.weight_of(&acct(1)), 0);
    assert_eq!(engine.roster().len(), 2);
    assert!(engine
        .events()
        .iter()
        .any(|e| matches!(e, Event::ThresholdChanged { threshold: 5 })));
}

#[test]
fn revoke_after_execution_is_rejected() {
    let mut engine = build(&[1, 1, 1], 2, false);
    let (id, _) = engine
        .propose_and_support(acct(1), acct(9), Amount::ZERO, vec![], None, &mut NullDispatcher)
        .unwrap();
    engine.support(acct(2), id).unwrap();
    engine.execute(acct(2), id, None, &mut NullDispatcher).unwrap();

    assert_eq!(
        engine.revoke(acct(1), id),
        Err(EngineError::Store(StoreError::AlreadyExecuted(id)))
    );
    // The endorsement is immutable history.
    assert_eq!(engine.supporter_count(id).unwrap(), 2);
}

#[test]
fn revoke_before_execution_blocks_confirmation() {
    let mut engine = build(&[1, 1, 1], 2, false);
    let (id, _) = engine
        .propose_and_support(acct(1), acct(9), Amount::ZERO, vec![], None, &mut NullDispatcher)
        .unwrap();
    engine.support(acct(2), id).unwrap();
    assert!(engine.is_confirmed(id).unwrap());

    engine.revoke(acct(2), id).unwrap();
    assert!(!engine.is_confirmed(id).unwrap());
    let status = engine.execute(acct(1), id, None, &mut NullDispatcher).unwrap();
    assert_eq!(status, ExecutionStatus::NotConfirmed);
}

#[test]
fn budget_exhaustion_fails_then_larger_budget_succeeds() {
    let mut engine = build(&[1, 1, 1], 2, false);
    engine.deposit(acct(40), Amount::new(100)).unwrap();
    let id = engine
        .propose(acct(1), acct(9), Amount::new(100), vec![])
        .unwrap();
    engine.support(acct(1), id).unwrap();
    engine.support(acct(2), id).unwrap();

    let mut dispatcher = MeteredDispatcher { required_budget: 500 };
    let status = engine.execute(acct(1), id, Some(100), &mut dispatcher).unwrap();
    assert_eq!(status, ExecutionStatus::ExecutionFailed);
    // Funds were refunded and the action is re-attemptable.
    assert_eq!(engine.balance(), Amount::new(100));
    assert!(!engine.action(id).unwrap().executed);

    let status = engine.execute(acct(1), id, Some(500), &mut dispatcher).unwrap();
    assert_eq!(status, ExecutionStatus::Executed);
    assert_eq!(engine.balance(), Amount::ZERO);
}

#[test]
fn event_log_records_each_transition_once_in_order() {
    let mut engine = build(&[1, 1, 1], 2, false);
    engine.deposit(acct(40), Amount::new(50)).unwrap();
    let (id, _) = engine
        .propose_and_support(acct(1), acct(9), Amount::new(50), vec![], None, &mut NullDispatcher)
        .unwrap();
    engine.support(acct(3), id).unwrap();
    engine.execute(acct(3), id, None, &mut NullDispatcher).unwrap();

    assert_eq!(
        engine.events(),
        &[
            Event::Deposit {
                from: acct(40),
                amount: Amount::new(50)
            },
            Event::Proposed {
                action: id,
                proposer: acct(1)
            },
            Event::Supported {
                action: id,
                oracle: acct(1)
            },
            Event::Supported {
                action: id,
                oracle: acct(3)
            },
            Event::Executed { action: id },
        ]
    );

    // The log is serializable for external observers.
    let rendered = serde_json::to_string(engine.events()).unwrap();
    assert!(rendered.contains("Executed"));
}

#[test]
fn pending_and_executed_ranges_track_lifecycle() {
    let mut engine = build(&[1, 1], 1, false);
    let mut ids = Vec::new();
    for _ in 0..4 {
        let (id, status) = engine
            .propose_and_support(acct(1), acct(9), Amount::ZERO, vec![], None, &mut NullDispatcher)
            .unwrap();
        assert_eq!(status, ExecutionStatus::Executed);
        ids.push(id);
    }
    let pending_only = engine
        .propose(acct(2), acct(9), Amount::ZERO, vec![])
        .unwrap();

    assert_eq!(engine.ids_in_range(0, 10, false, true).unwrap(), ids);
    assert_eq!(
        engine.ids_in_range(0, 10, true, false).unwrap(),
        vec![pending_only]
    );
    assert!(matches!(
        engine.ids_in_range(5, 2, true, true),
        Err(EngineError::Store(StoreError::InvalidRange { .. }))
    ));
}

#[test]
fn full_governance_cycle_add_then_change_threshold() {
    let mut engine = build(&[1, 1], 2, true);

    let add = GovernanceAction::AddOracle {
        account: acct(5),
        weight: 2,
        threshold: 3,
    }
    .encode()
    .unwrap();
    let gov = engine.propose(acct(1), engine_id(), Amount::ZERO, add).unwrap();
    engine.support(acct(1), gov).unwrap();
    engine.support(acct(2), gov).unwrap();
    assert_eq!(
        engine.execute(acct(1), gov, None, &mut NullDispatcher).unwrap(),
        ExecutionStatus::Executed
    );
    assert_eq!(engine.roster().len(), 3);
    assert_eq!(engine.threshold(), 3);

    // The new oracle's weight now counts: 1 + 2 meets the new threshold.
    let change = GovernanceAction::ChangeThreshold { threshold: 2 }.encode().unwrap();
    let gov2 = engine.propose(acct(2), engine_id(), Amount::ZERO, change).unwrap();
    engine.support(acct(2), gov2).unwrap();
    engine.support(acct(5), gov2).unwrap();
    assert_eq!(
        engine.execute(acct(5), gov2, None, &mut NullDispatcher).unwrap(),
        ExecutionStatus::Executed
    );
    assert_eq!(engine.threshold(), 2);
}
