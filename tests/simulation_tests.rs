//! Cash-out simulation loop.

use std::sync::Arc;
use std::time::Duration;

use hedgeline::adapter::outbound::memory::ledger::MemoryLedger;
use hedgeline::application::cashout::{CashoutPolicy, CashoutValuator};
use hedgeline::application::simulation::{Simulation, SimulationSettings};
use hedgeline::domain::ledger::LedgerAction;
use hedgeline::port::outbound::ledger::Ledger;
use hedgeline::testkit::config::{exact_options, fast_simulation, highs_allocation};
use hedgeline::testkit::domain::{odds, single_fixture};
use hedgeline::testkit::odds::ScriptedOdds;
use rust_decimal_macros::dec;
use tokio::sync::watch;

fn simulation(
    settings: SimulationSettings,
    script: Vec<hedgeline::domain::bet::UpdatedOdds>,
) -> (Simulation, Arc<MemoryLedger>, Arc<ScriptedOdds>) {
    let ledger = Arc::new(MemoryLedger::new(dec!(100)));
    let source = Arc::new(ScriptedOdds::new(script));
    let allocation = highs_allocation();
    let valuator = CashoutValuator::new(allocation.clone(), source.clone(), CashoutPolicy::default());
    let simulation = Simulation::new(allocation, valuator, ledger.clone(), settings);
    (simulation, ledger, source)
}

#[tokio::test]
async fn places_the_position_then_runs_rounds() {
    let (simulation, ledger, source) = simulation(fast_simulation(3), vec![odds(&[])]);
    let (_tx, rx) = watch::channel(false);

    let report = simulation
        .run(&single_fixture(), dec!(6), None, &exact_options(), rx)
        .await
        .unwrap();

    assert!(!report.cancelled);
    assert!(report.rounds >= 1 && report.rounds <= 3);
    assert_eq!(report.history.len(), report.rounds + 1);
    assert_eq!(report.history[0], dec!(94));
    assert_eq!(report.final_bankroll, ledger.balance());
    assert_eq!(source.served(), report.rounds);

    let entries = ledger.entries();
    assert_eq!(entries[0].action, LedgerAction::PlaceBets);
    assert_eq!(entries[0].amount, dec!(-6));
    // The away bet at 6.00 always clears its stake, so round one cashes out.
    assert_eq!(entries[1].action, LedgerAction::Cashout);
    assert!(report.final_bankroll > dec!(94));
}

#[tokio::test]
async fn stops_early_once_everything_is_cashed_out() {
    // Odds lengthened far enough that every offer beats its stake.
    let script = vec![odds(&[("H", "5.00"), ("HD", "5.00")])];
    let (simulation, _ledger, _) = simulation(fast_simulation(10), script);
    let (_tx, rx) = watch::channel(false);

    let report = simulation
        .run(&single_fixture(), dec!(6), None, &exact_options(), rx)
        .await
        .unwrap();

    assert_eq!(report.rounds, 1);
    assert!(report.remaining_stakes.total().is_zero());
    assert!(!report.cancelled);
}

#[tokio::test]
async fn shutdown_before_the_first_round_cancels() {
    let (simulation, ledger, source) = simulation(fast_simulation(5), vec![odds(&[])]);
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let report = simulation
        .run(&single_fixture(), dec!(6), None, &exact_options(), rx)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.rounds, 0);
    assert_eq!(report.history, vec![dec!(94)]);
    assert_eq!(source.served(), 0);
    assert_eq!(ledger.entries().len(), 1);
}

#[tokio::test]
async fn shutdown_interrupts_the_wait_between_rounds() {
    let settings = SimulationSettings {
        iterations: 5,
        interval: Duration::from_secs(60),
    };
    // Unchanged odds keep the short-priced bets open after round one.
    let script = vec![odds(&[("H", "1.05"), ("HD", "1.05")])];
    let (simulation, _ledger, _) = simulation(settings, script);
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        simulation
            .run(&single_fixture(), dec!(6), None, &exact_options(), rx)
            .await
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.send(true).unwrap();

    let report = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("simulation should stop promptly")
        .unwrap()
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.rounds, 1);
}

#[tokio::test]
async fn unsolvable_stake_fails_without_touching_the_ledger() {
    let (simulation, ledger, _) = simulation(fast_simulation(2), vec![odds(&[])]);
    let (_tx, rx) = watch::channel(false);

    let result = simulation
        .run(&single_fixture(), dec!(2), None, &exact_options(), rx)
        .await;

    assert!(result.is_err());
    assert!(ledger.entries().is_empty());
}
