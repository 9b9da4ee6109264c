//! Recalibration of a placed position under moved odds.

use hedgeline::application::recalibration::Recalibrator;
use hedgeline::domain::bet::UpdatedOdds;
use hedgeline::error::AllocationError;
use hedgeline::testkit::config::{exact_options, highs_allocation};
use hedgeline::testkit::domain::{bet_with_min, odds, single_fixture, stakes};
use rust_decimal_macros::dec;

fn placed() -> hedgeline::domain::allocation::Allocation {
    stakes(&[("H", "1"), ("A", "1"), ("HD", "4")])
}

#[test]
fn unchanged_odds_reproduce_the_original_optimum() {
    let recalibrator = Recalibrator::new(highs_allocation());
    let report = recalibrator
        .recalibrate(
            &single_fixture(),
            &placed(),
            dec!(6),
            &UpdatedOdds::new(),
            None,
            &exact_options(),
        )
        .unwrap();

    assert_eq!(report.current_net, dec!(-0.24));
    assert_eq!(report.recommended_net(), Some(dec!(-0.24)));
}

#[test]
fn drifting_odds_reprice_current_and_recommended() {
    let recalibrator = Recalibrator::new(highs_allocation());
    let report = recalibrator
        .recalibrate(
            &single_fixture(),
            &placed(),
            dec!(6),
            &odds(&[("A", "3.00")]),
            None,
            &exact_options(),
        )
        .unwrap();

    assert_eq!(report.current_net, dec!(-3));
    assert_eq!(report.current_scenarios.len(), 3);

    let recommended = report.recommended.as_ref().unwrap();
    assert_eq!(recommended.guaranteed_net, dec!(-1.68));
    assert!(recommended.guaranteed_net >= report.current_net);
}

#[test]
fn failed_resolve_still_reports_the_current_position() {
    let bets = vec![
        bet_with_min("H", 0, &["H"], "1.40", "5"),
        bet_with_min("A", 0, &["A"], "6.00", "5"),
    ];
    let report = Recalibrator::new(highs_allocation())
        .recalibrate(
            &bets,
            &stakes(&[("H", "5"), ("A", "5")]),
            dec!(4),
            &UpdatedOdds::new(),
            None,
            &exact_options(),
        )
        .unwrap();

    assert_eq!(report.current_net, dec!(-10));
    assert!(matches!(
        report.recommended,
        Err(AllocationError::InsufficientBankrollForMinimums { .. })
    ));
    assert_eq!(report.recommended_net(), None);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["recommended"]["status"],
        "InsufficientBankrollForMinimums"
    );
}

#[test]
fn invalid_bet_set_is_an_error() {
    let err = Recalibrator::new(highs_allocation())
        .recalibrate(
            &single_fixture(),
            &placed(),
            dec!(6),
            &UpdatedOdds::new(),
            Some(0),
            &exact_options(),
        )
        .unwrap_err();

    assert!(matches!(err, AllocationError::EventIndexOutOfRange { .. }));
}
