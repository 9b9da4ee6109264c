use rust_decimal::Decimal;

pub fn assert_decimal_near(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Every scenario net must sit at or above the guaranteed return.
pub fn assert_floor_holds(scenarios: &[Decimal], guaranteed: Decimal, tolerance: Decimal) {
    for (idx, net) in scenarios.iter().enumerate() {
        assert!(
            *net + tolerance >= guaranteed,
            "scenario {idx} nets {net}, below guaranteed {guaranteed}"
        );
    }
}
