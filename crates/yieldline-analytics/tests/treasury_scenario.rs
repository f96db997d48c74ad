//! Valuation scenarios and price/yield properties.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use yieldline_analytics::prelude::*;
use yieldline_bonds::prelude::*;
use yieldline_core::{Date, Frequency};
use yieldline_curves::curves::FlatCurve;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn treasury_flows() -> CashFlowProjection {
    let bond = BondDefinition::new(
        "US912810TL26",
        dec!(0.03),
        date(2052, 8, 15),
        BondCategory::Treasury.bundle(),
    );
    let settlement = date(2025, 6, 30);
    let schedule = Schedule::generate(&bond, settlement).unwrap();
    CashFlowProjection::project(&bond, &schedule, settlement).unwrap()
}

// =============================================================================
// US TREASURY 3% 2052
// =============================================================================

#[test]
fn test_treasury_yield_and_duration() {
    let flows = treasury_flows();
    let solution = YieldSolver::default().solve(&flows, 71.66).unwrap();

    assert_relative_eq!(solution.ytm, 0.048985, epsilon = 5e-5);
    assert!(solution.iterations < 100);

    let risk = RiskMetrics::compute(&flows, solution.ytm).unwrap();
    assert!((risk.modified_duration - 16.358).abs() <= 0.02);
    assert_relative_eq!(
        risk.modified_duration,
        risk.macaulay_duration / (1.0 + solution.ytm / 2.0),
        epsilon = 1e-9
    );
    assert_relative_eq!(risk.dirty_price, 71.66 + flows.accrued_f64(), epsilon = 1e-3);
    assert_relative_eq!(risk.pvbp, 0.119, epsilon = 1e-3);
}

#[test]
fn test_treasury_convexity_methods_agree() {
    let flows = treasury_flows();
    let ytm = YieldSolver::default().solve(&flows, 71.66).unwrap().ytm;
    let analytic = RiskMetrics::compute(&flows, ytm).unwrap().convexity;
    let bumped = effective_convexity(&flows, ytm, CONVEXITY_BUMP).unwrap();
    assert_relative_eq!(analytic, bumped, max_relative = 1e-4);
}

#[test]
fn test_treasury_z_spread_and_oas() {
    let flows = treasury_flows();
    let ytm = YieldSolver::default().solve(&flows, 71.66).unwrap().ytm;
    let risk = RiskMetrics::compute(&flows, ytm).unwrap();

    let curve = FlatCurve::new(0.045);
    let z = ZSpreadCalculator::new(&curve)
        .calculate(&flows, risk.dirty_price)
        .unwrap();
    // 4.899% semiannual is about 4.84% continuous.
    assert!(z > 25.0 && z < 45.0, "z-spread {z}");

    let oas = OasApproximation::vanilla(z, &risk);
    assert_relative_eq!(oas.oas, z);
    assert_relative_eq!(oas.option_adjusted_duration, risk.modified_duration);
}

#[test]
fn test_non_convergent_guard() {
    let flows = treasury_flows();
    // Needs a yield far below the -5% clamp.
    let err = YieldSolver::default().solve(&flows, 5_000.0).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::Solver(SolverError::NonConvergent { iterations: 100, .. })
    ));
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::all().to_vec())
}

fn category() -> impl Strategy<Value = BondCategory> {
    prop::sample::select(vec![
        BondCategory::Treasury,
        BondCategory::Corporate,
        BondCategory::Financial,
        BondCategory::International,
    ])
}

proptest! {
    #[test]
    fn prop_price_yield_round_trip(
        coupon_bp in 0u32..1200,
        tenor_days in 30i64..(30 * 365),
        settle_offset in 0i64..730,
        ytm in 0.001f64..0.20,
        frequency in frequency(),
        category in category(),
    ) {
        let settlement = date(2025, 1, 2).add_days(settle_offset);
        let maturity = settlement.add_days(tenor_days);
        let coupon = Decimal::from(coupon_bp) / dec!(10000);
        let bond = BondDefinition::new("P", coupon, maturity, category.bundle())
            .with_frequency(frequency);
        let schedule = Schedule::generate(&bond, settlement).unwrap();
        let flows = CashFlowProjection::project(&bond, &schedule, settlement).unwrap();

        let price = price_from_yield(&flows, ytm).clean;
        let solved = YieldSolver::default().solve(&flows, price).unwrap();
        let repriced = price_from_yield(&flows, solved.ytm).clean;
        prop_assert!((repriced - price).abs() < 1e-4, "{price} vs {repriced}");

        let risk = RiskMetrics::compute(&flows, solved.ytm).unwrap();
        let f = f64::from(frequency.periods_per_year());
        prop_assert!(
            (risk.modified_duration - risk.macaulay_duration / (1.0 + solved.ytm / f)).abs() < 1e-9
        );
    }
}
