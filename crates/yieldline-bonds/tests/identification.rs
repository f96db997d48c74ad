//! End-to-end identification: description or ISIN in, bond definition out.

use std::sync::Arc;

use rust_decimal_macros::dec;
use yieldline_bonds::prelude::*;
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Date, Frequency};

fn as_of() -> Date {
    Date::from_ymd(2025, 6, 30).unwrap()
}

// =============================================================================
// DATE DISAMBIGUATION
// =============================================================================

#[test]
fn test_day_above_twelve_forces_day_first() {
    let parsed = DescriptionParser::new(as_of())
        .parse("T 3 15/08/52", None)
        .unwrap();
    assert_eq!(parsed.maturity, Date::from_ymd(2052, 8, 15).unwrap());
    assert_eq!(parsed.coupon, dec!(3.0));
    assert_eq!(parsed.date_format_used, DateFormat::EU);
}

#[test]
fn test_same_text_reads_differently_by_country() {
    let parser = DescriptionParser::new(as_of());
    let ny = parser.parse("IBM 4 03/04/33", Some("US46625HJE18")).unwrap();
    let ldn = parser.parse("IBM 4 03/04/33", Some("GB00B03MLX29")).unwrap();
    assert_eq!(ny.maturity, Date::from_ymd(2033, 3, 4).unwrap());
    assert_eq!(ldn.maturity, Date::from_ymd(2033, 4, 3).unwrap());
}

// =============================================================================
// RESOLUTION
// =============================================================================

#[test]
fn test_reference_data_beats_description() {
    let store = InMemoryConventionStore::from_json_str(
        "reference",
        true,
        r#"[{"key": "US912810TL26", "day_count": "ActualActual_ISDA", "frequency": "Semiannual",
             "coupon_rate": 0.03, "maturity": "2052-08-15"}]"#,
    )
    .unwrap();
    let resolver = ConventionResolver::new(as_of()).with_primary_store(Arc::new(store));

    let id = Identifier::from_isin("US912810TL26").with_description("T 3 08/15/52");
    let resolved = resolver.resolve_bond(&id, 71.66, None).unwrap();

    assert_eq!(resolved.record.source, ConventionSource::ExactIsinMatch);
    assert_eq!(resolved.definition.day_count, DayCountConvention::ActualActualIsda);
}

#[test]
fn test_description_only_treasury() {
    let resolver = ConventionResolver::new(as_of());
    let resolved = resolver
        .resolve_bond(&Identifier::from_description("T 3 08/15/52"), 71.66, None)
        .unwrap();

    let bond = &resolved.definition;
    assert_eq!(resolved.record.confidence, Confidence::Medium);
    assert_eq!(bond.coupon_rate, dec!(0.03));
    assert_eq!(bond.day_count, DayCountConvention::ActualActualBond);
    assert_eq!(bond.frequency, Frequency::Semiannual);
    assert_eq!(bond.face_value, dec!(100));

    let settlement = SettlementContext::for_bond(Date::from_ymd(2025, 6, 27).unwrap(), bond);
    let schedule = Schedule::generate(bond, settlement.settlement_date).unwrap();
    let pair = schedule.coupon_pair(settlement.settlement_date).unwrap();
    let accrued = AccruedInterestCalculator::for_bond(bond, pair, settlement.settlement_date).unwrap();
    assert!(accrued > dec!(1.1) && accrued < dec!(1.12));
}

#[test]
fn test_no_information_is_the_only_failure() {
    let resolver = ConventionResolver::new(as_of());
    assert_eq!(
        resolver.resolve(&Identifier::from_description("   "), 100.0),
        Err(ResolutionError::NoIdentifyingInformation)
    );
    let record = resolver
        .resolve(&Identifier::from_description("???"), 100.0)
        .unwrap();
    assert_eq!(record.confidence, Confidence::VeryLow);
}
