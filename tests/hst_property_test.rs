//! Round-trip law for the HST date converter.

use agriops_api::schedule::hst::{date_from_offset, offset_from_date, parse_planting_date};
use chrono::NaiveDate;
use proptest::prelude::*;
use test_case::test_case;

proptest! {
    /// offset_from_date(p, date_from_offset(p, n)) == n for all valid
    /// planting dates and offsets in [-200, 200].
    #[test]
    fn round_trip_is_exact(
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        offset in -200i64..=200,
    ) {
        let planting = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let date = date_from_offset(planting, offset);
        prop_assert_eq!(offset_from_date(planting, date), offset);
    }

    /// The law holds well beyond the season-length window too.
    #[test]
    fn round_trip_holds_for_large_offsets(offset in -100_000i64..=100_000) {
        let planting = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let date = date_from_offset(planting, offset);
        prop_assert_eq!(offset_from_date(planting, date), offset);
    }

    /// Converting is monotonic: a later offset is a later date.
    #[test]
    fn larger_offsets_are_later_dates(a in -200i64..=200, b in -200i64..=200) {
        let planting = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        prop_assert_eq!(
            a.cmp(&b),
            date_from_offset(planting, a).cmp(&date_from_offset(planting, b))
        );
    }
}

#[test_case(-30, 2025, 11, 1 ; "a month before planting")]
#[test_case(-1, 2025, 11, 30 ; "the day before planting")]
#[test_case(0, 2025, 12, 1 ; "planting day itself")]
#[test_case(110, 2026, 3, 21 ; "end of the harvest window")]
fn known_offsets_map_to_known_dates(offset: i64, y: i32, m: u32, d: u32) {
    let planting = parse_planting_date("2025-12-01").unwrap();
    assert_eq!(
        date_from_offset(planting, offset),
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    );
}

#[test]
fn unparseable_planting_date_is_rejected() {
    assert!(parse_planting_date("December 1st, 2025").is_err());
    assert!(parse_planting_date("").is_err());
}
