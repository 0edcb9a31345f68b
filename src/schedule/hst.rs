//! HST ("days after planting") date conversion.
//!
//! Every activity date in a cultivation plan is anchored to a single
//! planting date (HST 0). These helpers map between relative day offsets
//! and absolute calendar dates. All arithmetic happens on [`NaiveDate`],
//! so there is no timezone or daylight-saving component to guard against:
//! the round trip is exact by construction.

use chrono::{Duration, NaiveDate};

use crate::errors::ServiceError;

/// Parses a `YYYY-MM-DD` planting date.
pub fn parse_planting_date(input: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ServiceError::InvalidDate(format!("not a calendar date: {input:?}")))
}

/// Returns `planting + offset_days` calendar days. Negative offsets land
/// before the planting date.
pub fn date_from_offset(planting: NaiveDate, offset_days: i64) -> NaiveDate {
    planting + Duration::days(offset_days)
}

/// Inverse of [`date_from_offset`]: the signed number of whole calendar
/// days from `planting` to `date`.
pub fn offset_from_date(planting: NaiveDate, date: NaiveDate) -> i64 {
    (date - planting).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn offset_zero_is_planting_day() {
        assert_eq!(date_from_offset(d(2025, 12, 1), 0), d(2025, 12, 1));
    }

    #[test]
    fn negative_offsets_fall_before_planting() {
        assert_eq!(date_from_offset(d(2025, 12, 1), -30), d(2025, 11, 1));
        assert_eq!(date_from_offset(d(2025, 12, 1), -1), d(2025, 11, 30));
    }

    #[test]
    fn offsets_cross_month_and_year_boundaries() {
        assert_eq!(date_from_offset(d(2025, 12, 1), 100), d(2026, 3, 11));
        assert_eq!(offset_from_date(d(2025, 12, 1), d(2026, 3, 11)), 100);
    }

    #[test]
    fn leap_day_is_counted() {
        // 2024 is a leap year; the window spans Feb 29.
        assert_eq!(offset_from_date(d(2024, 2, 1), d(2024, 3, 1)), 29);
        assert_eq!(date_from_offset(d(2024, 2, 28), 1), d(2024, 2, 29));
    }

    #[test]
    fn bad_input_is_an_invalid_date_error() {
        assert_matches!(
            parse_planting_date("01-12-2025"),
            Err(ServiceError::InvalidDate(_))
        );
        assert_matches!(
            parse_planting_date("2025-13-40"),
            Err(ServiceError::InvalidDate(_))
        );
    }

    #[test]
    fn parse_accepts_iso_dates() {
        assert_eq!(parse_planting_date("2025-12-01").unwrap(), d(2025, 12, 1));
    }
}
