//! Shared utility functions for LWL crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact export format)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y%m%d")?)
    }

    /// Zero-based day of the calendar year: Jan 1 = 0, Dec 31 = 364 (365 in leap years).
    pub fn day_of_year(date: &NaiveDate) -> u32 {
        date.ordinal0()
    }

    /// Inverse of [`day_of_year`]. Returns `None` when `day` is past the end of `year`.
    pub fn date_from_day_of_year(year: i32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(year, day + 1)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_day_of_year() {
            let jan1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            assert_eq!(day_of_year(&jan1), 0);

            let feb1 = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
            assert_eq!(day_of_year(&feb1), 31);

            let dec31 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
            assert_eq!(day_of_year(&dec31), 364);

            let leap_dec31 = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
            assert_eq!(day_of_year(&leap_dec31), 365);
        }

        #[test]
        fn test_date_from_day_of_year() {
            assert_eq!(
                date_from_day_of_year(2024, 59),
                NaiveDate::from_ymd_opt(2024, 2, 29)
            );
            assert_eq!(
                date_from_day_of_year(2023, 59),
                NaiveDate::from_ymd_opt(2023, 3, 1)
            );
            assert_eq!(date_from_day_of_year(2023, 365), None);
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
            assert_eq!(parse_date_compact("20230615").unwrap(), date);
            assert!(parse_date("2023-13-01").is_err());
        }
    }
}

/// Numeric helpers shared by the aggregation and status code.
pub mod numbers {
    /// Round to two decimal places.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Percent difference of `current` relative to `reference`, rounded to two decimals.
    ///
    /// Returns `None` unless `reference` is finite and nonzero, so callers never
    /// see `inf` or `NaN`.
    pub fn percent_difference(current: f64, reference: f64) -> Option<f64> {
        if !reference.is_finite() || reference == 0.0 || !current.is_finite() {
            return None;
        }
        Some(round2((current - reference) / reference * 100.0))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round2() {
            assert_eq!(round2(10.0), 10.0);
            assert_eq!(round2(1.234), 1.23);
            assert_eq!(round2(-1.236), -1.24);
        }

        #[test]
        fn test_percent_difference() {
            assert_eq!(percent_difference(10.0, 8.0), Some(25.0));
            assert_eq!(percent_difference(6.0, 8.0), Some(-25.0));
            assert_eq!(percent_difference(10.0, 3.0), Some(233.33));
        }

        #[test]
        fn test_percent_difference_guards() {
            assert_eq!(percent_difference(10.0, 0.0), None);
            assert_eq!(percent_difference(10.0, f64::NAN), None);
            assert_eq!(percent_difference(10.0, f64::INFINITY), None);
        }
    }
}
