//! Where the latest reading stands against the same day in earlier years.

use crate::aggregate::{AggregateLine, DailyAggregate};
use chrono::{DateTime, NaiveDate, Utc};
use lwl_core::observation::Observation;
use lwl_core::yearly_series::YearlySeries;
use lwl_utils::dates::date_from_day_of_year;
use lwl_utils::numbers::percent_difference;

/// Status of the most recent reading.
///
/// Every field is `None` when it cannot be computed (no readings, or no earlier
/// year with a reading on the same day); a missing reference never turns into 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusSummary {
    pub last_date: Option<DateTime<Utc>>,
    pub current_value: Option<f64>,
    pub historical_min_on_day: Option<f64>,
    pub historical_max_on_day: Option<f64>,
    /// Taken from the daily aggregate, so it includes the current year.
    pub historical_avg_on_day: Option<f64>,
    pub percent_diff_to_avg: Option<f64>,
    pub percent_diff_to_min: Option<f64>,
    pub percent_diff_to_max: Option<f64>,
    pub min_date_on_day: Option<NaiveDate>,
    pub max_date_on_day: Option<NaiveDate>,
}

/// Latest reading by timestamp. On equal timestamps the last one in input order wins.
pub fn most_recent(observations: &[Observation]) -> Option<&Observation> {
    observations
        .iter()
        .fold(None, |latest: Option<&Observation>, obs| match latest {
            Some(l) if l.date > obs.date => Some(l),
            _ => Some(obs),
        })
}

/// Extreme value on one day across earlier years, with the date it was recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DayExtreme {
    value: f64,
    date: Option<NaiveDate>,
}

/// Min and max on `day` over every year except `skip_year`.
///
/// Years are visited oldest first and only a strictly better value replaces the
/// current extreme, so ties keep the earliest year.
fn historical_extremes(
    series: &[YearlySeries],
    day: u32,
    skip_year: i32,
) -> Option<(DayExtreme, DayExtreme)> {
    let mut years: Vec<&YearlySeries> = series.iter().filter(|s| s.year != skip_year).collect();
    years.sort_by_key(|s| s.year);

    let mut extremes: Option<(DayExtreme, DayExtreme)> = None;
    for year in years {
        for value in year.values_on_day(day) {
            let candidate = DayExtreme {
                value,
                date: date_from_day_of_year(year.year, day),
            };
            extremes = Some(match extremes {
                None => (candidate, candidate),
                Some((min, max)) => (
                    if value < min.value { candidate } else { min },
                    if value > max.value { candidate } else { max },
                ),
            });
        }
    }
    extremes
}

impl StatusSummary {
    pub fn compute(
        observations: &[Observation],
        series: &[YearlySeries],
        aggregates: &[DailyAggregate],
    ) -> StatusSummary {
        let Some(latest) = most_recent(observations) else {
            return StatusSummary::default();
        };
        let (year, day) = latest.year_day();
        let current = latest.value;

        let extremes = historical_extremes(series, day, year);
        let historical_min_on_day = extremes.map(|(min, _)| min.value);
        let historical_max_on_day = extremes.map(|(_, max)| max.value);
        let historical_avg_on_day = aggregates.on_day(day).map(|agg| agg.average);

        StatusSummary {
            last_date: Some(latest.date),
            current_value: Some(current),
            historical_min_on_day,
            historical_max_on_day,
            historical_avg_on_day,
            percent_diff_to_avg: historical_avg_on_day.and_then(|avg| percent_difference(current, avg)),
            percent_diff_to_min: historical_min_on_day.and_then(|min| percent_difference(current, min)),
            percent_diff_to_max: historical_max_on_day.and_then(|max| percent_difference(current, max)),
            min_date_on_day: extremes.and_then(|(min, _)| min.date),
            max_date_on_day: extremes.and_then(|(_, max)| max.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{most_recent, StatusSummary};
    use crate::aggregate::{aggregate_days, DailyAggregate};
    use crate::bucket::{bucket_observations, parse_rows};
    use chrono::NaiveDate;
    use lwl_core::observation::{Observation, RawRow};
    use lwl_core::yearly_series::YearlySeries;

    fn observations(data: &[(&str, &str)]) -> Vec<Observation> {
        let rows: Vec<RawRow> = data.iter().map(|(d, v)| RawRow::new(*d, *v)).collect();
        parse_rows(&rows).observations
    }

    fn summarize(obs: &[Observation]) -> StatusSummary {
        let bucketed = bucket_observations(obs);
        let aggs = aggregate_days(&bucketed.series);
        StatusSummary::compute(obs, &bucketed.series, &aggs)
    }

    #[test]
    fn test_percent_diff_to_average() {
        let obs = observations(&[("2024-03-01", "10")]);
        let mut series = YearlySeries::new(2024);
        series.push(60, 10.0);
        let aggs = vec![DailyAggregate {
            day: 60,
            average: 8.0,
            min: 6.0,
            max: 10.0,
        }];
        let status = StatusSummary::compute(&obs, &[series], &aggs);
        assert_eq!(status.historical_avg_on_day, Some(8.0));
        assert_eq!(status.percent_diff_to_avg, Some(25.0));
    }

    #[test]
    fn test_history_excludes_current_year() {
        let obs = observations(&[
            ("2022-07-01", "9.0"),
            ("2023-07-01", "8.0"),
            ("2024-06-30", "20.0"),
            ("2024-07-01", "10.0"),
        ]);
        // 2024 is a leap year: Jul 1 is day 182; in 2023 day 182 is Jul 2
        let obs = [
            obs,
            observations(&[("2023-07-02", "8.0"), ("2022-07-02", "9.0")]),
        ]
        .concat();
        let status = summarize(&obs);
        assert_eq!(status.current_value, Some(10.0));
        assert_eq!(status.historical_min_on_day, Some(8.0));
        assert_eq!(status.historical_max_on_day, Some(9.0));
        assert_eq!(status.min_date_on_day, NaiveDate::from_ymd_opt(2023, 7, 2));
        assert_eq!(status.max_date_on_day, NaiveDate::from_ymd_opt(2022, 7, 2));
        assert_eq!(status.percent_diff_to_min, Some(25.0));
        assert_eq!(status.percent_diff_to_max, Some(11.11));
        // the average includes the current year's reading: (10 + 8 + 9) / 3
        assert_eq!(status.historical_avg_on_day, Some(9.0));
        assert_eq!(status.percent_diff_to_avg, Some(11.11));
    }

    #[test]
    fn test_first_year_has_no_history() {
        let obs = observations(&[("2024-01-01", "10.0"), ("2024-01-02", "12.0")]);
        let status = summarize(&obs);
        assert_eq!(status.current_value, Some(12.0));
        assert_eq!(status.historical_min_on_day, None);
        assert_eq!(status.historical_max_on_day, None);
        assert_eq!(status.percent_diff_to_min, None);
        assert_eq!(status.percent_diff_to_max, None);
        assert_eq!(status.min_date_on_day, None);
        // the day's own reading is the average
        assert_eq!(status.percent_diff_to_avg, Some(0.0));
    }

    #[test]
    fn test_zero_reference_has_no_percent() {
        let obs = observations(&[("2023-05-01", "0"), ("2024-05-01", "4")]);
        // 2023-05-01 is day 120, 2024-05-01 is day 121; align the days
        let obs = [obs, observations(&[("2023-05-02", "0")])].concat();
        let status = summarize(&obs);
        assert_eq!(status.historical_min_on_day, Some(0.0));
        assert_eq!(status.percent_diff_to_min, None);
        assert_eq!(status.percent_diff_to_max, None);
        // average of 4 (2024) and 0 (2023) is 2
        assert_eq!(status.percent_diff_to_avg, Some(100.0));
    }

    #[test]
    fn test_ties_keep_earliest_year() {
        let obs = observations(&[
            ("2021-01-10", "5.0"),
            ("2022-01-10", "5.0"),
            ("2023-01-10", "7.0"),
            ("2024-01-10", "6.0"),
        ]);
        let status = summarize(&obs);
        assert_eq!(status.min_date_on_day, NaiveDate::from_ymd_opt(2021, 1, 10));
        assert_eq!(status.max_date_on_day, NaiveDate::from_ymd_opt(2023, 1, 10));
    }

    #[test]
    fn test_most_recent_last_row_wins() {
        let obs = observations(&[
            ("2024-02-01", "1.0"),
            ("2024-03-01", "2.0"),
            ("2024-01-01", "3.0"),
            ("2024-03-01", "4.0"),
        ]);
        assert_eq!(most_recent(&obs).unwrap().value, 4.0);
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_no_observations() {
        assert_eq!(summarize(&[]), StatusSummary::default());
    }
}
