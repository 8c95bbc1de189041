//! Cross-year statistics per day of year.

use lwl_core::yearly_series::{Point, YearlySeries};
use lwl_utils::numbers::round2;
use std::collections::BTreeMap;

/// Average, minimum and maximum of every reading taken on `day` in any year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAggregate {
    pub day: u32,
    /// Mean rounded to two decimals, then clamped to `[min, max]`.
    ///
    /// The clamp wins over the rounding: two readings of 9.111 average to
    /// 9.111, not 9.11.
    pub average: f64,
    /// Unrounded; [`AggregateLine::min_line`] rounds for output.
    pub min: f64,
    pub max: f64,
}

/// One aggregate per day that has at least one reading, ascending by day.
///
/// Days with no readings in any year are absent; nothing is interpolated here.
pub fn aggregate_days(series: &[YearlySeries]) -> Vec<DailyAggregate> {
    let mut day_values: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for year in series {
        for &(day, value) in &year.line {
            day_values.entry(day).or_default().push(value);
        }
    }

    day_values
        .into_iter()
        .map(|(day, values)| {
            let sum: f64 = values.iter().sum();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            // rounding must not push the mean outside [min, max]
            let average = round2(sum / values.len() as f64).clamp(min, max);
            DailyAggregate {
                day,
                average,
                min,
                max,
            }
        })
        .collect()
}

/// Lookup helpers over an aggregate line.
pub trait AggregateLine {
    fn on_day(&self, day: u32) -> Option<&DailyAggregate>;
    fn average_line(&self) -> Vec<Point>;
    fn min_line(&self) -> Vec<Point>;
    fn max_line(&self) -> Vec<Point>;
    /// Lowest and highest value of the average line.
    fn average_extremes(&self) -> (Option<f64>, Option<f64>);
}

impl AggregateLine for [DailyAggregate] {
    fn on_day(&self, day: u32) -> Option<&DailyAggregate> {
        self.binary_search_by_key(&day, |agg| agg.day)
            .ok()
            .map(|idx| &self[idx])
    }

    fn average_line(&self) -> Vec<Point> {
        self.iter().map(|agg| (agg.day, agg.average)).collect()
    }

    fn min_line(&self) -> Vec<Point> {
        self.iter().map(|agg| (agg.day, round2(agg.min))).collect()
    }

    fn max_line(&self) -> Vec<Point> {
        self.iter().map(|agg| (agg.day, round2(agg.max))).collect()
    }

    fn average_extremes(&self) -> (Option<f64>, Option<f64>) {
        let min = self.iter().map(|agg| agg.average).reduce(f64::min);
        let max = self.iter().map(|agg| agg.average).reduce(f64::max);
        (min, max)
    }
}
