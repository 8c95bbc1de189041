//! Parse raw rows and group the readings by calendar year.

use log::debug;
use lwl_core::observation::{Observation, RawRow};
use lwl_core::yearly_series::{SortYearlySeries, YearlySeries};
use std::collections::BTreeMap;

/// Readings that parsed, plus how many rows did not.
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub observations: Vec<Observation>,
    pub dropped: usize,
}

/// Parse every row, silently dropping the ones with a bad date or value.
///
/// Exports routinely contain blank cells and status codes in the value
/// column, so a bad row is counted rather than reported as an error.
pub fn parse_rows(rows: &[RawRow]) -> ParsedRows {
    let mut parsed = ParsedRows::default();
    for row in rows {
        match Observation::try_from(row) {
            Ok(obs) => parsed.observations.push(obs),
            Err(e) => {
                debug!("Dropping row {:?}: {}", row, e);
                parsed.dropped += 1;
            }
        }
    }
    parsed
}

/// Readings grouped per year, most recent year first.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedYears {
    pub series: Vec<YearlySeries>,
    /// `None` when there are no readings at all.
    pub global_min: Option<f64>,
    pub global_max: Option<f64>,
}

impl BucketedYears {
    /// Years in descending order.
    pub fn years(&self) -> Vec<i32> {
        self.series.years()
    }

    /// Total number of points across every year.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(YearlySeries::len).sum()
    }

    pub fn get(&self, year: i32) -> Option<&YearlySeries> {
        self.series.iter().find(|series| series.year == year)
    }
}

/// Bucket readings by UTC calendar year, keeping input order within a year.
pub fn bucket_observations(observations: &[Observation]) -> BucketedYears {
    let mut by_year: BTreeMap<i32, YearlySeries> = BTreeMap::new();
    let mut global_min: Option<f64> = None;
    let mut global_max: Option<f64> = None;

    for obs in observations {
        let (year, day) = obs.year_day();
        by_year
            .entry(year)
            .or_insert_with(|| YearlySeries::new(year))
            .push(day, obs.value);
        global_min = Some(global_min.map_or(obs.value, |m| m.min(obs.value)));
        global_max = Some(global_max.map_or(obs.value, |m| m.max(obs.value)));
    }

    let mut series: Vec<YearlySeries> = by_year.into_values().collect();
    series.sort_by_most_recent();
    BucketedYears {
        series,
        global_min,
        global_max,
    }
}
