//! Render pipeline results as JSON data units.
//!
//! Rendering is pure: it returns file names and contents and never touches the
//! filesystem, so a failed run leaves the previous output untouched. The same
//! input always renders to the same bytes (ordered maps, fixed field order).
//!
//! Units:
//! - `<year>.json` for every year with data
//! - `average.json` with the cross-year daily line
//! - `index.json` with the year registry, global extremes and current status
//! - `zones.json` / `colors.json` when requested

use crate::aggregate::AggregateLine;
use crate::bucket::BucketedYears;
use crate::operating_zone::{area_data, AreaPoint, OperatingZones};
use crate::palette::{contrast_palette, year_colors, DARK_BACKGROUND, DEFAULT_PALETTE, LIGHT_BACKGROUND};
use crate::pipeline::PipelineOutput;
use crate::selection::initial_selection;
use crate::status::StatusSummary;
use lwl_core::yearly_series::{Point, YearlySeries};
use lwl_core::Result;
use lwl_utils::dates::format_date;
use serde::Serialize;
use std::collections::BTreeMap;

pub const AVERAGE_FILE: &str = "average.json";
pub const INDEX_FILE: &str = "index.json";
pub const ZONES_FILE: &str = "zones.json";
pub const COLORS_FILE: &str = "colors.json";

/// A rendered file: name relative to the output directory, and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub file_name: String,
    pub contents: String,
}

/// Optional extra units.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterOptions {
    pub zones: bool,
    pub colors: bool,
}

pub fn year_file_name(year: i32) -> String {
    format!("{year}.json")
}

#[derive(Serialize)]
struct YearUnit {
    year: i32,
    min: f64,
    max: f64,
    line: Vec<Point>,
}

impl From<&YearlySeries> for YearUnit {
    fn from(series: &YearlySeries) -> Self {
        YearUnit {
            year: series.year,
            min: series.min,
            max: series.max,
            line: series.sorted_line(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AverageUnit {
    min: Option<f64>,
    max: Option<f64>,
    line: Vec<Point>,
    min_line: Vec<Point>,
    max_line: Vec<Point>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUnit {
    last_updated_date: Option<String>,
    current_value: Option<f64>,
    historical_min_on_day: Option<f64>,
    historical_max_on_day: Option<f64>,
    historical_avg_on_day: Option<f64>,
    percent_difference_to_average: Option<f64>,
    percent_difference_to_min: Option<f64>,
    percent_difference_to_max: Option<f64>,
    min_date_on_day: Option<String>,
    max_date_on_day: Option<String>,
}

impl From<&StatusSummary> for StatusUnit {
    fn from(status: &StatusSummary) -> Self {
        StatusUnit {
            last_updated_date: status.last_date.map(|d| format_date(&d.date_naive())),
            current_value: status.current_value,
            historical_min_on_day: status.historical_min_on_day,
            historical_max_on_day: status.historical_max_on_day,
            historical_avg_on_day: status.historical_avg_on_day,
            percent_difference_to_average: status.percent_diff_to_avg,
            percent_difference_to_min: status.percent_diff_to_min,
            percent_difference_to_max: status.percent_diff_to_max,
            min_date_on_day: status.min_date_on_day.as_ref().map(format_date),
            max_date_on_day: status.max_date_on_day.as_ref().map(format_date),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexUnit {
    years: Vec<i32>,
    year_files: BTreeMap<i32, String>,
    default_selection: Vec<i32>,
    global_min: Option<f64>,
    global_max: Option<f64>,
    valid_rows: usize,
    dropped_rows: usize,
    status: StatusUnit,
}

/// Index written by the single-file converter: no aggregate, no status.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PointsIndexUnit {
    years: Vec<i32>,
    year_files: BTreeMap<i32, String>,
    global_min: Option<f64>,
    global_max: Option<f64>,
}

#[derive(Serialize)]
struct ZonesUnit {
    upper: Vec<AreaPoint>,
    normal: Vec<AreaPoint>,
    lower: Vec<AreaPoint>,
}

#[derive(Serialize)]
struct ColorsUnit {
    light: BTreeMap<i32, String>,
    dark: BTreeMap<i32, String>,
}

fn unit<T: Serialize>(file_name: impl Into<String>, value: &T) -> Result<OutputUnit> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    Ok(OutputUnit {
        file_name: file_name.into(),
        contents,
    })
}

fn year_units(bucketed: &BucketedYears) -> Result<Vec<OutputUnit>> {
    bucketed
        .series
        .iter()
        .map(|series| unit(year_file_name(series.year), &YearUnit::from(series)))
        .collect()
}

fn year_files(years: &[i32]) -> BTreeMap<i32, String> {
    years.iter().map(|y| (*y, year_file_name(*y))).collect()
}

/// Render every unit of a pipeline run.
pub fn render_units(output: &PipelineOutput, options: &WriterOptions) -> Result<Vec<OutputUnit>> {
    let years = output.bucketed.years();
    let mut units = year_units(&output.bucketed)?;

    let aggregates = output.aggregates.as_slice();
    let (avg_min, avg_max) = aggregates.average_extremes();
    units.push(unit(
        AVERAGE_FILE,
        &AverageUnit {
            min: avg_min,
            max: avg_max,
            line: aggregates.average_line(),
            min_line: aggregates.min_line(),
            max_line: aggregates.max_line(),
        },
    )?);

    units.push(unit(
        INDEX_FILE,
        &IndexUnit {
            year_files: year_files(&years),
            default_selection: initial_selection(None, &years),
            global_min: output.bucketed.global_min,
            global_max: output.bucketed.global_max,
            valid_rows: output.valid_rows,
            dropped_rows: output.dropped_rows,
            status: StatusUnit::from(&output.status),
            years: years.clone(),
        },
    )?);

    if options.zones {
        let zones = OperatingZones::builtin()?;
        units.push(unit(
            ZONES_FILE,
            &ZonesUnit {
                upper: area_data(&zones.upper),
                normal: area_data(&zones.normal),
                lower: area_data(&zones.lower),
            },
        )?);
    }

    if options.colors {
        let light = contrast_palette(DEFAULT_PALETTE, LIGHT_BACKGROUND)?;
        let dark = contrast_palette(DEFAULT_PALETTE, DARK_BACKGROUND)?;
        units.push(unit(
            COLORS_FILE,
            &ColorsUnit {
                light: year_colors(&years, &light),
                dark: year_colors(&years, &dark),
            },
        )?);
    }

    Ok(units)
}

/// Render the per-year units and a minimal index (single-file converter).
pub fn render_points_units(bucketed: &BucketedYears) -> Result<Vec<OutputUnit>> {
    let years = bucketed.years();
    let mut units = year_units(bucketed)?;
    units.push(unit(
        INDEX_FILE,
        &PointsIndexUnit {
            year_files: year_files(&years),
            global_min: bucketed.global_min,
            global_max: bucketed.global_max,
            years,
        },
    )?);
    Ok(units)
}
