//! One pass over the inputs: parse, bucket, aggregate, summarise.

use crate::aggregate::{aggregate_days, DailyAggregate};
use crate::bucket::{bucket_observations, parse_rows, BucketedYears};
use crate::status::StatusSummary;
use log::info;
use lwl_core::header::ColumnAliases;
use lwl_core::observation::RawRow;
use lwl_core::reader::read_csv_files;
use std::path::Path;

/// Settings for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub aliases: ColumnAliases,
}

/// Everything the writer needs, computed in full before anything is written.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub bucketed: BucketedYears,
    pub aggregates: Vec<DailyAggregate>,
    pub status: StatusSummary,
    pub valid_rows: usize,
    pub dropped_rows: usize,
}

/// Run the pipeline over rows already read from the inputs.
pub fn run_rows(rows: &[RawRow]) -> PipelineOutput {
    let parsed = parse_rows(rows);
    let bucketed = bucket_observations(&parsed.observations);
    let aggregates = aggregate_days(&bucketed.series);
    let status = StatusSummary::compute(&parsed.observations, &bucketed.series, &aggregates);

    info!(
        "Bucketed {} points in {} years ({} rows dropped)",
        bucketed.point_count(),
        bucketed.series.len(),
        parsed.dropped
    );

    PipelineOutput {
        valid_rows: parsed.observations.len(),
        dropped_rows: parsed.dropped,
        bucketed,
        aggregates,
        status,
    }
}

/// Read the CSV files in order and run the pipeline over their rows.
pub fn run_files<P: AsRef<Path>>(
    paths: &[P],
    config: &PipelineConfig,
) -> lwl_core::Result<PipelineOutput> {
    let rows = read_csv_files(paths, &config.aliases)?;
    Ok(run_rows(&rows))
}
