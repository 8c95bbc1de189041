//! `convert`: gauge CSV exports to per-year, average and index units.

use crate::{sibling_dir, write_units};
use anyhow::Context;
use log::{info, warn};
use lwl_core::header::ColumnAliases;
use lwl_data::operating_zone::OperatingZones;
use lwl_data::pipeline::{run_files, PipelineConfig, PipelineOutput};
use lwl_data::writer::{render_units, WriterOptions};
use lwl_utils::dates::day_of_year;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "formatted";

#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub date_aliases: Vec<String>,
    pub value_aliases: Vec<String>,
    pub zones: bool,
    pub colors: bool,
}

impl ConvertArgs {
    fn output_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        let first = self.inputs.first().context("No input files given")?;
        Ok(sibling_dir(first, DEFAULT_OUTPUT_DIR))
    }

    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            aliases: ColumnAliases::default()
                .with_extra(self.date_aliases.clone(), self.value_aliases.clone()),
        }
    }
}

/// Read every input, compute all units, then write them.
///
/// Nothing is written unless every input was read and every unit rendered.
pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let output_dir = args.output_dir()?;
    info!(
        "Converting {} file(s) into {}",
        args.inputs.len(),
        output_dir.display()
    );

    let output = run_files(&args.inputs, &args.pipeline_config())
        .context("Failed to read input CSV files")?;
    if output.valid_rows == 0 {
        warn!("No valid rows found in the inputs");
    }

    let options = WriterOptions {
        zones: args.zones,
        colors: args.colors,
    };
    let units = render_units(&output, &options).context("Failed to render output units")?;
    if args.zones {
        log_current_zone(&output)?;
    }

    write_units(&output_dir, &units)?;
    info!(
        "Done: {} years, {} valid rows, {} rows dropped",
        output.bucketed.series.len(),
        output.valid_rows,
        output.dropped_rows
    );
    Ok(())
}

fn log_current_zone(output: &PipelineOutput) -> anyhow::Result<()> {
    let (Some(date), Some(value)) = (output.status.last_date, output.status.current_value) else {
        return Ok(());
    };
    let zones = OperatingZones::builtin().context("Failed to load operating zones")?;
    let zone = zones.classify(day_of_year(&date.date_naive()), value);
    info!("Latest reading {} on {} is in zone {:?}", value, date.date_naive(), zone);
    Ok(())
}
