//! `points`: a single `Date,Value` CSV to per-year units.

use crate::{sibling_dir, write_units};
use anyhow::{bail, Context};
use log::info;
use lwl_core::header::ColumnAliases;
use lwl_core::reader::read_csv_file_strict;
use lwl_core::LevelError;
use lwl_data::bucket::{bucket_observations, parse_rows};
use lwl_data::writer::render_points_units;
use std::path::Path;

pub const DEFAULT_OUTPUT_DIR: &str = "years";

pub fn run_points(input: &Path, output_dir: Option<&Path>) -> anyhow::Result<()> {
    let rows = match read_csv_file_strict(input, &ColumnAliases::strict()) {
        Ok(rows) => rows,
        Err(LevelError::MissingHeader { .. }) => {
            bail!("CSV must have \"Date\" and \"Value\" columns.")
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", input.display())),
    };

    let parsed = parse_rows(&rows);
    let bucketed = bucket_observations(&parsed.observations);
    let units = render_points_units(&bucketed).context("Failed to render output units")?;

    let output_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| sibling_dir(input, DEFAULT_OUTPUT_DIR));
    write_units(&output_dir, &units)?;
    info!(
        "Wrote {} years from {} ({} rows dropped)",
        bucketed.series.len(),
        input.display(),
        parsed.dropped
    );
    Ok(())
}
