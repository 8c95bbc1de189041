//! Command implementations for the LWL CLI.
//!
//! Provides subcommands that convert lake gauge CSV exports into the JSON
//! units read by the charts.

use anyhow::Context;
use clap::Subcommand;
use log::info;
use lwl_data::writer::OutputUnit;
use std::path::{Path, PathBuf};

pub mod convert;
pub mod points;

#[derive(Subcommand)]
pub enum Command {
    /// Convert one or more gauge CSV exports into per-year, average and index units
    Convert {
        /// CSV files, read in the order given
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: `formatted` next to the first input)
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,

        /// Extra accepted name for the date column (repeatable)
        #[arg(long)]
        date_alias: Vec<String>,

        /// Extra accepted name for the value column (repeatable)
        #[arg(long)]
        value_alias: Vec<String>,

        /// Also write the operating zone bands
        #[arg(long)]
        zones: bool,

        /// Also write per-year line colors for light and dark backgrounds
        #[arg(long)]
        colors: bool,
    },

    /// Convert a single `Date,Value` CSV into per-year units
    Points {
        /// CSV file whose first line is exactly a `Date,Value` header
        input: PathBuf,

        /// Output directory (default: `years` next to the input)
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            inputs,
            output_dir,
            date_alias,
            value_alias,
            zones,
            colors,
        } => convert::run_convert(&convert::ConvertArgs {
            inputs,
            output_dir,
            date_aliases: date_alias,
            value_aliases: value_alias,
            zones,
            colors,
        }),
        Command::Points { input, output_dir } => {
            points::run_points(&input, output_dir.as_deref())
        }
    }
}

/// Write rendered units into `dir`, creating it first.
pub(crate) fn write_units(dir: &Path, units: &[OutputUnit]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    for unit in units {
        let path = dir.join(&unit.file_name);
        std::fs::write(&path, &unit.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Directory `name` next to `input`.
pub(crate) fn sibling_dir(input: &Path, name: &str) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(name)
}
