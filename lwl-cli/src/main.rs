//! LWL CLI - Command line tool for turning lake water level CSV exports into chart data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "lwl-cli",
    version,
    about = "Lake water level data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: lwl_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    lwl_cmd::run(cli.command)
}
