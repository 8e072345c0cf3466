use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

mod commands;
mod config;
mod error;

use config::RunConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "slcsp")]
#[command(about = "Second lowest cost silver plan rate for each ZIP code in a target list")]
#[command(version)]
struct Cli {
    /// Plan catalog (state, rate_area, metal_level, rate)
    #[arg(long, default_value = "plans.csv")]
    plans: PathBuf,

    /// ZIP to rate area mapping (zipcode, state, rate_area)
    #[arg(long, default_value = "zips.csv")]
    zips: PathBuf,

    /// Target ZIP codes (zipcode, rate)
    #[arg(long, default_value = "slcsp.csv")]
    slcsp: PathBuf,

    /// Output file [default: the target list, rewritten in place; "-" for stdout]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = RunConfig::new(cli.plans, cli.zips, cli.slcsp, cli.output)?;
    commands::resolve::execute(config)
}
