use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use catena::{config::Config, orchestrator::BundleOrchestrator};

#[derive(Debug, Parser)]
#[command(
    name = "catena",
    version,
    about = "Concatenates the engine sources into one generated file"
)]
struct Args {
    /// Output file path, overriding the configured default
    output: Option<PathBuf>,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit the artifact to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::discover(args.config.as_deref())?;
    BundleOrchestrator::new(config).run(args.output.as_deref(), args.stdout)
}
