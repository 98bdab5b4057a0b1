//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Fetch the DriveBC traffic event and ferry feeds and write them as KML
///
/// Runs one fetch-transform-write cycle and exits. Intended to be invoked
/// periodically by an external scheduler.
#[derive(Debug, Parser)]
#[command(name = "drivebc-kml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ./drivebc-kml.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file, overriding the configured path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
