//! Command-line interface of the replay binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "takeoffkit",
    about = "Replay a scripted drawing session and print its quantity takeoff",
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
pub struct Cli {
    /// Configuration file (JSON or TOML); defaults to the platform config directory
    #[arg(long, env = "TAKEOFFKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session script to replay
    pub session: PathBuf,
}
