//! distsim CLI
//!
//! Runs the exponential and triangular scenarios and prints their
//! histograms next to the ideal densities.

use std::process::ExitCode;

use distsim::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    run_cli(Args::parse())
}
