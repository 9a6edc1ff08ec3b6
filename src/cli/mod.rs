//! Command-line driver.
//!
//! `main.rs` only installs logging and calls [`run_cli`]; everything else
//! lives here so it can be tested.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{resolve_config, run_cli, run_simulation};
pub use output::{print_help, print_version, version_string, write_summary, HELP};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
