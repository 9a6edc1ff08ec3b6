//! CLI output formatting.

use std::io::Write;

use crate::scenarios::ScenarioReport;

/// Version string with the git revision baked in at build time.
#[must_use]
pub fn version_string() -> String {
    format!(
        "distsim {} ({})",
        env!("DISTSIM_VERSION"),
        env!("DISTSIM_GIT_HASH")
    )
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Help text.
pub const HELP: &str = r"distsim - Monte Carlo histograms of non-uniform distributions

USAGE:
    distsim [run] [OPTIONS]
    distsim help
    distsim version

OPTIONS:
    -c, --config <FILE>     Load settings from a YAML file
    -s, --seed <N>          Override the master seed
    -o, --json <FILE>       Export recorded panels (.json, .jsonl, or .csv)
    -q, --quiet             Skip progress lines and the text chart
    -h, --help              Show this help message

SCENARIOS:
    Exponential Distribution             lam = 30 over [0, 120), 24 buckets
    Arbitrary (Triangular) Distribution  2 - 2x over [0, 1), 20 buckets

ENVIRONMENT:
    RUST_LOG    Log filter (default: warn), e.g. RUST_LOG=distsim=debug

EXAMPLES:
    distsim
    distsim run --seed 7 --json panels.json
    distsim --config distsim.yaml --quiet
";

/// Print help message.
pub fn print_help() {
    print!("{HELP}");
}

/// Write one summary line per scenario.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_summary<W: Write + ?Sized>(
    out: &mut W,
    reports: &[ScenarioReport],
) -> std::io::Result<()> {
    for report in reports {
        writeln!(
            out,
            "{}: {} buckets, {} accepted, {} redrawn, max |density - ideal| = {:.5}",
            report.title,
            report.histogram.len(),
            report.histogram.accepted(),
            report.histogram.rejected(),
            report.max_deviation
        )?;
    }
    Ok(())
}
