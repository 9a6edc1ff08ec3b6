//! CLI module tests.

use super::args::{Args, Command, RunOptions};
use super::commands::{resolve_config, run_simulation};
use super::output::{version_string, write_summary, HELP};
use crate::error::SimError;
use crate::visualization::{ExportFormat, Exporter};
use std::path::PathBuf;

fn run_options(args: &[&str]) -> RunOptions {
    match Args::parse_from(args.iter().copied()).command {
        Command::Run(options) => options,
        other => unreachable!("expected run, got {other:?}"),
    }
}

fn fast_config(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("fast.yaml");
    std::fs::write(
        &path,
        r"
scenarios:
  exponential:
    num_points: 500
  triangular:
    num_points: 1000
",
    )
    .unwrap();
    path
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_runs_defaults() {
    let args = Args::parse_from(["distsim"]);
    assert_eq!(args.command, Command::Run(RunOptions::default()));
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["distsim", flag]).command, Command::Help);
    }
    assert_eq!(
        Args::parse_from(["distsim", "run", "--help"]).command,
        Command::Help
    );
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        assert_eq!(
            Args::parse_from(["distsim", flag]).command,
            Command::Version
        );
    }
}

#[test]
fn test_parse_run_all_options() {
    let options = run_options(&[
        "distsim", "run", "--config", "a.yaml", "--seed", "7", "--json", "out.json", "--quiet",
    ]);
    assert_eq!(options.config_path, Some(PathBuf::from("a.yaml")));
    assert_eq!(options.seed_override, Some(7));
    assert_eq!(options.export_path, Some(PathBuf::from("out.json")));
    assert!(options.quiet);
}

#[test]
fn test_parse_options_without_run() {
    let options = run_options(&["distsim", "-s", "3", "-q"]);
    assert_eq!(options.seed_override, Some(3));
    assert!(options.quiet);
    assert_eq!(options.config_path, None);
}

#[test]
fn test_parse_invalid_seed() {
    let args = Args::parse_from(["distsim", "run", "--seed", "abc"]);
    assert!(matches!(args.command, Command::Usage(m) if m.contains("--seed")));
}

#[test]
fn test_parse_missing_values() {
    for flag in ["--seed", "--config", "--json"] {
        let args = Args::parse_from(["distsim", "run", flag]);
        assert!(matches!(args.command, Command::Usage(_)), "{flag}");
    }
}

#[test]
fn test_parse_unknown_command_and_option() {
    assert!(matches!(
        Args::parse_from(["distsim", "plot"]).command,
        Command::Usage(m) if m.contains("plot")
    ));
    assert!(matches!(
        Args::parse_from(["distsim", "run", "--fast"]).command,
        Command::Usage(m) if m.contains("--fast")
    ));
}

// ============================================================================
// Output tests
// ============================================================================

#[test]
fn test_version_string() {
    let version = version_string();
    assert!(version.starts_with("distsim "));
    assert!(version.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_mentions_options() {
    for needle in ["--config", "--seed", "--json", "--quiet", "RUST_LOG"] {
        assert!(HELP.contains(needle), "{needle}");
    }
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_resolve_config_overrides() {
    let options = RunOptions {
        seed_override: Some(99),
        export_path: Some(PathBuf::from("x.csv")),
        ..RunOptions::default()
    };
    let config = resolve_config(&options).unwrap();
    assert_eq!(config.reproducibility.seed, 99);
    assert_eq!(config.output.export_path, Some(PathBuf::from("x.csv")));
}

#[test]
fn test_resolve_config_missing_file() {
    let options = RunOptions {
        config_path: Some(PathBuf::from("/nonexistent/distsim.yaml")),
        ..RunOptions::default()
    };
    assert!(matches!(resolve_config(&options), Err(SimError::Io(_))));
}

#[test]
fn test_run_prints_progress_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        config_path: Some(fast_config(dir.path())),
        seed_override: Some(42),
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = Vec::new();
    let reports = run_simulation(&options, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(text.contains("Simulating Exponential Probability Distribution... done.\n"));
    assert!(text.contains("Simulating \"Triangular\" Probability Distribution... done.\n"));
    assert!(text.contains("Exponential Distribution\n========================\n"));
    assert!(text.contains("Arbitrary (Triangular) Distribution\n"));
    assert!(text.contains("Legend: Ideal Curve (ideal column), Simulation Results (bars)"));
}

#[test]
fn test_run_quiet_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        config_path: Some(fast_config(dir.path())),
        quiet: true,
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = Vec::new();
    let reports = run_simulation(&options, &mut out).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(out.is_empty());
}

#[test]
fn test_run_exports_panels() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("panels.jsonl");
    let options = RunOptions {
        config_path: Some(fast_config(dir.path())),
        export_path: Some(export.clone()),
        quiet: true,
        ..RunOptions::default()
    };
    run_simulation(&options, &mut std::io::sink()).unwrap();

    let panels = Exporter::new(ExportFormat::JsonLines).read(&export).unwrap();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0].title, "Exponential Distribution");
    assert_eq!(panels[1].histograms[0].series.len(), 20);
}

#[test]
fn test_run_same_seed_same_reports() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        config_path: Some(fast_config(dir.path())),
        seed_override: Some(5),
        quiet: true,
        ..RunOptions::default()
    };
    let a = run_simulation(&options, &mut std::io::sink()).unwrap();
    let b = run_simulation(&options, &mut std::io::sink()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_run_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "scenarios:\n  exponential:\n    lam: 0.0\n").unwrap();
    let options = RunOptions {
        config_path: Some(path),
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = Vec::new();
    assert!(run_simulation(&options, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_write_summary_lines() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        config_path: Some(fast_config(dir.path())),
        quiet: true,
        ..RunOptions::default()
    };
    let reports = run_simulation(&options, &mut std::io::sink()).unwrap();
    let mut out: Vec<u8> = Vec::new();
    write_summary(&mut out, &reports).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("Exponential Distribution: 24 buckets, 500 accepted"));
}
