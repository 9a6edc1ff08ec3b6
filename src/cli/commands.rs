//! CLI command handlers.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use super::output::{print_help, print_version, write_summary};
use super::{Args, Command, RunOptions};
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::scenarios::{schedule, ScenarioReport};
use crate::visualization::{ExportFormat, Exporter, FigureRecorder, Panel, Tee, TextRenderer};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(options) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match run_simulation(&options, &mut out) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "simulation failed");
                    eprintln!("Error: {e}");
                    ExitCode::from(1)
                }
            }
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::Usage(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            ExitCode::from(2)
        }
    }
}

/// Resolve the configuration for a run: file (or defaults) plus overrides.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or fails validation.
pub fn resolve_config(options: &RunOptions) -> SimResult<SimConfig> {
    let mut config = match &options.config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed_override {
        config.reproducibility.seed = seed;
    }
    if let Some(path) = &options.export_path {
        config.output.export_path = Some(path.clone());
    }
    Ok(config)
}

/// Run every enabled scenario, writing progress and the text chart to `out`.
///
/// # Errors
///
/// Returns configuration, sampling, or export errors.
pub fn run_simulation<W: Write + ?Sized>(
    options: &RunOptions,
    out: &mut W,
) -> SimResult<Vec<ScenarioReport>> {
    let config = resolve_config(options)?;
    tracing::info!(seed = config.reproducibility.seed, "starting run");

    let mut sink = Tee::new(
        FigureRecorder::new(),
        TextRenderer::new(config.output.bar_width),
    );
    let mut reports = Vec::with_capacity(2);

    for mut scheduled in schedule(&config)? {
        if !scheduled.enabled {
            continue;
        }
        if !options.quiet {
            write!(out, "Simulating {}... ", scheduled.scenario.description())?;
            out.flush()?;
        }
        reports.push(scheduled.run(&config.jidoka, &mut sink)?);
        if !options.quiet {
            writeln!(out, "done.")?;
        }
    }

    let (recorder, text) = sink.into_inner();

    if !options.quiet && !reports.is_empty() {
        writeln!(out, "Displaying histograms of simulation results.\n")?;
        write!(out, "{}", text.output())?;
        writeln!(out)?;
        write_summary(out, &reports)?;
    }

    if let Some(path) = &config.output.export_path {
        export_panels(recorder.panels(), path)?;
        if !options.quiet {
            writeln!(out, "Exported {} panels to {}", recorder.panels().len(), path.display())?;
        }
    }

    Ok(reports)
}

fn export_panels(panels: &[Panel], path: &Path) -> SimResult<()> {
    let exporter = Exporter::new(ExportFormat::from_path(path));
    exporter.export(panels, path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "export failed");
        match e {
            SimError::Io(io) => SimError::io(format!("{}: {io}", path.display())),
            other => other,
        }
    })
}
