//! CLI argument parsing.
//!
//! Parsing takes any iterator of strings so it can be tested without
//! touching `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options for the `run` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// YAML configuration file; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Overrides `reproducibility.seed`.
    pub seed_override: Option<u64>,
    /// Overrides `output.export_path`.
    pub export_path: Option<PathBuf>,
    /// Suppress progress lines and the text chart.
    pub quiet: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run both scenarios.
    Run(RunOptions),
    /// Show help
    Help,
    /// Show version
    Version,
    /// Bad arguments; the message explains what went wrong.
    Usage(String),
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        let rest = args.get(1..).unwrap_or_default();

        let command = match rest.first().map(String::as_str) {
            None => Command::Run(RunOptions::default()),
            Some("run") => Self::parse_run_options(&rest[1..]),
            Some("-h" | "--help" | "help") => Command::Help,
            Some("-V" | "--version" | "version") => Command::Version,
            Some(flag) if flag.starts_with('-') => Self::parse_run_options(rest),
            Some(unknown) => Command::Usage(format!("unknown command: {unknown}")),
        };

        Self { command }
    }

    /// Parse the options following `run` (or following the program name
    /// when `run` is omitted).
    fn parse_run_options(args: &[String]) -> Command {
        let mut options = RunOptions::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" | "--config" => match iter.next() {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => return Command::Usage("--config requires a path".to_string()),
                },
                "-s" | "--seed" => match iter.next().map(|s| s.parse::<u64>()) {
                    Some(Ok(seed)) => options.seed_override = Some(seed),
                    Some(Err(e)) => return Command::Usage(format!("invalid --seed: {e}")),
                    None => return Command::Usage("--seed requires a value".to_string()),
                },
                "-o" | "--json" | "--export" => match iter.next() {
                    Some(path) => options.export_path = Some(PathBuf::from(path)),
                    None => return Command::Usage(format!("{arg} requires a path")),
                },
                "-q" | "--quiet" => options.quiet = true,
                "-h" | "--help" => return Command::Help,
                unknown => return Command::Usage(format!("unknown option: {unknown}")),
            }
        }

        Command::Run(options)
    }
}
