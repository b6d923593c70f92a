// qsum - reconcile a self-assessment with reviewer feedback (headless)

mod exit_codes;
mod summary;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "qsum")]
#[command(about = "Summarize peer feedback against a self-assessment")]
#[command(version)]
struct Cli {
    /// Log debug detail (sheet loading, engine sizes)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configured sheets and build the feedback summary
    #[command(after_help = "\
Examples:
  qsum run feedback.toml
  qsum run feedback.toml --json
  qsum run feedback.toml --output-dir out/
  qsum run feedback.toml --output-dir out/ --no-collapse")]
    Run {
        /// Path to the summary TOML config
        config: PathBuf,

        /// Print the report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write match.csv, only_me.csv and only_others.csv here
        /// (overrides [output].dir)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Keep repeated values instead of blanking them
        #[arg(long)]
        no_collapse: bool,
    },

    /// Validate a summary config without loading any sheets
    #[command(after_help = "\
Examples:
  qsum validate feedback.toml")]
    Validate {
        /// Path to the summary TOML config
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => {
            eprintln!("Usage: qsum <command> [options]");
            eprintln!("       qsum --help for more information");
            Err(CliError::args(""))
        }
        Some(Commands::Run { config, json, output_dir, no_collapse }) => {
            summary::cmd_run(config, json, output_dir, no_collapse)
        }
        Some(Commands::Validate { config }) => summary::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Route `log` records from the engine to stderr. `RUST_LOG` wins over flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<qualities_summary::SummaryError> for CliError {
    fn from(err: qualities_summary::SummaryError) -> Self {
        let code = exit_codes::summary_exit_code(&err);
        let hint = match &err {
            qualities_summary::SummaryError::MissingSelfQuality(_) => {
                Some("add the missing qualities to the self sheet (an empty comment is fine)".to_string())
            }
            qualities_summary::SummaryError::MissingColumn { .. } => {
                Some("map the sheet's headers with a [sheets.<name>.rename] table".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}
