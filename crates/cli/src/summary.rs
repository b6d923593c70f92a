//! `qsum run` / `qsum validate`: config-driven feedback summary.

use std::path::{Path, PathBuf};

use log::debug;
use qualities_summary::load::load_inputs;
use qualities_summary::{build_report, FeedbackSummary, SummaryConfig};

use crate::exit_codes::{EXIT_SUMMARY_LOAD, EXIT_SUMMARY_OUTPUT};
use crate::CliError;

fn read_config(config_path: &Path) -> Result<SummaryConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::new(EXIT_SUMMARY_LOAD, format!("cannot read config {}: {e}", config_path.display()))
    })?;
    Ok(SummaryConfig::from_toml(&config_str)?)
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_dir: Option<PathBuf>,
    no_collapse: bool,
) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Sheet paths and [output].dir are relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let input = load_inputs(&config, base_dir)?;
    let summary = FeedbackSummary::from_input(input, config.hierarchy_columns()?)?;

    let collapse = config.output.collapse && !no_collapse;
    let report = build_report(&summary, &config.name, collapse);
    debug!("report built (collapse={collapse})");

    let out_dir = output_dir.or_else(|| config.output.dir.as_ref().map(|d| base_dir.join(d)));
    if let Some(ref dir) = out_dir {
        let written = report
            .write_csv_dir(dir)
            .map_err(|e| CliError::new(EXIT_SUMMARY_OUTPUT, e.to_string()))?;
        for path in written {
            eprintln!("wrote {}", path.display());
        }
    }

    if json_output {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::other(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    let c = &report.counts;
    eprintln!(
        "'{}': {} qualities, {} reviewer(s): {} matched, {} only you, {} only others",
        config.name, c.qualities, c.reviewers, c.matched, c.only_me, c.only_others,
    );

    if out_dir.is_none() && !json_output {
        eprintln!("hint:  pass --json or --output-dir to get the tables");
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)
        .map_err(|e| e.with_hint(format!("checked {}", config_path.display())))?;

    let reviewers: Vec<&str> = config.reviewers().map(|(name, _)| name.as_str()).collect();
    eprintln!(
        "valid: '{}' with {} reviewer sheet(s) {:?}, hierarchy {:?}",
        config.name,
        reviewers.len(),
        reviewers,
        config.hierarchy,
    );
    Ok(())
}
