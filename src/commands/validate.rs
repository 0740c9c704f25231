use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::{InputArgs, make_loader};
use trackcheck::bundle::ValidationMode;
use trackcheck::validation::{ValidationEngine, ValidationResult};

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Returns whether every event passed validation
pub fn validate_command(
    config_path: Option<&Path>,
    inputs: InputArgs,
    format: OutputFormat,
    fail_fast: bool,
    shards: Option<usize>,
) -> Result<bool> {
    let mut loader = make_loader(config_path, inputs)?;
    if fail_fast {
        loader = loader.with_validation_mode(ValidationMode::FailFast);
    }
    if let Some(shards) = shards {
        loader = loader.with_shards(shards);
    }

    let bundle = match loader.load() {
        Ok(bundle) => bundle,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            anyhow::bail!("Failed to load tracker bundle");
        }
    };

    let engine = ValidationEngine::new();
    let result = engine.validate_sharded(&bundle, loader.config().shards);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.report())?;
            println!("{json}");
        }
        OutputFormat::Text => print_text_report(&result),
    }

    Ok(!result.has_errors())
}

fn print_text_report(result: &ValidationResult<'_>) {
    let report = result.report();

    for error in report.errors {
        println!(
            "{} {} {} {}",
            "✗".red(),
            format!("{} {}", error.tracker_type, error.uid).bold(),
            error.error_code.to_string().yellow(),
            error.message
        );
    }

    let stats = report.stats;
    if report.errors.is_empty() {
        println!(
            "\n{} All {} events passed validation!",
            "✅".green(),
            stats.validated
        );
    } else {
        println!(
            "\nValidated {} of {} events: {} valid, {} invalid",
            stats.validated, stats.total, stats.valid, stats.invalid
        );
        if stats.skipped > 0 {
            println!("{} events skipped (fail-fast)", stats.skipped);
        }
    }
}
