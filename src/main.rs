use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{InputArgs, InspectType, OutputFormat, inspect_command, validate_command};

#[derive(Parser)]
#[command(
    name = "trackcheck",
    about = "Validates tracker event payloads against reference metadata",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the trackcheck config file (defaults to ./trackcheck.yml when present)
    #[arg(short, long, global = true, env = "TRACKCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate events against the metadata catalog
    Validate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Stop after the first event that fails validation
        #[arg(long)]
        fail_fast: bool,

        /// Split events across this many threads
        #[arg(long)]
        shards: Option<usize>,
    },

    /// Inspect loaded configuration, metadata or events
    Inspect {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(value_enum)]
        object_type: InspectType,

        #[arg(help = "Event UID (for 'event')")]
        uid: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Validate {
            inputs,
            format,
            fail_fast,
            shards,
        } => {
            let valid = validate_command(config, inputs, format, fail_fast, shards)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Inspect {
            inputs,
            object_type,
            uid,
        } => {
            inspect_command(config, inputs, object_type, uid)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("trackcheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("trackcheck=info"), // -v: info messages
        _ => EnvFilter::new("trackcheck=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
