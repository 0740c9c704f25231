mod inspect;
mod validate;

pub use inspect::{InspectType, inspect_command};
pub use validate::{OutputFormat, validate_command};

use anyhow::Result;
use std::path::{Path, PathBuf};

use trackcheck::loader::BundleLoader;

/// Input file overrides shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InputArgs {
    /// Metadata catalog (YAML or JSON); overrides `metadata` in the config
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Events payload (JSON); overrides `events` in the config
    #[arg(short, long)]
    pub events: Option<PathBuf>,
}

/// Build a loader from the config file, then apply command-line overrides
pub(crate) fn make_loader(config_path: Option<&Path>, inputs: InputArgs) -> Result<BundleLoader> {
    let mut loader = match BundleLoader::new(config_path) {
        Ok(loader) => loader,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            anyhow::bail!("Failed to load configuration");
        }
    };

    if let Some(metadata) = inputs.metadata {
        loader = loader.with_metadata(metadata);
    }
    if let Some(events) = inputs.events {
        loader = loader.with_events(events);
    }
    Ok(loader)
}
