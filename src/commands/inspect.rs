use anyhow::Result;
use std::path::Path;

use super::{InputArgs, make_loader};
use trackcheck::preheat::Preheat;

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum InspectType {
    /// Effective configuration after overrides
    Config,
    /// Object counts in the preheated metadata
    Preheat,
    /// One event from the payload, with resolved identifiers
    Event,
}

pub fn inspect_command(
    config_path: Option<&Path>,
    inputs: InputArgs,
    object_type: InspectType,
    uid: Option<String>,
) -> Result<()> {
    let loader = make_loader(config_path, inputs)?;

    let json = match object_type {
        InspectType::Config => serde_json::to_string_pretty(loader.config())?,
        InspectType::Preheat => {
            let catalog = loader.load_catalog().map_err(report)?;
            let preheat = Preheat::from_catalog(catalog);
            serde_json::to_string_pretty(&preheat.summary())?
        }
        InspectType::Event => {
            let uid = uid.ok_or_else(|| anyhow::anyhow!("UID required for event inspection"))?;
            let events = loader.load_events().map_err(report)?;
            match events.iter().find(|event| event.uid == uid) {
                Some(event) => serde_json::to_string_pretty(event)?,
                None => anyhow::bail!("Event not found: {}", uid),
            }
        }
    };

    println!("{json}");
    Ok(())
}

fn report(err: trackcheck::loader::LoadError) -> anyhow::Error {
    eprintln!("{:?}", miette::Report::new(err));
    anyhow::anyhow!("Failed to load input")
}
