//! Reads config, metadata and events from disk and assembles a bundle

mod config;
mod error;
mod schemas;
mod spanned;


pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use error::{DocumentError, LoadError};
pub use schemas::DocumentKind;

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use self::schemas::validate_document;
use self::spanned::SpannedDocument;
use crate::bundle::{TrackerBundle, ValidationMode};
use crate::models::{Event, EventsPayload, MetadataCatalog};
use crate::preheat::Preheat;

pub struct BundleLoader {
    config: Config,
}

impl BundleLoader {
    /// Load `config_path`, or `trackcheck.yml` from the cwd when present.
    ///
    /// An explicitly named config must exist; the default one is optional.
    pub fn new(config_path: Option<&Path>) -> Result<Self, LoadError> {
        let config = match config_path {
            Some(path) => Self::load_config(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_config(default_path)?
                } else {
                    debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Config::default()
                }
            }
        };

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn with_metadata(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.metadata = Some(path.into());
        self
    }

    pub fn with_events(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.events = Some(path.into());
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.config.validation_mode = mode;
        self
    }

    pub fn with_shards(mut self, shards: usize) -> Self {
        self.config.shards = shards;
        self
    }

    pub fn load_config(path: &Path) -> Result<Config, LoadError> {
        let mut config: Config = read_document(path, DocumentKind::Config)?;
        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn load_catalog(&self) -> Result<MetadataCatalog, LoadError> {
        let path = self
            .config
            .metadata
            .as_deref()
            .ok_or(LoadError::MissingInput("metadata"))?;
        let catalog: MetadataCatalog = read_document(path, DocumentKind::Metadata)?;
        info!(
            "Loaded {} programs, {} program stages, {} organisation units from {}",
            catalog.programs.len(),
            catalog.program_stages.len(),
            catalog.organisation_units.len(),
            path.display()
        );
        if catalog.is_empty() {
            warn!(
                "Metadata catalog {} is empty; every event reference will be unresolved",
                path.display()
            );
        }
        Ok(catalog)
    }

    /// Load the events payload, resolving references with the configured id schemes
    pub fn load_events(&self) -> Result<Vec<Event>, LoadError> {
        let path = self
            .config
            .events
            .as_deref()
            .ok_or(LoadError::MissingInput("events"))?;
        let payload: EventsPayload = read_document(path, DocumentKind::Events)?;

        let mut seen = HashSet::new();
        for event in &payload.events {
            if !seen.insert(event.event.as_str()) {
                return Err(LoadError::DuplicateEvent {
                    uid: event.event.clone(),
                    path: path.to_path_buf(),
                });
            }
        }

        let id_schemes = &self.config.id_schemes;
        let events: Vec<Event> = payload
            .events
            .into_iter()
            .map(|payload| Event::from_payload(payload, id_schemes))
            .collect();
        info!("Loaded {} events from {}", events.len(), path.display());
        Ok(events)
    }

    pub fn load(&self) -> Result<TrackerBundle, LoadError> {
        let preheat = Preheat::from_catalog(self.load_catalog()?);
        let events = self.load_events()?;

        Ok(TrackerBundle::new(preheat, events)
            .with_id_schemes(self.config.id_schemes.clone())
            .with_validation_mode(self.config.validation_mode))
    }
}

/// Read, schema-check and deserialize one input document
fn read_document<T: DeserializeOwned>(path: &Path, kind: DocumentKind) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = SpannedDocument::parse(path, content)?;
    validate_document(kind, &document)?;
    debug!("✓ {} schema validation passed: {}", kind.name(), path.display());

    serde_json::from_value(document.value().clone()).map_err(|e| {
        document
            .error_at("", format!("Invalid {} document: {e}", kind.name()))
            .into()
    })
}
