use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bundle::ValidationMode;
use crate::models::IdSchemeParams;

/// Name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "trackcheck.yml";

/// Contents of `trackcheck.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata catalog (YAML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,

    /// Events payload (JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<PathBuf>,

    pub id_schemes: IdSchemeParams,

    pub validation_mode: ValidationMode,

    /// Number of threads events are split across
    pub shards: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metadata: None,
            events: None,
            id_schemes: IdSchemeParams::default(),
            validation_mode: ValidationMode::default(),
            shards: 1,
        }
    }
}

impl Config {
    /// Make relative input paths relative to `base_dir` instead of the cwd
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for path in [&mut self.metadata, &mut self.events].into_iter().flatten() {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}
