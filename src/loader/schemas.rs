use once_cell::sync::Lazy;
use serde_json::Value;

use super::error::{DocumentError, LoadError};
use super::spanned::SpannedDocument;

// Embed schemas at compile time
const CONFIG_SCHEMA: &str = include_str!("../../schemas/v1/config-schema.json");
const METADATA_SCHEMA: &str = include_str!("../../schemas/v1/metadata-schema.json");
const EVENTS_SCHEMA: &str = include_str!("../../schemas/v1/events-schema.json");

static CONFIG: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(CONFIG_SCHEMA).expect("Failed to parse config schema"));
static METADATA: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(METADATA_SCHEMA).expect("Failed to parse metadata schema"));
static EVENTS: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(EVENTS_SCHEMA).expect("Failed to parse events schema"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Config,
    Metadata,
    Events,
}

impl DocumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Config => "config",
            DocumentKind::Metadata => "metadata",
            DocumentKind::Events => "events",
        }
    }

    fn schema(&self) -> &'static Value {
        match self {
            DocumentKind::Config => &CONFIG,
            DocumentKind::Metadata => &METADATA,
            DocumentKind::Events => &EVENTS,
        }
    }
}

/// Check a parsed document against its draft-07 schema.
///
/// Every violation is reported; the first becomes the main diagnostic and
/// the rest are attached as related ones.
pub fn validate_document(kind: DocumentKind, document: &SpannedDocument) -> Result<(), LoadError> {
    let validator = jsonschema::draft7::options()
        .build(kind.schema())
        .map_err(|e| LoadError::Schema(kind.name(), e.to_string()))?;

    let mut errors: Vec<DocumentError> = validator
        .iter_errors(document.value())
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let location = if pointer.is_empty() { "/" } else { pointer.as_str() };
            document.error_at(
                &pointer,
                format!("Schema validation failed at {location}: {error}"),
            )
        })
        .collect();

    if errors.is_empty() {
        return Ok(());
    }

    let mut first = errors.remove(0);
    first.others = errors;
    Err(first
        .with_help(format!("See the {} schema for the expected shape", kind.name()))
        .into())
}
