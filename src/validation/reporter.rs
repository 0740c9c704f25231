use serde::Serialize;
use std::collections::HashSet;

use super::code::ValidationCode;
use crate::models::{IdSchemeParams, MetadataIdentifier, TrackerType};

/// One validation failure attached to a tracker object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerError {
    pub error_code: ValidationCode,
    pub tracker_type: TrackerType,
    pub uid: String,
    pub message: String,
}

/// Append-only accumulator of validation errors for one validation pass
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    id_schemes: IdSchemeParams,
    errors: Vec<TrackerError>,
}

impl Reporter {
    pub fn new(id_schemes: IdSchemeParams) -> Self {
        Self {
            id_schemes,
            errors: Vec::new(),
        }
    }

    pub fn id_schemes(&self) -> &IdSchemeParams {
        &self.id_schemes
    }

    pub fn add_error(&mut self, error: TrackerError) {
        self.errors.push(error);
    }

    /// Record that `id`, referenced by the given object, could not be resolved
    pub fn add_unresolved(
        &mut self,
        tracker_type: TrackerType,
        uid: &str,
        code: ValidationCode,
        id: &MetadataIdentifier,
    ) {
        self.add_error(TrackerError {
            error_code: code,
            tracker_type,
            uid: uid.to_string(),
            message: code.format_message(id),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_error(&self, code: ValidationCode, tracker_type: TrackerType, uid: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.error_code == code && e.tracker_type == tracker_type && e.uid == uid)
    }

    pub fn errors(&self) -> &[TrackerError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors_for<'a>(&'a self, uid: &'a str) -> impl Iterator<Item = &'a TrackerError> + 'a {
        self.errors.iter().filter(move |e| e.uid == uid)
    }

    /// Distinct UIDs of the given type that have errors, in first-seen order
    pub fn invalid_uids(&self, tracker_type: TrackerType) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.errors
            .iter()
            .filter(|e| e.tracker_type == tracker_type)
            .map(|e| e.uid.as_str())
            .filter(|uid| seen.insert(*uid))
            .collect()
    }

    /// Append all errors of `other` after the errors already recorded
    pub fn merge(&mut self, other: Reporter) {
        self.errors.extend(other.errors);
    }
}
