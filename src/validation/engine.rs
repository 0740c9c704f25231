use serde::Serialize;
use std::collections::HashSet;
use std::thread;
use tracing::{debug, info};

use super::Validator;
use super::event_meta::EventMetaValidator;
use super::reporter::{Reporter, TrackerError};
use crate::bundle::{TrackerBundle, ValidationMode};
use crate::models::{Event, IdSchemeParams, TrackerType};

/// Runs every registered event validator over the events of a bundle
pub struct ValidationEngine {
    event_validators: Vec<Box<dyn Validator<Event>>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self {
            event_validators: vec![Box::new(EventMetaValidator::new())],
        }
    }

    pub fn with_validator(mut self, validator: impl Validator<Event> + 'static) -> Self {
        self.event_validators.push(Box::new(validator));
        self
    }

    pub fn validator_names(&self) -> Vec<&'static str> {
        self.event_validators.iter().map(|v| v.name()).collect()
    }

    pub fn validate<'b>(&self, bundle: &'b TrackerBundle) -> ValidationResult<'b> {
        let mut reporter = Reporter::new(bundle.id_schemes().clone());
        let validated = self.validate_events(
            &mut reporter,
            bundle,
            bundle.events(),
            bundle.validation_mode(),
        );

        ValidationResult::new(bundle, reporter, validated)
    }

    /// Validate contiguous chunks of the bundle's events on separate threads.
    ///
    /// Each shard fills its own reporter; reporters are merged in shard order
    /// so the outcome matches [`ValidationEngine::validate`] in full mode.
    /// Fail-fast bundles are validated sequentially.
    pub fn validate_sharded<'b>(
        &self,
        bundle: &'b TrackerBundle,
        shards: usize,
    ) -> ValidationResult<'b> {
        let events = bundle.events();
        let shards = shards.max(1);
        if shards == 1 || events.len() < 2 || bundle.validation_mode() == ValidationMode::FailFast
        {
            return self.validate(bundle);
        }

        let chunk_size = events.len().div_ceil(shards);
        debug!(
            "Validating {} events in {} shards of up to {chunk_size}",
            events.len(),
            events.len().div_ceil(chunk_size)
        );

        let id_schemes = bundle.id_schemes();
        let shard_reporters: Vec<Reporter> = thread::scope(|scope| {
            let handles: Vec<_> = events
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        let mut reporter = Reporter::new(id_schemes.clone());
                        self.validate_events(&mut reporter, bundle, chunk, ValidationMode::Full);
                        reporter
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut reporter = Reporter::new(id_schemes.clone());
        for shard in shard_reporters {
            reporter.merge(shard);
        }

        ValidationResult::new(bundle, reporter, events.len())
    }

    /// Returns the number of events that were checked
    fn validate_events(
        &self,
        reporter: &mut Reporter,
        bundle: &TrackerBundle,
        events: &[Event],
        mode: ValidationMode,
    ) -> usize {
        for (index, event) in events.iter().enumerate() {
            let before = reporter.error_count();
            for validator in &self.event_validators {
                validator.validate(reporter, bundle, event);
            }

            if mode == ValidationMode::FailFast && reporter.error_count() > before {
                info!(
                    "Event {} failed validation; stopping early (fail-fast)",
                    event.uid
                );
                return index + 1;
            }
        }
        events.len()
    }
}

/// Outcome of a validation pass over one bundle
#[derive(Debug)]
pub struct ValidationResult<'b> {
    bundle: &'b TrackerBundle,
    reporter: Reporter,
    validated: usize,
}

impl<'b> ValidationResult<'b> {
    fn new(bundle: &'b TrackerBundle, reporter: Reporter, validated: usize) -> Self {
        #[cfg(debug_assertions)]
        {
            let uids: HashSet<&str> = bundle.events().iter().map(|e| e.uid.as_str()).collect();
            debug_assert!(
                reporter.errors().iter().all(|e| uids.contains(e.uid.as_str())),
                "reported error for an event outside the bundle"
            );
        }

        info!(
            "Validated {validated} of {} events: {} errors",
            bundle.events().len(),
            reporter.error_count()
        );

        Self {
            bundle,
            reporter,
            validated,
        }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn has_errors(&self) -> bool {
        self.reporter.has_errors()
    }

    /// Number of events that were actually checked
    pub fn validated_count(&self) -> usize {
        self.validated
    }

    /// Events left unchecked because a fail-fast run stopped early
    pub fn skipped_count(&self) -> usize {
        self.bundle.events().len() - self.validated
    }

    /// Checked events that produced no errors, in bundle order
    pub fn valid_events(&self) -> Vec<&'b Event> {
        let invalid: HashSet<&str> = self
            .reporter
            .invalid_uids(TrackerType::Event)
            .into_iter()
            .collect();
        self.bundle.events()[..self.validated]
            .iter()
            .filter(|event| !invalid.contains(event.uid.as_str()))
            .collect()
    }

    pub fn invalid_event_uids(&self) -> Vec<&str> {
        self.reporter.invalid_uids(TrackerType::Event)
    }

    pub fn report(&self) -> ValidationReport<'_> {
        ValidationReport {
            status: if self.has_errors() {
                ReportStatus::Error
            } else {
                ReportStatus::Ok
            },
            id_schemes: self.reporter.id_schemes(),
            stats: ReportStats {
                total: self.bundle.events().len(),
                validated: self.validated,
                valid: self.valid_events().len(),
                invalid: self.invalid_event_uids().len(),
                skipped: self.skipped_count(),
            },
            errors: self.reporter.errors(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub validated: usize,
    pub valid: usize,
    pub invalid: usize,
    pub skipped: usize,
}

/// Serializable view of a validation pass
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport<'a> {
    pub status: ReportStatus,
    pub id_schemes: &'a IdSchemeParams,
    pub stats: ReportStats,
    pub errors: &'a [TrackerError],
}
