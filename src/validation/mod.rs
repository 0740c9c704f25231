//! Tracker object validation

mod code;
mod engine;
mod event_meta;
mod reporter;

#[cfg(test)]
mod tests;

pub use code::ValidationCode;
pub use engine::{ReportStats, ReportStatus, ValidationEngine, ValidationReport, ValidationResult};
pub use event_meta::EventMetaValidator;
pub use reporter::{Reporter, TrackerError};

use crate::bundle::TrackerBundle;

/// A single validation rule applied to one tracker object of type `T`.
///
/// Validators report problems through the [`Reporter`] and never fail the
/// pass themselves.
pub trait Validator<T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, reporter: &mut Reporter, bundle: &TrackerBundle, item: &T);
}
