use tracing::debug;

use super::Validator;
use super::code::ValidationCode;
use super::reporter::Reporter;
use crate::bundle::TrackerBundle;
use crate::models::{Event, TrackerType};
use crate::preheat::MetadataResolver;

/// Checks that an event's program, program stage and organisation unit exist.
///
/// All three lookups always run, so an event missing several references
/// gets one error per missing reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventMetaValidator;

impl EventMetaValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn check<R>(reporter: &mut Reporter, resolver: &R, event: &Event)
    where
        R: MetadataResolver + ?Sized,
    {
        if resolver.organisation_unit(&event.org_unit).is_none() {
            debug!("Event {} references unknown org unit {}", event.uid, event.org_unit);
            reporter.add_unresolved(
                TrackerType::Event,
                &event.uid,
                ValidationCode::E1011,
                &event.org_unit,
            );
        }

        if resolver.program(&event.program).is_none() {
            debug!("Event {} references unknown program {}", event.uid, event.program);
            reporter.add_unresolved(
                TrackerType::Event,
                &event.uid,
                ValidationCode::E1010,
                &event.program,
            );
        }

        if resolver.program_stage(&event.program_stage).is_none() {
            debug!(
                "Event {} references unknown program stage {}",
                event.uid, event.program_stage
            );
            reporter.add_unresolved(
                TrackerType::Event,
                &event.uid,
                ValidationCode::E1013,
                &event.program_stage,
            );
        }
    }
}

impl Validator<Event> for EventMetaValidator {
    fn name(&self) -> &'static str {
        "event-meta"
    }

    fn validate(&self, reporter: &mut Reporter, bundle: &TrackerBundle, event: &Event) {
        Self::check(reporter, bundle.preheat(), event);
    }
}
