use serde::{Deserialize, Serialize};

use super::identifier::{IdSchemeParams, MetadataIdentifier};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Active,
    Completed,
    Visited,
    Schedule,
    Overdue,
    Skipped,
}

/// A tracker event as it appears in an import payload.
///
/// Metadata references are bare strings here; their scheme is decided by the
/// run's [`IdSchemeParams`] when the payload is turned into an [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub event: String,
    pub program: String,
    pub program_stage: String,
    pub org_unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,

    #[serde(default)]
    pub status: EventStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventsPayload {
    #[serde(default)]
    pub events: Vec<EventPayload>,
}

/// A tracker event with its metadata references resolved to typed identifiers
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub uid: String,
    pub program: MetadataIdentifier,
    pub program_stage: MetadataIdentifier,
    pub org_unit: MetadataIdentifier,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,

    pub status: EventStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl Event {
    pub fn builder(uid: impl Into<String>) -> EventBuilder {
        EventBuilder::new(uid)
    }

    pub fn from_payload(payload: EventPayload, id_schemes: &IdSchemeParams) -> Self {
        Self {
            program: id_schemes.to_program_identifier(&payload.program),
            program_stage: id_schemes.to_program_stage_identifier(&payload.program_stage),
            org_unit: id_schemes.to_org_unit_identifier(&payload.org_unit),
            uid: payload.event,
            enrollment: payload.enrollment,
            status: payload.status,
            occurred_at: payload.occurred_at,
            scheduled_at: payload.scheduled_at,
        }
    }
}

pub struct EventBuilder {
    uid: String,
    program: MetadataIdentifier,
    program_stage: MetadataIdentifier,
    org_unit: MetadataIdentifier,
    enrollment: Option<String>,
    status: EventStatus,
}

impl EventBuilder {
    fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            program: MetadataIdentifier::of_uid(""),
            program_stage: MetadataIdentifier::of_uid(""),
            org_unit: MetadataIdentifier::of_uid(""),
            enrollment: None,
            status: EventStatus::default(),
        }
    }

    pub fn program(mut self, program: MetadataIdentifier) -> Self {
        self.program = program;
        self
    }

    pub fn program_stage(mut self, program_stage: MetadataIdentifier) -> Self {
        self.program_stage = program_stage;
        self
    }

    pub fn org_unit(mut self, org_unit: MetadataIdentifier) -> Self {
        self.org_unit = org_unit;
        self
    }

    pub fn enrollment(mut self, enrollment: impl Into<String>) -> Self {
        self.enrollment = Some(enrollment.into());
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Event {
        Event {
            uid: self.uid,
            program: self.program,
            program_stage: self.program_stage,
            org_unit: self.org_unit,
            enrollment: self.enrollment,
            status: self.status,
            occurred_at: None,
            scheduled_at: None,
        }
    }
}
