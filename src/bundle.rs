//! Everything a validation run needs, assembled once up front

use serde::{Deserialize, Serialize};

use crate::models::{Event, IdSchemeParams};
use crate::preheat::Preheat;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate every event
    #[default]
    Full,
    /// Stop after the first event that fails validation
    FailFast,
}

#[derive(Debug)]
pub struct TrackerBundle {
    preheat: Preheat,
    events: Vec<Event>,
    id_schemes: IdSchemeParams,
    validation_mode: ValidationMode,
}

impl TrackerBundle {
    pub fn new(preheat: Preheat, events: Vec<Event>) -> Self {
        Self {
            preheat,
            events,
            id_schemes: IdSchemeParams::default(),
            validation_mode: ValidationMode::default(),
        }
    }

    pub fn with_id_schemes(mut self, id_schemes: IdSchemeParams) -> Self {
        self.id_schemes = id_schemes;
        self
    }

    pub fn with_validation_mode(mut self, validation_mode: ValidationMode) -> Self {
        self.validation_mode = validation_mode;
        self
    }

    pub fn preheat(&self) -> &Preheat {
        &self.preheat
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_event(&self, uid: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.uid == uid)
    }

    pub fn id_schemes(&self) -> &IdSchemeParams {
        &self.id_schemes
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }
}
