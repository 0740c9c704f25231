use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes a tracker validator can report.
///
/// Each code carries a message template with `{0}` standing for the
/// unresolved identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationCode {
    /// Program not found
    E1010,
    /// Organisation unit not found
    E1011,
    /// Program stage not found
    E1013,
}

impl ValidationCode {
    pub fn message_template(&self) -> &'static str {
        match self {
            ValidationCode::E1010 => "Could not find Program: `{0}`, linked to Event.",
            ValidationCode::E1011 => "Could not find OrganisationUnit: `{0}`, linked to Event.",
            ValidationCode::E1013 => "Could not find ProgramStage: `{0}`, linked to Event.",
        }
    }

    pub fn format_message(&self, arg: impl fmt::Display) -> String {
        self.message_template().replace("{0}", &arg.to_string())
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
