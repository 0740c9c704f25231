use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common accessors shared by every metadata object the preheat indexes
pub trait IdentifiableObject {
    fn uid(&self) -> &str;
    fn code(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn attribute_values(&self) -> &BTreeMap<String, String>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Attribute UID to value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStage {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// UID of the owning program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUnit {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_values: BTreeMap<String, String>,
}

macro_rules! impl_identifiable {
    ($($ty:ty),+) => {
        $(
            impl IdentifiableObject for $ty {
                fn uid(&self) -> &str {
                    &self.uid
                }

                fn code(&self) -> Option<&str> {
                    self.code.as_deref()
                }

                fn name(&self) -> Option<&str> {
                    self.name.as_deref()
                }

                fn attribute_values(&self) -> &BTreeMap<String, String> {
                    &self.attribute_values
                }
            }
        )+
    };
}

impl_identifiable!(Program, ProgramStage, OrganisationUnit);

impl Program {
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl ProgramStage {
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl OrganisationUnit {
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

/// Reference metadata as loaded from a metadata export
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataCatalog {
    #[serde(default)]
    pub programs: Vec<Program>,

    #[serde(default)]
    pub program_stages: Vec<ProgramStage>,

    #[serde(default)]
    pub organisation_units: Vec<OrganisationUnit>,
}

impl MetadataCatalog {
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
            && self.program_stages.is_empty()
            && self.organisation_units.is_empty()
    }
}
