use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static ATTRIBUTE_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:attribute):([a-zA-Z][a-zA-Z0-9]{10})$").expect("attribute scheme pattern")
});

/// The scheme an identifier value is expressed in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum IdScheme {
    #[default]
    Uid,
    Code,
    Name,
    /// Value of the attribute with the given UID
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown id scheme '{0}' (expected UID, CODE, NAME or ATTRIBUTE:<uid>)")]
pub struct ParseIdSchemeError(String);

impl FromStr for IdScheme {
    type Err = ParseIdSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "UID" => return Ok(IdScheme::Uid),
            "CODE" => return Ok(IdScheme::Code),
            "NAME" => return Ok(IdScheme::Name),
            _ => {}
        }

        ATTRIBUTE_SCHEME
            .captures(trimmed)
            .map(|caps| IdScheme::Attribute(caps[1].to_string()))
            .ok_or_else(|| ParseIdSchemeError(s.to_string()))
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Uid => write!(f, "UID"),
            IdScheme::Code => write!(f, "CODE"),
            IdScheme::Name => write!(f, "NAME"),
            IdScheme::Attribute(uid) => write!(f, "ATTRIBUTE:{uid}"),
        }
    }
}

impl Serialize for IdScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IdScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An identifier value together with the scheme it was expressed in.
///
/// Two identifiers are equal only when both the scheme and the value match,
/// so `CODE:abc` never resolves an object whose UID happens to be `abc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetadataIdentifier {
    pub id_scheme: IdScheme,
    pub identifier: String,
}

impl MetadataIdentifier {
    pub fn new(id_scheme: IdScheme, identifier: impl Into<String>) -> Self {
        Self {
            id_scheme,
            identifier: identifier.into(),
        }
    }

    pub fn of_uid(uid: impl Into<String>) -> Self {
        Self::new(IdScheme::Uid, uid)
    }

    pub fn of_code(code: impl Into<String>) -> Self {
        Self::new(IdScheme::Code, code)
    }

    pub fn of_name(name: impl Into<String>) -> Self {
        Self::new(IdScheme::Name, name)
    }

    pub fn of_attribute(attribute_uid: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(IdScheme::Attribute(attribute_uid.into()), value)
    }

    pub fn value(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for MetadataIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Which scheme each metadata type is referenced by in an import payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdSchemeParams {
    /// Fallback for any type without an explicit scheme
    pub id_scheme: IdScheme,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<IdScheme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_stage: Option<IdScheme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit: Option<IdScheme>,
}

impl IdSchemeParams {
    pub fn program_scheme(&self) -> &IdScheme {
        self.program.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn program_stage_scheme(&self) -> &IdScheme {
        self.program_stage.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn org_unit_scheme(&self) -> &IdScheme {
        self.org_unit.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn to_program_identifier(&self, value: &str) -> MetadataIdentifier {
        MetadataIdentifier::new(self.program_scheme().clone(), value)
    }

    pub fn to_program_stage_identifier(&self, value: &str) -> MetadataIdentifier {
        MetadataIdentifier::new(self.program_stage_scheme().clone(), value)
    }

    pub fn to_org_unit_identifier(&self, value: &str) -> MetadataIdentifier {
        MetadataIdentifier::new(self.org_unit_scheme().clone(), value)
    }
}
