//! Pre-resolved reference metadata for one validation run

mod index;

use serde::Serialize;
use tracing::debug;

use self::index::SchemeIndex;
use crate::models::{MetadataCatalog, MetadataIdentifier, OrganisationUnit, Program, ProgramStage};

/// Lookup capability validators use to resolve metadata references
pub trait MetadataResolver {
    fn program(&self, id: &MetadataIdentifier) -> Option<&Program>;
    fn program_stage(&self, id: &MetadataIdentifier) -> Option<&ProgramStage>;
    fn organisation_unit(&self, id: &MetadataIdentifier) -> Option<&OrganisationUnit>;
}

/// Read-only lookup table built once from a metadata catalog.
///
/// Every object is reachable under each scheme it can be addressed by: its
/// UID, its code and name when present, and each of its attribute values.
#[derive(Debug, Default)]
pub struct Preheat {
    programs: SchemeIndex<Program>,
    program_stages: SchemeIndex<ProgramStage>,
    organisation_units: SchemeIndex<OrganisationUnit>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreheatSummary {
    pub programs: usize,
    pub program_stages: usize,
    pub organisation_units: usize,
}

impl Preheat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: MetadataCatalog) -> Self {
        let mut preheat = Self::new();
        for program in catalog.programs {
            preheat.put_program(program);
        }
        for program_stage in catalog.program_stages {
            preheat.put_program_stage(program_stage);
        }
        for organisation_unit in catalog.organisation_units {
            preheat.put_organisation_unit(organisation_unit);
        }

        debug!(
            "Preheated {} programs, {} program stages, {} organisation units",
            preheat.programs.len(),
            preheat.program_stages.len(),
            preheat.organisation_units.len()
        );
        preheat
    }

    pub fn put_program(&mut self, program: Program) {
        self.programs.insert("Program", program);
    }

    pub fn put_program_stage(&mut self, program_stage: ProgramStage) {
        self.program_stages.insert("ProgramStage", program_stage);
    }

    pub fn put_organisation_unit(&mut self, organisation_unit: OrganisationUnit) {
        self.organisation_units
            .insert("OrganisationUnit", organisation_unit);
    }

    pub fn summary(&self) -> PreheatSummary {
        PreheatSummary {
            programs: self.programs.len(),
            program_stages: self.program_stages.len(),
            organisation_units: self.organisation_units.len(),
        }
    }
}

impl MetadataResolver for Preheat {
    fn program(&self, id: &MetadataIdentifier) -> Option<&Program> {
        self.programs.get(id)
    }

    fn program_stage(&self, id: &MetadataIdentifier) -> Option<&ProgramStage> {
        self.program_stages.get(id)
    }

    fn organisation_unit(&self, id: &MetadataIdentifier) -> Option<&OrganisationUnit> {
        self.organisation_units.get(id)
    }
}

#[cfg(test)]
mod tests;
