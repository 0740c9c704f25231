use super::*;
use std::collections::BTreeMap;

fn catalog() -> MetadataCatalog {
    MetadataCatalog {
        programs: vec![Program {
            uid: "PrgUid00001".to_string(),
            code: Some("MNCH".to_string()),
            name: Some("Child Programme".to_string()),
            attribute_values: BTreeMap::new(),
        }],
        program_stages: vec![ProgramStage {
            uid: "StgUid00001".to_string(),
            name: Some("Birth".to_string()),
            program: Some("PrgUid00001".to_string()),
            ..Default::default()
        }],
        organisation_units: vec![OrganisationUnit {
            uid: "OuUid000001".to_string(),
            name: Some("Fish District".to_string()),
            attribute_values: BTreeMap::from([(
                "AttrUid0001".to_string(),
                "FISH-01".to_string(),
            )]),
            ..Default::default()
        }],
    }
}

#[test]
fn test_resolves_by_uid() {
    let preheat = Preheat::from_catalog(catalog());

    let program = preheat.program(&MetadataIdentifier::of_uid("PrgUid00001"));
    assert_eq!(program.map(|p| p.uid.as_str()), Some("PrgUid00001"));
    assert!(
        preheat
            .program_stage(&MetadataIdentifier::of_uid("StgUid00001"))
            .is_some()
    );
    assert!(
        preheat
            .organisation_unit(&MetadataIdentifier::of_uid("OuUid000001"))
            .is_some()
    );
}

#[test]
fn test_resolves_by_code_name_and_attribute() {
    let preheat = Preheat::from_catalog(catalog());

    assert!(preheat.program(&MetadataIdentifier::of_code("MNCH")).is_some());
    assert!(
        preheat
            .program(&MetadataIdentifier::of_name("Child Programme"))
            .is_some()
    );
    assert!(
        preheat
            .program_stage(&MetadataIdentifier::of_name("Birth"))
            .is_some()
    );
    let org_unit =
        preheat.organisation_unit(&MetadataIdentifier::of_attribute("AttrUid0001", "FISH-01"));
    assert_eq!(org_unit.map(|o| o.uid.as_str()), Some("OuUid000001"));
}

#[test]
fn test_value_under_wrong_scheme_does_not_resolve() {
    let preheat = Preheat::from_catalog(catalog());

    assert!(preheat.program(&MetadataIdentifier::of_uid("MNCH")).is_none());
    assert!(
        preheat
            .program(&MetadataIdentifier::of_code("PrgUid00001"))
            .is_none()
    );
    assert!(
        preheat
            .organisation_unit(&MetadataIdentifier::of_attribute("AttrUid0002", "FISH-01"))
            .is_none()
    );
}

#[test]
fn test_types_do_not_leak_into_each_other() {
    let preheat = Preheat::from_catalog(catalog());

    assert!(
        preheat
            .program(&MetadataIdentifier::of_uid("StgUid00001"))
            .is_none()
    );
    assert!(
        preheat
            .organisation_unit(&MetadataIdentifier::of_uid("PrgUid00001"))
            .is_none()
    );
}

#[test]
fn test_duplicates_keep_first_object() {
    let mut preheat = Preheat::new();
    preheat.put_program(Program {
        uid: "PrgUid00001".to_string(),
        code: Some("SHARED".to_string()),
        ..Default::default()
    });
    preheat.put_program(Program {
        uid: "PrgUid00002".to_string(),
        code: Some("SHARED".to_string()),
        ..Default::default()
    });
    preheat.put_program(Program {
        uid: "PrgUid00001".to_string(),
        name: Some("Duplicate".to_string()),
        ..Default::default()
    });

    let by_code = preheat.program(&MetadataIdentifier::of_code("SHARED"));
    assert_eq!(by_code.map(|p| p.uid.as_str()), Some("PrgUid00001"));
    assert!(
        preheat
            .program(&MetadataIdentifier::of_uid("PrgUid00002"))
            .is_some()
    );
    assert!(
        preheat
            .program(&MetadataIdentifier::of_name("Duplicate"))
            .is_none()
    );
    assert_eq!(preheat.summary().programs, 2);
}

#[test]
fn test_summary_counts_objects() {
    let preheat = Preheat::from_catalog(catalog());

    assert_eq!(
        preheat.summary(),
        PreheatSummary {
            programs: 1,
            program_stages: 1,
            organisation_units: 1,
        }
    );
}
