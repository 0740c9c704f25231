use super::*;
use crate::bundle::{TrackerBundle, ValidationMode};
use crate::models::{
    Event, IdScheme, IdSchemeParams, MetadataIdentifier, OrganisationUnit, Program, ProgramStage,
    TrackerType,
};
use crate::preheat::{MetadataResolver, Preheat};
use std::cell::RefCell;

const ORG_UNIT_UID: &str = "OrgUnitUid";
const PROGRAM_UID: &str = "ProgramUid";
const PROGRAM_STAGE_UID: &str = "ProgramStageUid";

fn valid_event(uid: &str) -> Event {
    Event::builder(uid)
        .program_stage(MetadataIdentifier::of_uid(PROGRAM_STAGE_UID))
        .org_unit(MetadataIdentifier::of_uid(ORG_UNIT_UID))
        .program(MetadataIdentifier::of_uid(PROGRAM_UID))
        .build()
}

fn preheat_with(org_unit: bool, program: bool, program_stage: bool) -> Preheat {
    let mut preheat = Preheat::new();
    if org_unit {
        preheat.put_organisation_unit(OrganisationUnit::with_uid(ORG_UNIT_UID));
    }
    if program {
        preheat.put_program(Program::with_uid(PROGRAM_UID));
    }
    if program_stage {
        preheat.put_program_stage(ProgramStage::with_uid(PROGRAM_STAGE_UID));
    }
    preheat
}

fn validate_single(preheat: Preheat) -> (Reporter, String) {
    let event = valid_event("EvtUid00001");
    let uid = event.uid.clone();
    let bundle = TrackerBundle::new(preheat, vec![event]);
    let mut reporter = Reporter::new(IdSchemeParams::default());

    EventMetaValidator::new().validate(&mut reporter, &bundle, &bundle.events()[0]);
    (reporter, uid)
}

#[test]
fn test_event_validation_success() {
    let (reporter, _) = validate_single(preheat_with(true, true, true));

    assert!(!reporter.has_errors());
}

#[test]
fn test_event_validation_fails_when_program_is_missing() {
    let (reporter, uid) = validate_single(preheat_with(true, false, true));

    assert!(reporter.has_error(ValidationCode::E1010, TrackerType::Event, &uid));
    assert_eq!(reporter.error_count(), 1);
}

#[test]
fn test_event_validation_fails_when_program_stage_is_missing() {
    let (reporter, uid) = validate_single(preheat_with(true, true, false));

    assert!(reporter.has_error(ValidationCode::E1013, TrackerType::Event, &uid));
    assert_eq!(reporter.error_count(), 1);
}

#[test]
fn test_event_validation_fails_when_org_unit_is_missing() {
    let (reporter, uid) = validate_single(preheat_with(false, true, true));

    assert!(reporter.has_error(ValidationCode::E1011, TrackerType::Event, &uid));
    assert_eq!(reporter.error_count(), 1);
}

#[test]
fn test_every_missing_reference_is_reported() {
    let (reporter, uid) = validate_single(preheat_with(false, false, false));

    let codes: Vec<_> = reporter.errors().iter().map(|e| e.error_code).collect();
    assert_eq!(
        codes,
        vec![
            ValidationCode::E1011,
            ValidationCode::E1010,
            ValidationCode::E1013
        ]
    );
    assert!(reporter.errors().iter().all(|e| e.uid == uid));
}

#[test]
fn test_error_messages_name_the_unresolved_identifier() {
    let (reporter, _) = validate_single(preheat_with(true, false, true));

    assert_eq!(
        reporter.errors()[0].message,
        "Could not find Program: `ProgramUid`, linked to Event."
    );
}

#[test]
fn test_lookup_uses_identifier_scheme() {
    let mut preheat = Preheat::new();
    preheat.put_program(Program {
        uid: PROGRAM_UID.to_string(),
        code: Some("MNCH".to_string()),
        ..Default::default()
    });
    preheat.put_program_stage(ProgramStage::with_uid(PROGRAM_STAGE_UID));
    preheat.put_organisation_unit(OrganisationUnit::with_uid(ORG_UNIT_UID));

    let by_code = Event::builder("EvtUid00001")
        .program(MetadataIdentifier::of_code("MNCH"))
        .program_stage(MetadataIdentifier::of_uid(PROGRAM_STAGE_UID))
        .org_unit(MetadataIdentifier::of_uid(ORG_UNIT_UID))
        .build();
    let by_wrong_scheme = Event::builder("EvtUid00002")
        .program(MetadataIdentifier::of_uid("MNCH"))
        .program_stage(MetadataIdentifier::of_uid(PROGRAM_STAGE_UID))
        .org_unit(MetadataIdentifier::of_uid(ORG_UNIT_UID))
        .build();

    let mut reporter = Reporter::new(IdSchemeParams {
        program: Some(IdScheme::Code),
        ..Default::default()
    });
    EventMetaValidator::check(&mut reporter, &preheat, &by_code);
    EventMetaValidator::check(&mut reporter, &preheat, &by_wrong_scheme);

    assert_eq!(reporter.invalid_uids(TrackerType::Event), vec!["EvtUid00002"]);
    assert!(reporter.has_error(ValidationCode::E1010, TrackerType::Event, "EvtUid00002"));
}

/// Resolves nothing and records which lookups were attempted
#[derive(Default)]
struct RecordingResolver {
    lookups: RefCell<Vec<&'static str>>,
}

impl MetadataResolver for RecordingResolver {
    fn program(&self, _id: &MetadataIdentifier) -> Option<&Program> {
        self.lookups.borrow_mut().push("program");
        None
    }

    fn program_stage(&self, _id: &MetadataIdentifier) -> Option<&ProgramStage> {
        self.lookups.borrow_mut().push("program_stage");
        None
    }

    fn organisation_unit(&self, _id: &MetadataIdentifier) -> Option<&OrganisationUnit> {
        self.lookups.borrow_mut().push("organisation_unit");
        None
    }
}

#[test]
fn test_checks_do_not_short_circuit() {
    let resolver = RecordingResolver::default();
    let mut reporter = Reporter::default();

    EventMetaValidator::check(&mut reporter, &resolver, &valid_event("EvtUid00001"));

    let mut lookups = resolver.lookups.take();
    lookups.sort();
    assert_eq!(lookups, vec!["organisation_unit", "program", "program_stage"]);
    assert_eq!(reporter.error_count(), 3);
}

#[test]
fn test_reporter_invalid_uids_are_distinct_and_ordered() {
    let mut reporter = Reporter::default();
    let id = MetadataIdentifier::of_uid("x");
    reporter.add_unresolved(TrackerType::Event, "B", ValidationCode::E1010, &id);
    reporter.add_unresolved(TrackerType::Event, "A", ValidationCode::E1011, &id);
    reporter.add_unresolved(TrackerType::Event, "B", ValidationCode::E1013, &id);
    reporter.add_unresolved(TrackerType::Enrollment, "C", ValidationCode::E1010, &id);

    assert_eq!(reporter.invalid_uids(TrackerType::Event), vec!["B", "A"]);
    assert_eq!(reporter.invalid_uids(TrackerType::Enrollment), vec!["C"]);
    assert_eq!(reporter.errors_for("B").count(), 2);
    assert!(!reporter.has_error(ValidationCode::E1010, TrackerType::Event, "A"));
}

#[test]
fn test_reporter_merge_appends_in_order() {
    let id = MetadataIdentifier::of_uid("x");
    let mut first = Reporter::default();
    first.add_unresolved(TrackerType::Event, "A", ValidationCode::E1010, &id);
    let mut second = Reporter::default();
    second.add_unresolved(TrackerType::Event, "B", ValidationCode::E1011, &id);

    first.merge(second);

    let uids: Vec<_> = first.errors().iter().map(|e| e.uid.as_str()).collect();
    assert_eq!(uids, vec!["A", "B"]);
}

fn mixed_bundle() -> TrackerBundle {
    let missing_program = Event::builder("EvtUid00002")
        .program(MetadataIdentifier::of_uid("Unknown0001"))
        .program_stage(MetadataIdentifier::of_uid(PROGRAM_STAGE_UID))
        .org_unit(MetadataIdentifier::of_uid(ORG_UNIT_UID))
        .build();
    let missing_everything = Event::builder("EvtUid00004")
        .program(MetadataIdentifier::of_uid("Unknown0001"))
        .program_stage(MetadataIdentifier::of_uid("Unknown0002"))
        .org_unit(MetadataIdentifier::of_uid("Unknown0003"))
        .build();

    TrackerBundle::new(
        preheat_with(true, true, true),
        vec![
            valid_event("EvtUid00001"),
            missing_program,
            valid_event("EvtUid00003"),
            missing_everything,
            valid_event("EvtUid00005"),
        ],
    )
}

#[test]
fn test_engine_partitions_events() {
    let bundle = mixed_bundle();
    let result = ValidationEngine::new().validate(&bundle);

    assert!(result.has_errors());
    assert_eq!(result.reporter().error_count(), 4);
    assert_eq!(result.invalid_event_uids(), vec!["EvtUid00002", "EvtUid00004"]);
    let valid: Vec<_> = result.valid_events().iter().map(|e| e.uid.as_str()).collect();
    assert_eq!(valid, vec!["EvtUid00001", "EvtUid00003", "EvtUid00005"]);
    assert_eq!(result.skipped_count(), 0);
}

#[test]
fn test_engine_fail_fast_stops_after_first_failing_event() {
    let bundle = mixed_bundle().with_validation_mode(ValidationMode::FailFast);
    let result = ValidationEngine::new().validate(&bundle);

    assert_eq!(result.validated_count(), 2);
    assert_eq!(result.skipped_count(), 3);
    assert_eq!(result.invalid_event_uids(), vec!["EvtUid00002"]);
    let valid: Vec<_> = result.valid_events().iter().map(|e| e.uid.as_str()).collect();
    assert_eq!(valid, vec!["EvtUid00001"]);
}

#[test]
fn test_engine_fail_fast_still_runs_every_check_for_failing_event() {
    let mut bundle_events = mixed_bundle().events().to_vec();
    bundle_events.rotate_left(3);
    let bundle = TrackerBundle::new(preheat_with(true, true, true), bundle_events)
        .with_validation_mode(ValidationMode::FailFast);

    let result = ValidationEngine::new().validate(&bundle);

    assert_eq!(result.invalid_event_uids(), vec!["EvtUid00004"]);
    assert_eq!(result.reporter().error_count(), 3);
}

#[test]
fn test_sharded_validation_matches_sequential() {
    let bundle = mixed_bundle();
    let engine = ValidationEngine::new();
    let sequential = engine.validate(&bundle);

    for shards in [0, 1, 2, 3, 5, 16] {
        let sharded = engine.validate_sharded(&bundle, shards);
        assert_eq!(
            sharded.reporter().errors(),
            sequential.reporter().errors(),
            "shards = {shards}"
        );
        assert_eq!(sharded.validated_count(), bundle.events().len());
    }
}

#[test]
fn test_large_batch_partitions_every_event() {
    let events: Vec<Event> = (0..20_000)
        .map(|i| {
            let uid = format!("Evt{i:08}");
            if i % 2 == 0 {
                valid_event(&uid)
            } else {
                Event::builder(uid)
                    .program(MetadataIdentifier::of_uid("Unknown0001"))
                    .program_stage(MetadataIdentifier::of_uid(PROGRAM_STAGE_UID))
                    .org_unit(MetadataIdentifier::of_uid(ORG_UNIT_UID))
                    .build()
            }
        })
        .collect();
    let bundle = TrackerBundle::new(preheat_with(true, true, true), events);

    let result = ValidationEngine::new().validate_sharded(&bundle, 4);

    assert_eq!(result.reporter().error_count(), 10_000);
    assert_eq!(result.invalid_event_uids().len(), 10_000);
    assert_eq!(result.valid_events().len(), 10_000);
    assert!(
        result
            .reporter()
            .errors()
            .iter()
            .all(|e| e.error_code == ValidationCode::E1010)
    );
}

struct AlwaysFails;

impl Validator<Event> for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    fn validate(&self, reporter: &mut Reporter, _bundle: &TrackerBundle, event: &Event) {
        reporter.add_unresolved(
            TrackerType::Event,
            &event.uid,
            ValidationCode::E1013,
            &event.program_stage,
        );
    }
}

#[test]
fn test_engine_runs_registered_validators() {
    let bundle = TrackerBundle::new(preheat_with(true, true, true), vec![valid_event("E1")]);
    let engine = ValidationEngine::new().with_validator(AlwaysFails);

    let result = engine.validate(&bundle);

    assert_eq!(engine.validator_names(), vec!["event-meta", "always-fails"]);
    assert!(result.reporter().has_error(ValidationCode::E1013, TrackerType::Event, "E1"));
}

#[test]
fn test_report_serializes_stats_and_errors() {
    let bundle = mixed_bundle();
    let result = ValidationEngine::new().validate(&bundle);

    let json = serde_json::to_value(result.report()).unwrap();

    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["stats"]["total"], 5);
    assert_eq!(json["stats"]["valid"], 3);
    assert_eq!(json["stats"]["invalid"], 2);
    assert_eq!(json["idSchemes"]["id_scheme"], "UID");
    assert_eq!(json["errors"][0]["errorCode"], "E1010");
    assert_eq!(json["errors"][0]["trackerType"], "EVENT");
    assert_eq!(json["errors"][0]["uid"], "EvtUid00002");
}
