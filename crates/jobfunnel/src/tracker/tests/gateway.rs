use super::common::*;
use crate::tracker::domain::{ApplicationId, ApplicationNote, ApplicationPatch, ApplicationStatus};
use crate::tracker::gateway::{ApplicationGateway, GatewayError};
use crate::tracker::validation::ValidationError;

#[test]
fn create_assigns_sequential_ids() {
    let gateway = memory_gateway();

    let first = gateway.create(draft("Acme")).expect("create");
    let second = gateway.create(draft("Globex")).expect("create");

    assert_eq!(first.id, ApplicationId::from("app-000001"));
    assert_eq!(second.id, ApplicationId::from("app-000002"));
}

#[test]
fn create_seeds_applied_event_on_applied_date() {
    let gateway = memory_gateway();
    let mut without_date = draft("Acme");
    without_date.applied_date = None;

    let created = gateway.create(without_date).expect("create");

    assert_eq!(created.applied_date, date(1));
    assert_eq!(created.status_history.len(), 1);
    assert_eq!(created.status_history[0].occur_date, date(1));
    assert_eq!(created.status_history[0].status, ApplicationStatus::Applied);
}

#[test]
fn create_keeps_supplied_history() {
    let gateway = memory_gateway();

    let created = gateway.create(interviewed_draft("Acme")).expect("create");

    assert_eq!(created.status_history.len(), 3);
    assert!(created.has_status(ApplicationStatus::Screen));
    assert_eq!(created.latest_status(), Some(ApplicationStatus::Interview));
}

#[test]
fn create_trims_company_and_role() {
    let gateway = memory_gateway();
    let mut padded = draft("  Acme  ");
    padded.role = " SRE ".to_string();

    let created = gateway.create(padded).expect("create");

    assert_eq!(created.company, "Acme");
    assert_eq!(created.role, "SRE");
}

#[test]
fn create_rejects_synthetic_no_offer_status() {
    let gateway = memory_gateway();
    let draft = draft("Acme").with_status(date(3), ApplicationStatus::NoOffer);

    match gateway.create(draft) {
        Err(GatewayError::Validation(ValidationError::SyntheticStatus(status))) => {
            assert_eq!(status, ApplicationStatus::NoOffer)
        }
        other => panic!("expected synthetic status rejection, got {other:?}"),
    }
    assert!(gateway.is_empty());
}

#[test]
fn update_applies_only_present_fields() {
    let gateway = memory_gateway();
    let created = gateway.create(draft("Acme")).expect("create");

    let patch = ApplicationPatch {
        recruiter_name: Some("Dana".to_string()),
        top_job: Some(true),
        notes: Some(vec![ApplicationNote {
            occur_date: date(4),
            description: "Sent thank-you note".to_string(),
        }]),
        ..ApplicationPatch::default()
    };
    let updated = gateway.update(&created.id, patch).expect("update");

    assert_eq!(updated.company, "Acme");
    assert_eq!(updated.salary, "$150k");
    assert_eq!(updated.recruiter_name, "Dana");
    assert!(updated.top_job);
    assert_eq!(updated.notes.len(), 1);
    assert_eq!(gateway.fetch(&created.id).expect("fetch"), updated);
}

#[test]
fn empty_patch_returns_record_unchanged() {
    let gateway = memory_gateway();
    let created = gateway.create(draft("Acme")).expect("create");

    let patch = ApplicationPatch::default();
    assert!(patch.is_empty());
    let updated = gateway.update(&created.id, patch).expect("update");

    assert_eq!(updated, created);
}

#[test]
fn delete_twice_reports_not_found() {
    let gateway = memory_gateway();
    let created = gateway.create(draft("Acme")).expect("create");

    gateway.delete(&created.id).expect("first delete");
    match gateway.delete(&created.id) {
        Err(GatewayError::NotFound(id)) => assert_eq!(id, created.id),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn application_json_uses_camel_case_wire_names() {
    let gateway = memory_gateway();
    let created = gateway.create(interviewed_draft("Acme")).expect("create");

    let json = serde_json::to_value(&created).expect("serializes");

    assert_eq!(json["id"], "app-000001");
    assert_eq!(json["appliedDate"], "2025-07-01");
    assert_eq!(json["topJob"], false);
    assert_eq!(json["status"][1]["status"], "SCREEN");
    assert_eq!(json["status"][1]["occurDate"], "2025-07-08");
}
