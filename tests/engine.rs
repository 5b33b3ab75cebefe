//! End-to-end tests for the integration hub.
//!
//! Covers the cross-department scenarios: rule matching plus handler
//! dispatch, the clinic-finding fast path, and failure isolation.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use stablelink::{
    AutomationRule, CheckupTrigger, Condition, EventStatus, HorseUpdate, IntegrationHub,
    Operator, Payload, RulePatch,
};
use uuid::Uuid;

fn payload(fields: &[(&str, serde_json::Value)]) -> Payload {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn breeding_payload(stallion_status: &str) -> Payload {
    payload(&[
        ("mareName", json!("Bella")),
        ("stallionName", json!("Apollo")),
        ("breedingId", json!("B1")),
        ("mare_health_status", json!("healthy")),
        ("stallion_health_status", json!(stallion_status)),
    ])
}

#[test]
fn healthy_breeding_schedules_checkup_and_fires_rule() {
    let mut hub = IntegrationHub::new();
    let before = Utc::now();

    let id = hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("healthy"));

    let event = hub.event(id).unwrap();
    assert_eq!(event.status, EventStatus::Completed);
    assert!(event.processed_at.is_some());
    assert!(event.error.is_none());

    // Domain handler produced exactly one link, scheduled a week out.
    let links = hub.breeding_clinic_links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].breeding_id, "B1");
    assert_eq!(links[0].trigger, CheckupTrigger::PreBreedingCheckup);
    assert!(links[0].scheduled_date >= before + Duration::days(7));
    assert!(links[0].scheduled_date <= Utc::now() + Duration::days(7));

    // The built-in checkup rule fired (both health statuses healthy).
    let actions = hub.action_log();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].rule_name, "Auto-schedule Pre-breeding Checkup");
    assert_eq!(actions[0].event_id, id);
}

#[test]
fn sick_stallion_skips_rule_but_handler_still_runs() {
    let mut hub = IntegrationHub::new();

    let id = hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("sick"));

    // Rule firing and handler dispatch are independent mechanisms: the
    // conditions failed, but the checkup link is created unconditionally.
    let event = hub.event(id).unwrap();
    assert_eq!(event.status, EventStatus::Completed);
    assert!(hub.action_log().is_empty());

    let links = hub.breeding_clinic_links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].trigger, CheckupTrigger::PreBreedingCheckup);
}

#[test]
fn clinic_finding_fast_path_skips_pipeline() {
    let mut hub = IntegrationHub::new();

    hub.record_clinic_finding(
        "C1",
        "H1",
        payload(&[
            ("healthStatus", json!("impaired")),
            ("breedingEligible", json!(false)),
        ]),
    );

    // Event lands terminal on arrival; no pending/processing phase observed
    // and no rule matching ran, even though a built-in rule listens for
    // health_check_completed with healthStatus "impaired".
    let events = hub.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "health_check_completed");
    assert_eq!(events[0].status, EventStatus::Completed);
    assert!(events[0].processed_at.is_some());
    assert!(hub.action_log().is_empty());

    let links = hub.clinic_horses_links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].clinic_record_id.as_deref(), Some("C1"));
    assert_eq!(links[0].horse_id, "H1");
    assert_eq!(links[0].update, HorseUpdate::HealthCheckResult);
    // requiresFollowUp absent from findings defaults to false.
    assert!(!links[0].follow_up_required);
}

#[test]
fn clinic_finding_reflects_follow_up_flag() {
    let mut hub = IntegrationHub::new();

    hub.record_clinic_finding(
        "C2",
        "H2",
        payload(&[
            ("healthStatus", json!("impaired")),
            ("requiresFollowUp", json!(true)),
        ]),
    );

    assert!(hub.clinic_horses_links()[0].follow_up_required);
}

#[test]
fn health_check_completed_via_pipeline_runs_rules() {
    // The same event type raised through trigger_event does run rule
    // matching, unlike the fast path.
    let mut hub = IntegrationHub::new();

    let id = hub.trigger_event(
        "clinic",
        "horses",
        "health_check_completed",
        payload(&[
            ("horseId", json!("H3")),
            ("clinicRecordId", json!("C3")),
            ("healthStatus", json!("impaired")),
        ]),
    );

    assert_eq!(hub.event(id).unwrap().status, EventStatus::Completed);

    let actions = hub.action_log();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].rule_name, "Flag Impaired Health Check");

    let links = hub.clinic_horses_links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].clinic_record_id.as_deref(), Some("C3"));
}

#[test]
fn failing_handler_marks_event_failed_but_keeps_action_records() {
    let mut hub = IntegrationHub::new();
    hub.add_rule(AutomationRule::new(
        "Foaling Watch",
        "foaling_due",
        "notify_clinic",
        vec![],
    ));

    // The rule fires first; the handler then rejects the unparseable date.
    let id = hub.trigger_event(
        "breeding",
        "clinic",
        "foaling_due",
        payload(&[
            ("breedingId", json!("B9")),
            ("expectedFoalingDate", json!("next spring")),
        ]),
    );

    let event = hub.event(id).unwrap();
    assert_eq!(event.status, EventStatus::Failed);
    assert!(event.processed_at.is_some());
    assert!(event.error.as_deref().unwrap().contains("expectedFoalingDate"));

    // No link, but the already-executed rule action is not rolled back.
    assert!(hub.breeding_clinic_links().is_empty());
    assert_eq!(hub.action_log().len(), 1);
    assert_eq!(hub.action_log()[0].rule_name, "Foaling Watch");
}

#[test]
fn failed_event_does_not_poison_later_events() {
    let mut hub = IntegrationHub::new();

    hub.trigger_event("breeding", "clinic", "foaling_due", Payload::new());
    let ok = hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("healthy"));

    assert_eq!(hub.events()[0].status, EventStatus::Failed);
    assert_eq!(hub.event(ok).unwrap().status, EventStatus::Completed);
    assert_eq!(hub.breeding_clinic_links().len(), 1);
}

#[test]
fn conjunctive_rule_requires_all_conditions() {
    let mut hub = IntegrationHub::bare();
    hub.add_rule(AutomationRule::new(
        "Both Fields",
        "stable_inspection",
        "log_only",
        vec![
            Condition::new("a", Operator::Equals, 1),
            Condition::new("b", Operator::Equals, 2),
        ],
    ));

    hub.trigger_event("barn", "office", "stable_inspection", payload(&[("a", json!(1)), ("b", json!(2))]));
    assert_eq!(hub.action_log().len(), 1);

    hub.trigger_event("barn", "office", "stable_inspection", payload(&[("a", json!(1)), ("b", json!(3))]));
    hub.trigger_event("barn", "office", "stable_inspection", payload(&[("a", json!(9)), ("b", json!(2))]));
    assert_eq!(hub.action_log().len(), 1);
}

#[test]
fn numeric_condition_on_missing_field_fails_safe() {
    let mut hub = IntegrationHub::bare();
    hub.add_rule(AutomationRule::new(
        "Old Enough",
        "stable_inspection",
        "log_only",
        vec![Condition::new("age", Operator::GreaterThan, 5)],
    ));

    // Missing field: condition is false, event still completes.
    let id = hub.trigger_event("barn", "office", "stable_inspection", Payload::new());

    assert_eq!(hub.event(id).unwrap().status, EventStatus::Completed);
    assert!(hub.action_log().is_empty());
}

#[test]
fn status_sequence_is_monotonic() {
    let mut hub = IntegrationHub::new();

    let ok = hub.trigger_event("breeding", "clinic", "pregnancy_confirmed", payload(&[("breedingId", json!("B2"))]));
    let bad = hub.trigger_event("breeding", "clinic", "pregnancy_confirmed", Payload::new());

    let completed = hub.event(ok).unwrap();
    assert_eq!(completed.status, EventStatus::Completed);
    assert!(completed.processed_at.is_some());

    let failed = hub.event(bad).unwrap();
    assert_eq!(failed.status, EventStatus::Failed);
    assert!(failed.processed_at.is_some());
    assert!(failed.error.is_some());
}

#[test]
fn update_unknown_rule_is_noop() {
    let mut hub = IntegrationHub::new();
    let before = hub.rules().len();

    hub.update_rule(
        Uuid::new_v4(),
        RulePatch {
            name: Some("ghost".to_string()),
            enabled: Some(false),
            ..Default::default()
        },
    );

    assert_eq!(hub.rules().len(), before);
    assert!(hub.rules().iter().all(|r| r.name != "ghost"));
}

#[test]
fn disabled_rule_does_not_fire() {
    let mut hub = IntegrationHub::new();
    let checkup_rule = hub
        .rules()
        .iter()
        .find(|r| r.name == "Auto-schedule Pre-breeding Checkup")
        .unwrap()
        .id;

    hub.update_rule(
        checkup_rule,
        RulePatch {
            enabled: Some(false),
            ..Default::default()
        },
    );

    hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("healthy"));

    assert!(hub.action_log().is_empty());
    // Handler still unconditional.
    assert_eq!(hub.breeding_clinic_links().len(), 1);
}

#[test]
fn removed_rule_does_not_fire_and_remove_is_idempotent() {
    let mut hub = IntegrationHub::new();
    let id = hub.rules()[0].id;

    hub.remove_rule(id);
    hub.remove_rule(id);

    assert_eq!(hub.rules().len(), 2);
    hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("healthy"));
    assert!(hub.action_log().is_empty());
}

#[test]
fn multiple_rules_fire_in_registration_order() {
    let mut hub = IntegrationHub::bare();
    hub.add_rule(AutomationRule::new("first", "foaling_due", "log_only", vec![]));
    hub.add_rule(AutomationRule::new("second", "foaling_due", "notify_breeding", vec![]));

    hub.trigger_event(
        "breeding",
        "clinic",
        "foaling_due",
        payload(&[
            ("breedingId", json!("B4")),
            ("expectedFoalingDate", json!("2026-04-01T00:00:00Z")),
        ]),
    );

    let names: Vec<_> = hub.action_log().iter().map(|a| a.rule_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn events_processed_in_call_order() {
    let mut hub = IntegrationHub::new();

    let a = hub.trigger_event("breeding", "clinic", "breeding_scheduled", breeding_payload("healthy"));
    let b = hub.trigger_event("breeding", "clinic", "pregnancy_confirmed", payload(&[("breedingId", json!("B1"))]));

    let ids: Vec<_> = hub.events().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a, b]);
}
