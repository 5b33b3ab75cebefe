//! Fixed table of rule actions.
//!
//! Rule actions are the configurable half of event processing: a rule names
//! one of these routines by string, and the routine runs when the rule fires.
//! Actions only log and create records; there is no rollback, so a record
//! created here survives even if a later step of the same event fails.

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{ActionRecord, AutomationRule, Payload};

/// Execute a rule's target action by name.
///
/// Known actions produce an [`ActionRecord`] for the hub's action log.
/// Unknown names log a warning, produce nothing, and do not fail the event.
pub fn execute(
    event_id: Uuid,
    rule: &AutomationRule,
    payload: &Payload,
) -> Result<Option<ActionRecord>> {
    let record = match rule.target_action.as_str() {
        "notify_clinic" => notify("clinic", event_id, rule, payload),
        "notify_breeding" => notify("breeding", event_id, rule, payload),
        "flag_follow_up" => flag_follow_up(event_id, rule, payload),
        "log_only" => log_only(event_id, rule),
        other => {
            warn!(rule = %rule.name, action = %other, "unknown rule action, skipping");
            return Ok(None);
        }
    };
    Ok(Some(record))
}

fn notify(department: &str, event_id: Uuid, rule: &AutomationRule, payload: &Payload) -> ActionRecord {
    let subject = payload
        .get("horseId")
        .or_else(|| payload.get("breedingId"))
        .and_then(|v| v.as_str())
        .unwrap_or("unspecified");

    info!(rule = %rule.name, department, subject, "notification dispatched");
    ActionRecord::new(
        event_id,
        rule,
        rule.target_action.clone(),
        format!("Notified {} team about {}", department, subject),
    )
}

fn flag_follow_up(event_id: Uuid, rule: &AutomationRule, payload: &Payload) -> ActionRecord {
    let horse = payload
        .get("horseId")
        .and_then(|v| v.as_str())
        .unwrap_or("unspecified");

    info!(rule = %rule.name, horse, "follow-up flag raised");
    ActionRecord::new(
        event_id,
        rule,
        rule.target_action.clone(),
        format!("Flagged {} for follow-up review", horse),
    )
}

fn log_only(event_id: Uuid, rule: &AutomationRule) -> ActionRecord {
    info!(rule = %rule.name, "rule fired");
    ActionRecord::new(event_id, rule, rule.target_action.clone(), "Rule fired")
}
