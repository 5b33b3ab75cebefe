//! The integration hub: façade over the rule registry, event log, and link
//! collections.
//!
//! One hub instance owns all mutable engine state for a process/session.
//! Processing is synchronous and single-writer; every call runs to
//! completion before returning, so events are handled in strict call order
//! with no interleaving. Callers that share a hub across threads must wrap
//! it in their own mutex to keep that property.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    builtin_rules, ActionRecord, AutomationRule, BreedingClinicLink, ClinicHorsesLink,
    EventStatus, HorseUpdate, IntegrationEvent, Payload, RulePatch,
};

use super::actions;
use super::conditions;
use super::event_log::EventLog;
use super::handlers::{self, EventKind, LinkOutcome};
use super::registry::RuleRegistry;

/// Owns the engine state and drives event processing.
#[derive(Debug, Default)]
pub struct IntegrationHub {
    registry: RuleRegistry,
    log: EventLog,
    breeding_clinic: Vec<BreedingClinicLink>,
    clinic_horses: Vec<ClinicHorsesLink>,
    actions: Vec<ActionRecord>,
}

impl IntegrationHub {
    /// Create a hub seeded with the platform's built-in rules.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_rules(builtin_rules()),
            ..Self::default()
        }
    }

    /// Create a hub with no rules registered, for callers that supply their
    /// own rule set.
    pub fn bare() -> Self {
        Self::default()
    }

    /// Raise a cross-department event and process it to a terminal status.
    ///
    /// The returned id can be used to look up the event's outcome in the log.
    /// This method never fails from the caller's point of view: rule-action
    /// and handler errors are captured into the event's `error` field and the
    /// event is marked failed. Rule actions that ran before the failure are
    /// not rolled back.
    #[instrument(skip(self, payload), fields(event_type = %event_type))]
    pub fn trigger_event(
        &mut self,
        source_module: &str,
        target_module: &str,
        event_type: &str,
        payload: Payload,
    ) -> Uuid {
        let event = IntegrationEvent::new(source_module, target_module, event_type, payload);
        let id = self.log.append(event);
        info!(%id, "integration event received");

        self.mark(id, EventStatus::Processing, None);

        match self.process(id, event_type) {
            Ok(()) => {
                info!(%id, "integration event completed");
                self.mark(id, EventStatus::Completed, None);
            }
            Err(e) => {
                warn!(%id, error = %e, "integration event failed");
                self.mark(id, EventStatus::Failed, Some(format!("{e:#}")));
            }
        }

        id
    }

    /// Rule matching, rule actions, then the built-in domain handler.
    fn process(&mut self, event_id: Uuid, event_type: &str) -> Result<()> {
        // Clone what the matched rules and handler need so the log stays
        // untouched while we mutate the side-effect collections.
        let payload = match self.log.get(event_id) {
            Some(event) => event.payload.clone(),
            None => Payload::new(),
        };

        let matched: Vec<AutomationRule> =
            self.registry.matching(event_type).cloned().collect();

        for rule in &matched {
            if !conditions::evaluate(&rule.conditions, &payload) {
                debug!(rule = %rule.name, "conditions not met");
                continue;
            }
            if let Some(record) = actions::execute(event_id, rule, &payload)? {
                self.actions.push(record);
            }
        }

        match EventKind::parse(event_type) {
            None => debug!(event_type, "no built-in handler"),
            Some(kind) => match handlers::dispatch(kind, &payload, Utc::now())? {
                LinkOutcome::BreedingClinic(link) => self.breeding_clinic.push(link),
                LinkOutcome::ClinicHorses(link) => self.clinic_horses.push(link),
            },
        }

        Ok(())
    }

    /// Record findings from a completed clinic visit.
    ///
    /// Fast path: creates the clinic-to-records link directly and appends a
    /// `health_check_completed` event that is terminal on arrival. No rule
    /// matching runs and no pending/processing phase is observed — this
    /// records an already-handled fact, unlike [`Self::trigger_event`] which
    /// requests processing.
    #[instrument(skip(self, findings))]
    pub fn record_clinic_finding(
        &mut self,
        clinic_record_id: &str,
        horse_id: &str,
        findings: Payload,
    ) {
        let follow_up = findings
            .get("requiresFollowUp")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let health_status = findings
            .get("healthStatus")
            .and_then(|v| v.as_str())
            .unwrap_or("unspecified");

        let link = ClinicHorsesLink::new(
            Some(clinic_record_id.to_string()),
            horse_id,
            HorseUpdate::HealthCheckResult,
            format!("Health check result: {}", health_status),
        )
        .with_follow_up(follow_up);
        self.clinic_horses.push(link);

        let mut payload = findings;
        payload.insert("clinicRecordId".to_string(), json!(clinic_record_id));
        payload.insert("horseId".to_string(), json!(horse_id));

        let event =
            IntegrationEvent::completed("clinic", "horses", "health_check_completed", payload);
        let id = self.log.append(event);
        info!(%id, horse_id, "clinic finding recorded");
    }

    // --- rule management ---

    /// Register an automation rule.
    pub fn add_rule(&mut self, rule: AutomationRule) {
        self.registry.add(rule);
    }

    /// Merge a partial update into an existing rule. Unknown ids are ignored.
    pub fn update_rule(&mut self, id: Uuid, patch: RulePatch) {
        self.registry.update(id, patch);
    }

    /// Remove a rule. Idempotent.
    pub fn remove_rule(&mut self, id: Uuid) {
        self.registry.remove(id);
    }

    // --- read-only accessors ---

    /// All integration events, oldest first.
    pub fn events(&self) -> &[IntegrationEvent] {
        self.log.all()
    }

    /// Look up one event by id.
    pub fn event(&self, id: Uuid) -> Option<&IntegrationEvent> {
        self.log.get(id)
    }

    /// All registered rules, including disabled ones.
    pub fn rules(&self) -> &[AutomationRule] {
        self.registry.all()
    }

    /// Breeding-to-clinic links, oldest first.
    pub fn breeding_clinic_links(&self) -> &[BreedingClinicLink] {
        &self.breeding_clinic
    }

    /// Clinic-to-horse-records links, oldest first.
    pub fn clinic_horses_links(&self) -> &[ClinicHorsesLink] {
        &self.clinic_horses
    }

    /// Records of rule actions that have executed.
    pub fn action_log(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Transitions controlled internally by the hub cannot be invalid; if one
    /// is rejected anyway, log it rather than crash the dispatcher.
    fn mark(&mut self, id: Uuid, status: EventStatus, error_msg: Option<String>) {
        if let Err(e) = self.log.transition(id, status, error_msg) {
            error!(%id, error = %e, "event log rejected internal transition");
        }
    }
}
