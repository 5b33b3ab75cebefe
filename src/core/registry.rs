//! In-memory registry of automation rules.
//!
//! Rules are held in registration order; matching preserves that order.

use tracing::debug;
use uuid::Uuid;

use crate::domain::{AutomationRule, RulePatch};

/// Holds the automation rules known to one hub.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<AutomationRule>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with rules.
    pub fn with_rules(rules: Vec<AutomationRule>) -> Self {
        Self { rules }
    }

    /// Register a rule. Appended after existing rules.
    pub fn add(&mut self, rule: AutomationRule) {
        debug!(rule = %rule.name, source_event = %rule.source_event, "rule registered");
        self.rules.push(rule);
    }

    /// Merge a partial update into the rule with the given id.
    ///
    /// An unknown id is a silent no-op: it neither errors nor creates a rule.
    pub fn update(&mut self, id: Uuid, patch: RulePatch) {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => rule.apply(patch),
            None => debug!(%id, "update for unknown rule ignored"),
        }
    }

    /// Remove the rule with the given id. Idempotent.
    pub fn remove(&mut self, id: Uuid) {
        self.rules.retain(|r| r.id != id);
    }

    /// Enabled rules listening for the given event type, in registration order.
    pub fn matching<'a>(
        &'a self,
        event_type: &'a str,
    ) -> impl Iterator<Item = &'a AutomationRule> {
        self.rules
            .iter()
            .filter(move |r| r.enabled && r.source_event == event_type)
    }

    /// All registered rules, including disabled ones.
    pub fn all(&self) -> &[AutomationRule] {
        &self.rules
    }
}
