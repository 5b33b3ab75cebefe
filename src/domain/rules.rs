//! Automation rules: declarative, conditionally-gated event-to-action mappings.
//!
//! Rules are editable at runtime without code changes. A rule fires for an
//! event only if it is enabled, its source event matches the event type, and
//! every condition holds (AND semantics).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A declarative automation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name, shown in dashboards
    pub name: String,

    /// Event type this rule listens for
    pub source_event: String,

    /// Action name dispatched through the fixed action table
    pub target_action: String,

    /// All conditions must hold for the rule to fire (AND semantics)
    pub conditions: Vec<Condition>,

    /// Disabled rules never fire but stay registered
    pub enabled: bool,

    /// When the rule was registered
    pub created_at: DateTime<Utc>,
}

impl AutomationRule {
    /// Create an enabled rule with a fresh id.
    pub fn new(
        name: impl Into<String>,
        source_event: impl Into<String>,
        target_action: impl Into<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source_event: source_event.into(),
            target_action: target_action.into(),
            conditions,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    /// Create the rule disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Merge a partial update into this rule. Unset fields are left alone.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(source_event) = patch.source_event {
            self.source_event = source_event;
        }
        if let Some(target_action) = patch.target_action {
            self.target_action = target_action;
        }
        if let Some(conditions) = patch.conditions {
            self.conditions = conditions;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

/// Partial rule update, merged field-by-field into an existing rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulePatch {
    pub name: Option<String>,
    pub source_event: Option<String>,
    pub target_action: Option<String>,
    pub conditions: Option<Vec<Condition>>,
    pub enabled: Option<bool>,
}

/// A single field test against an event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Payload field name
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Value the payload field is compared against
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Comparison operators available to rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Strict value equality, no type coercion
    Equals,

    /// Strict value inequality
    NotEquals,

    /// Numeric comparison; false when either side is non-numeric
    GreaterThan,

    /// Numeric comparison; false when either side is non-numeric
    LessThan,

    /// Substring test over stringified scalars
    Contains,
}

/// Record of a rule action that executed for an event.
///
/// Rule actions are logging/record-creation only; these records are the
/// observable side-effect trail and are never rolled back, even when a later
/// step of the same event fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Unique identifier
    pub id: Uuid,

    /// The event that triggered the rule
    pub event_id: Uuid,

    /// The rule that fired
    pub rule_id: Uuid,

    /// Rule name at the time of firing
    pub rule_name: String,

    /// Action name that was executed
    pub action: String,

    /// Human-readable description of what the action did
    pub detail: String,

    /// When the action executed
    pub created_at: DateTime<Utc>,
}

impl ActionRecord {
    pub fn new(
        event_id: Uuid,
        rule: &AutomationRule,
        action: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            action: action.into(),
            detail: detail.into(),
            created_at: Utc::now(),
        }
    }
}

/// Rules the platform ships with, seeded into every new hub.
pub fn builtin_rules() -> Vec<AutomationRule> {
    vec![
        AutomationRule::new(
            "Auto-schedule Pre-breeding Checkup",
            "breeding_scheduled",
            "notify_clinic",
            vec![
                Condition::new("mare_health_status", Operator::Equals, "healthy"),
                Condition::new("stallion_health_status", Operator::Equals, "healthy"),
            ],
        ),
        AutomationRule::new(
            "Pregnancy Scan Reminder",
            "pregnancy_confirmed",
            "notify_clinic",
            vec![],
        ),
        AutomationRule::new(
            "Flag Impaired Health Check",
            "health_check_completed",
            "flag_follow_up",
            vec![Condition::new("healthStatus", Operator::Equals, "impaired")],
        ),
    ]
}
