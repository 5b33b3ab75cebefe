//! Integration events and their lifecycle status.
//!
//! Every cross-department notification is recorded as an event in an
//! append-only log. Events move through a strict lifecycle and become
//! immutable once terminal.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque event payload: module-defined field names mapped to JSON values.
pub type Payload = Map<String, Value>;

/// A single cross-department integration event.
///
/// Created and owned exclusively by the orchestrator. External modules read
/// events from the log for observability; they never mutate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationEvent {
    /// Unique identifier, generated on creation
    pub id: Uuid,

    /// Department that raised the event (e.g. "breeding")
    pub source_module: String,

    /// Department expected to react (e.g. "clinic")
    pub target_module: String,

    /// String key selecting which rules and handlers apply
    pub event_type: String,

    /// Module-defined payload fields
    pub payload: Payload,

    /// Current lifecycle status
    pub status: EventStatus,

    /// When the event was created
    pub created_at: DateTime<Utc>,

    /// Set only when the event reaches a terminal status
    pub processed_at: Option<DateTime<Utc>>,

    /// Error message, present only when status is `Failed`
    pub error: Option<String>,
}

impl IntegrationEvent {
    /// Create a new event in `Pending` status.
    pub fn new(
        source_module: impl Into<String>,
        target_module: impl Into<String>,
        event_type: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_module: source_module.into(),
            target_module: target_module.into(),
            event_type: event_type.into(),
            payload,
            status: EventStatus::Pending,
            created_at: Utc::now(),
            processed_at: None,
            error: None,
        }
    }

    /// Create an event that is terminal on arrival.
    ///
    /// Used by the clinic-finding fast path, which records an already-handled
    /// fact rather than requesting processing.
    pub fn completed(
        source_module: impl Into<String>,
        target_module: impl Into<String>,
        event_type: impl Into<String>,
        payload: Payload,
    ) -> Self {
        let now = Utc::now();
        Self {
            status: EventStatus::Completed,
            created_at: now,
            processed_at: Some(now),
            ..Self::new(source_module, target_module, event_type, payload)
        }
    }

    /// Whether the event has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Lifecycle status of an integration event.
///
/// Strictly monotonic within one processing pass:
/// pending -> processing -> {completed | failed}. Never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Recorded, not yet picked up
    Pending,

    /// Rule matching and handler dispatch in progress
    Processing,

    /// All rule actions and the domain handler succeeded
    Completed,

    /// Some step failed; see the event's `error` field
    Failed,
}

impl EventStatus {
    /// Whether `next` is a valid successor of this status.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Pending, EventStatus::Processing)
                | (EventStatus::Processing, EventStatus::Completed)
                | (EventStatus::Processing, EventStatus::Failed)
        )
    }

    /// Terminal statuses admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, EventStatus::Completed | EventStatus::Failed)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Pending => "pending",
            EventStatus::Processing => "processing",
            EventStatus::Completed => "completed",
            EventStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}
