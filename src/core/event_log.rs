//! Append-only, in-memory log of integration events.
//!
//! Status transitions are the only mutation path; a transition that is not a
//! valid lifecycle successor is rejected. The log is unbounded; callers
//! needing pruning or persistence must snapshot externally.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{EventStatus, IntegrationEvent};
use crate::errors::IntegrationError;

/// In-memory event log, ordered oldest first.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<IntegrationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its id.
    pub fn append(&mut self, event: IntegrationEvent) -> Uuid {
        let id = event.id;
        self.events.push(event);
        id
    }

    /// Move an event to a new lifecycle status.
    ///
    /// On a terminal transition the `processed_at` timestamp is stamped and
    /// the error message (if any) is stored. Rejects transitions that are not
    /// valid successors and ids not present in the log.
    pub fn transition(
        &mut self,
        id: Uuid,
        next: EventStatus,
        error: Option<String>,
    ) -> Result<(), IntegrationError> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(IntegrationError::UnknownEvent(id))?;

        if !event.status.can_transition_to(next) {
            return Err(IntegrationError::InvalidTransition {
                from: event.status,
                to: next,
            });
        }

        event.status = next;
        if next.is_terminal() {
            event.processed_at = Some(Utc::now());
            event.error = error;
        }
        Ok(())
    }

    /// Look up an event by id.
    pub fn get(&self, id: Uuid) -> Option<&IntegrationEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// All events, oldest first.
    pub fn all(&self) -> &[IntegrationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
