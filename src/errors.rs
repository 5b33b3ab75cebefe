//! Error taxonomy for the integration engine.
//!
//! Business-level failures (rule actions, domain handlers) travel as
//! `anyhow::Error` and are absorbed at the orchestrator boundary into the
//! event's `error` field. The variants here are internal guards that should
//! not be reachable through the public API in correct usage.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::EventStatus;

/// Internal invariant violations in the event log.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// A status transition was attempted out of lifecycle order.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: EventStatus, to: EventStatus },

    /// A transition referenced an event id not present in the log.
    #[error("unknown event: {0}")]
    UnknownEvent(Uuid),
}
