//! Core engine logic.
//!
//! This module contains:
//! - conditions: rule condition evaluation
//! - registry: the automation rule registry
//! - event_log: append-only event log with lifecycle guards
//! - handlers: built-in domain handlers per event type
//! - actions: the fixed rule-action table
//! - orchestrator: the IntegrationHub façade

pub mod actions;
pub mod conditions;
pub mod event_log;
pub mod handlers;
pub mod orchestrator;
pub mod registry;

// Re-export commonly used types
pub use conditions::evaluate;
pub use event_log::EventLog;
pub use handlers::{
    EventKind, LinkOutcome, FIRST_PREGNANCY_SCAN_DAYS, HEALTH_CHECK_DAYS,
    PRE_BREEDING_CHECKUP_DAYS,
};
pub use orchestrator::IntegrationHub;
pub use registry::RuleRegistry;
