//! stablelink - cross-department integration engine for equine operations
//!
//! Lets one department (breeding, clinic, horse records) raise a domain event
//! and have it automatically trigger actions in another, governed by
//! declarative automation rules.
//!
//! # Architecture
//!
//! - Every notification is an immutable event in an append-only log, moving
//!   through a strict lifecycle: pending -> processing -> completed/failed
//! - Automation rules are matched conjunctively against the event payload and
//!   dispatch record-creation/logging actions
//! - Built-in domain handlers always run for known event types and produce
//!   cross-module integration links with computed follow-up dates
//! - All failures are absorbed at the hub boundary: the dispatcher never
//!   crashes, callers inspect the event log for failed entries
//!
//! # Modules
//!
//! - `core`: engine logic (conditions, registry, event log, handlers, hub)
//! - `domain`: data structures (events, rules, links)
//! - `errors`: internal error taxonomy
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use stablelink::{EventStatus, IntegrationHub};
//!
//! let mut hub = IntegrationHub::new();
//! let payload = [("breedingId".to_string(), json!("B1"))].into_iter().collect();
//! let id = hub.trigger_event("breeding", "clinic", "breeding_scheduled", payload);
//!
//! let event = hub.event(id).unwrap();
//! assert_eq!(event.status, EventStatus::Completed);
//! assert_eq!(hub.breeding_clinic_links().len(), 1);
//! ```

pub mod core;
pub mod domain;
pub mod errors;

// Re-export main types at crate root for convenience
pub use core::{EventKind, EventLog, IntegrationHub, LinkOutcome, RuleRegistry};
pub use domain::{
    builtin_rules, ActionRecord, AutomationRule, BreedingClinicLink, CheckupTrigger,
    ClinicHorsesLink, Condition, EventStatus, HorseUpdate, IntegrationEvent, LinkStatus,
    Operator, Payload, RulePatch,
};
pub use errors::IntegrationError;
