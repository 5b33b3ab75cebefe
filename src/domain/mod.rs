//! Domain types for the integration engine.
//!
//! This module contains the core data structures:
//! - Events: cross-department notifications with lifecycle status
//! - Rules: declarative automation rules and their conditions
//! - Links: cross-module records created when events are processed

pub mod events;
pub mod links;
pub mod rules;

// Re-export commonly used types
pub use events::{EventStatus, IntegrationEvent, Payload};
pub use links::{BreedingClinicLink, CheckupTrigger, ClinicHorsesLink, HorseUpdate, LinkStatus};
pub use rules::{builtin_rules, ActionRecord, AutomationRule, Condition, Operator, RulePatch};
