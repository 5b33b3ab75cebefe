//! Integration links: cross-module records created as side effects of
//! event processing.
//!
//! Two concrete flavors exist, structurally identical in role: breeding
//! department to clinic (scheduled checkups and scans) and clinic to horse
//! records (health status updates). Links are created once by a domain
//! handler and read-only afterward; the owning module is responsible for
//! consuming and closing them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a scheduled follow-up link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Awaiting action by the owning module
    #[default]
    Pending,

    /// Closed by the owning module
    Completed,

    /// Abandoned by the owning module
    Cancelled,
}

/// Why a breeding-to-clinic link was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckupTrigger {
    /// Health screening before a scheduled breeding
    PreBreedingCheckup,

    /// First ultrasound after a confirmed pregnancy
    FirstPregnancyScan,

    /// Clinic presence around an expected foaling date
    FoalingPreparation,
}

/// A clinic appointment scheduled on behalf of the breeding department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedingClinicLink {
    /// Unique identifier
    pub id: Uuid,

    /// The originating breeding record
    pub breeding_id: String,

    /// Why this appointment exists
    pub trigger: CheckupTrigger,

    /// Pending until the clinic acts on it
    pub status: LinkStatus,

    /// When the clinic visit should happen
    pub scheduled_date: DateTime<Utc>,

    /// Free-text context for clinic staff
    pub notes: String,

    /// When the link was created
    pub created_at: DateTime<Utc>,
}

impl BreedingClinicLink {
    pub fn new(
        breeding_id: impl Into<String>,
        trigger: CheckupTrigger,
        scheduled_date: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            breeding_id: breeding_id.into(),
            trigger,
            status: LinkStatus::default(),
            scheduled_date,
            notes: notes.into(),
            created_at: Utc::now(),
        }
    }
}

/// What kind of horse-record update a clinic link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorseUpdate {
    /// A health check was requested and should be scheduled
    HealthCheckRequested,

    /// A completed health check produced findings to fold into the record
    HealthCheckResult,
}

/// A horse-record update raised by the clinic department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicHorsesLink {
    /// Unique identifier
    pub id: Uuid,

    /// The originating clinic record, when one exists
    pub clinic_record_id: Option<String>,

    /// The horse this update concerns
    pub horse_id: String,

    /// Why this link was created
    pub update: HorseUpdate,

    /// Pending until the records module consumes it
    pub status: LinkStatus,

    /// Whether clinic findings call for a follow-up visit
    pub follow_up_required: bool,

    /// Set for scheduled requests, absent for result records
    pub scheduled_date: Option<DateTime<Utc>>,

    /// Free-text context for records staff
    pub notes: String,

    /// When the link was created
    pub created_at: DateTime<Utc>,
}

impl ClinicHorsesLink {
    pub fn new(
        clinic_record_id: Option<String>,
        horse_id: impl Into<String>,
        update: HorseUpdate,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            clinic_record_id,
            horse_id: horse_id.into(),
            update,
            status: LinkStatus::default(),
            follow_up_required: false,
            scheduled_date: None,
            notes: notes.into(),
            created_at: Utc::now(),
        }
    }

    /// Mark the link as requiring a follow-up visit.
    pub fn with_follow_up(mut self, follow_up_required: bool) -> Self {
        self.follow_up_required = follow_up_required;
        self
    }

    /// Attach a scheduled date (used for health check requests).
    pub fn with_scheduled_date(mut self, scheduled_date: DateTime<Utc>) -> Self {
        self.scheduled_date = Some(scheduled_date);
        self
    }
}
