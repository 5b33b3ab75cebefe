//! Built-in domain handlers, one per known event type.
//!
//! Handlers are the non-configurable half of event processing: they always
//! run for their event type, independent of any automation rules. Each one
//! computes a scheduled date from the payload and/or a fixed offset and
//! produces an integration link. The outcome variant decides which link
//! collection the orchestrator appends to.
//!
//! Handlers are pure over (payload, now); failures bubble as errors and are
//! absorbed at the orchestrator boundary, so a bad payload can only fail its
//! own event.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    BreedingClinicLink, CheckupTrigger, ClinicHorsesLink, HorseUpdate, Payload,
};

/// Days between a scheduled breeding and its pre-breeding checkup.
pub const PRE_BREEDING_CHECKUP_DAYS: i64 = 7;

/// Days between a confirmed pregnancy and the first ultrasound scan.
pub const FIRST_PREGNANCY_SCAN_DAYS: i64 = 30;

/// Days within which a requested health check should happen.
pub const HEALTH_CHECK_DAYS: i64 = 3;

/// Event types with a built-in domain handler.
///
/// The public API keeps event types as strings so unknown types still flow
/// through rule matching; parsing to this enum happens just before dispatch,
/// and an unparseable type means no built-in side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    BreedingScheduled,
    PregnancyConfirmed,
    FoalingDue,
    HealthCheckNeeded,
    HealthCheckCompleted,
}

impl EventKind {
    /// Parse a wire event type. Unknown strings yield `None` (no-op dispatch).
    pub fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "breeding_scheduled" => Some(Self::BreedingScheduled),
            "pregnancy_confirmed" => Some(Self::PregnancyConfirmed),
            "foaling_due" => Some(Self::FoalingDue),
            "health_check_needed" => Some(Self::HealthCheckNeeded),
            "health_check_completed" => Some(Self::HealthCheckCompleted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreedingScheduled => "breeding_scheduled",
            Self::PregnancyConfirmed => "pregnancy_confirmed",
            Self::FoalingDue => "foaling_due",
            Self::HealthCheckNeeded => "health_check_needed",
            Self::HealthCheckCompleted => "health_check_completed",
        }
    }
}

/// What a handler produced, tagged by destination collection.
#[derive(Debug, Clone)]
pub enum LinkOutcome {
    BreedingClinic(BreedingClinicLink),
    ClinicHorses(ClinicHorsesLink),
}

/// Run the built-in handler for a known event type.
pub fn dispatch(kind: EventKind, payload: &Payload, now: DateTime<Utc>) -> Result<LinkOutcome> {
    match kind {
        EventKind::BreedingScheduled => breeding_scheduled(payload, now),
        EventKind::PregnancyConfirmed => pregnancy_confirmed(payload, now),
        EventKind::FoalingDue => foaling_due(payload),
        EventKind::HealthCheckNeeded => health_check_needed(payload, now),
        EventKind::HealthCheckCompleted => health_check_completed(payload),
    }
}

fn breeding_scheduled(payload: &Payload, now: DateTime<Utc>) -> Result<LinkOutcome> {
    let breeding_id = str_field(payload, "breedingId")?;
    let mare = opt_str_field(payload, "mareName").unwrap_or("unknown mare");
    let stallion = opt_str_field(payload, "stallionName").unwrap_or("unknown stallion");

    let link = BreedingClinicLink::new(
        breeding_id,
        CheckupTrigger::PreBreedingCheckup,
        now + Duration::days(PRE_BREEDING_CHECKUP_DAYS),
        format!("Pre-breeding checkup for {} x {}", mare, stallion),
    );
    Ok(LinkOutcome::BreedingClinic(link))
}

fn pregnancy_confirmed(payload: &Payload, now: DateTime<Utc>) -> Result<LinkOutcome> {
    let breeding_id = str_field(payload, "breedingId")?;
    let mare = opt_str_field(payload, "mareName").unwrap_or("unknown mare");

    let link = BreedingClinicLink::new(
        breeding_id,
        CheckupTrigger::FirstPregnancyScan,
        now + Duration::days(FIRST_PREGNANCY_SCAN_DAYS),
        format!("First pregnancy scan for {}", mare),
    );
    Ok(LinkOutcome::BreedingClinic(link))
}

fn foaling_due(payload: &Payload) -> Result<LinkOutcome> {
    let breeding_id = str_field(payload, "breedingId")?;

    // The foaling date is caller-supplied, not offset-derived.
    let due = str_field(payload, "expectedFoalingDate")?;
    let scheduled = DateTime::parse_from_rfc3339(due)
        .with_context(|| format!("invalid expectedFoalingDate: {due}"))?
        .with_timezone(&Utc);

    let mare = opt_str_field(payload, "mareName").unwrap_or("unknown mare");
    let link = BreedingClinicLink::new(
        breeding_id,
        CheckupTrigger::FoalingPreparation,
        scheduled,
        format!("Foaling preparation for {}", mare),
    );
    Ok(LinkOutcome::BreedingClinic(link))
}

fn health_check_needed(payload: &Payload, now: DateTime<Utc>) -> Result<LinkOutcome> {
    let horse_id = str_field(payload, "horseId")?;
    let reason = opt_str_field(payload, "reason").unwrap_or("routine");

    let link = ClinicHorsesLink::new(
        None,
        horse_id,
        HorseUpdate::HealthCheckRequested,
        format!("Health check requested: {}", reason),
    )
    .with_scheduled_date(now + Duration::days(HEALTH_CHECK_DAYS));
    Ok(LinkOutcome::ClinicHorses(link))
}

fn health_check_completed(payload: &Payload) -> Result<LinkOutcome> {
    let horse_id = str_field(payload, "horseId")?;
    let clinic_record_id = opt_str_field(payload, "clinicRecordId").map(str::to_string);
    let health_status = opt_str_field(payload, "healthStatus").unwrap_or("unspecified");
    let follow_up = payload
        .get("requiresFollowUp")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let link = ClinicHorsesLink::new(
        clinic_record_id,
        horse_id,
        HorseUpdate::HealthCheckResult,
        format!("Health check result: {}", health_status),
    )
    .with_follow_up(follow_up);
    Ok(LinkOutcome::ClinicHorses(link))
}

fn str_field<'a>(payload: &'a Payload, name: &str) -> Result<&'a str> {
    payload
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("missing or non-string payload field `{name}`"))
}

fn opt_str_field<'a>(payload: &'a Payload, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(|v| v.as_str())
}
