//! Eligibility gate.
//!
//! Pure decision logic for whether a user may submit a new
//! application to an event. The application service consults this
//! gate inside its create operation, so direct API submissions are
//! subject to the same rules as the rendered form.

use chrono::{DateTime, Utc};

use super::event::Event;

/// Why a submission is not permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// Event is not accepting applications (`is_active == false`).
    EventClosed,
    /// The application deadline has passed.
    DeadlinePassed,
    /// The event has reached its maximum participant count.
    AtCapacity,
    /// The user already has an application for this event.
    AlreadyApplied,
}

impl Ineligibility {
    /// Human-readable reason surfaced to the applicant.
    pub fn message(&self) -> &'static str {
        match self {
            Ineligibility::EventClosed => "This event is no longer accepting applications",
            Ineligibility::DeadlinePassed => "The application deadline has passed",
            Ineligibility::AtCapacity => "This event is at full capacity",
            Ineligibility::AlreadyApplied => "You have already applied to this event",
        }
    }
}

/// Decide whether a new application may be created.
///
/// All four conditions must hold: the event is active, the deadline
/// (if any) has not passed, capacity (if bounded) is not reached, and
/// the user has no existing application for the event. The capacity
/// check is read-then-decide with no isolation guarantee; the
/// duplicate check is backed by the storage constraint.
pub fn check_eligibility(
    event: &Event,
    application_count: u64,
    already_applied: bool,
    now: DateTime<Utc>,
) -> Result<(), Ineligibility> {
    if !event.is_active {
        return Err(Ineligibility::EventClosed);
    }

    if let Some(deadline) = event.application_deadline {
        if now > deadline {
            return Err(Ineligibility::DeadlinePassed);
        }
    }

    if let Some(max) = event.max_participants {
        if application_count >= max as u64 {
            return Err(Ineligibility::AtCapacity);
        }
    }

    if already_applied {
        return Err(Ineligibility::AlreadyApplied);
    }

    Ok(())
}
