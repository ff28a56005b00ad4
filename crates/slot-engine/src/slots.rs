//! The availability calculator: one day of candidate slots for one professional.
//!
//! Candidates start at the beginning of the shift and step forward by the slot
//! interval. A candidate is only emitted when the whole service fits before the
//! shift ends. Each emitted slot is then judged, first match wins:
//!
//! 1. starts before `now + lead time` → unavailable (too soon)
//! 2. overlaps an active appointment → unavailable
//! 3. overlaps an approved schedule block → unavailable
//! 4. otherwise → available
//!
//! Every candidate is returned, available or not, in ascending start order.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::booking::{Appointment, ScheduleBlock};
use crate::clock::Clock;
use crate::config::BookingPolicy;
use crate::conflict::{self, ConflictKind, Interval};
use crate::dst::resolve_local;
use crate::error::{Result, SlotError};
use crate::hours::DayAvailability;

/// A bookable (or not) start time for one service on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// `HH:MM` in the tenant's local wall clock.
    pub time: String,
    pub starts_at: DateTime<Utc>,
    /// `starts_at` plus the service duration.
    pub ends_at: DateTime<Utc>,
    pub is_available: bool,
    /// Which rule made the slot unavailable. `None` for available slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Unavailable>,
}

impl TimeSlot {
    pub fn interval(&self) -> Interval {
        Interval::new(self.starts_at, self.ends_at)
    }
}

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unavailable {
    /// Starts before the minimum lead time has elapsed.
    TooSoon,
    Appointment,
    Block,
}

impl From<ConflictKind> for Unavailable {
    fn from(kind: ConflictKind) -> Self {
        match kind {
            ConflictKind::Appointment => Self::Appointment,
            ConflictKind::Block => Self::Block,
        }
    }
}

/// Validated scalars for one invocation, with "now" already folded into the
/// lead-time threshold.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlotParams {
    tz: Tz,
    duration: Duration,
    interval: Duration,
    min_bookable: DateTime<Utc>,
}

impl SlotParams {
    pub(crate) fn resolve(
        service_duration_min: u32,
        policy: &BookingPolicy,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if service_duration_min == 0 {
            return Err(SlotError::InvalidConfiguration(
                "service duration must be a positive number of minutes".to_string(),
            ));
        }
        let tz = policy.validate()?;
        let min_bookable = now.checked_add_signed(policy.lead_time()?).ok_or_else(|| {
            SlotError::InvalidConfiguration(format!(
                "lead time of {} hours runs past the end of the calendar",
                policy.booking_lead_hours
            ))
        })?;
        Ok(Self {
            tz,
            duration: Duration::minutes(i64::from(service_duration_min)),
            interval: policy.slot_interval(),
            min_bookable,
        })
    }
}

/// Compute every candidate slot for `date`, each flagged available or not.
///
/// `appointments` and `blocks` should already be narrowed to one professional;
/// they are filtered here by status only. Entries on other days are harmless
/// since they cannot overlap.
///
/// `clock` is read once; all slots are judged against that single instant.
///
/// A closed day, or a shift whose end is not after its start, yields an empty
/// list rather than an error.
///
/// # Errors
/// - `SlotError::InvalidConfiguration` if `service_duration_min` is zero, the
///   policy's slot interval is zero, or its lead time is negative or so large
///   that `now + lead` leaves the representable calendar.
/// - `SlotError::InvalidTimezone` if the policy's timezone is unknown.
pub fn compute_slots(
    date: NaiveDate,
    hours: &DayAvailability,
    appointments: &[Appointment],
    blocks: &[ScheduleBlock],
    service_duration_min: u32,
    policy: &BookingPolicy,
    clock: &dyn Clock,
) -> Result<Vec<TimeSlot>> {
    let params = SlotParams::resolve(service_duration_min, policy, clock.now())?;
    slots_for_day(date, hours, appointments, blocks, &params)
}

/// [`compute_slots`] filtered to the slots that can be booked.
///
/// # Errors
/// Same as [`compute_slots`].
pub fn available_slots(
    date: NaiveDate,
    hours: &DayAvailability,
    appointments: &[Appointment],
    blocks: &[ScheduleBlock],
    service_duration_min: u32,
    policy: &BookingPolicy,
    clock: &dyn Clock,
) -> Result<Vec<TimeSlot>> {
    let slots = compute_slots(
        date,
        hours,
        appointments,
        blocks,
        service_duration_min,
        policy,
        clock,
    )?;
    Ok(only_available(slots))
}

/// Keep only the available slots, preserving order.
pub fn only_available(slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.into_iter().filter(|s| s.is_available).collect()
}

pub(crate) fn slots_for_day(
    date: NaiveDate,
    hours: &DayAvailability,
    appointments: &[Appointment],
    blocks: &[ScheduleBlock],
    params: &SlotParams,
) -> Result<Vec<TimeSlot>> {
    let (start, end) = match *hours {
        DayAvailability::Closed => {
            debug!(%date, "closed day, no slots");
            return Ok(Vec::new());
        }
        DayAvailability::Open { start, end } => (start, end),
    };
    if end <= start {
        debug!(%date, %start, %end, "shift ends before it starts, no slots");
        return Ok(Vec::new());
    }

    // Resolved bounds can still collapse around a spring-forward gap.
    let work_start = resolve_local(&params.tz, date.and_time(start))?;
    let work_end = resolve_local(&params.tz, date.and_time(end))?;
    if work_end <= work_start {
        debug!(%date, %start, %end, "shift collapses across a DST gap, no slots");
        return Ok(Vec::new());
    }

    let active_appointments: Vec<&Appointment> =
        appointments.iter().filter(|a| a.is_active()).collect();
    let approved_blocks: Vec<&ScheduleBlock> =
        blocks.iter().filter(|b| b.is_approved()).collect();

    let mut slots = Vec::new();
    let mut cursor = work_start;

    while cursor < work_end {
        let slot_end = cursor + params.duration;
        // The whole service must fit inside the shift.
        if slot_end > work_end {
            break;
        }

        let candidate = Interval::new(cursor, slot_end);
        let reason = if cursor < params.min_bookable {
            Some(Unavailable::TooSoon)
        } else {
            conflict::first_conflict(&candidate, &active_appointments, &approved_blocks)
                .map(Unavailable::from)
        };

        let time = cursor.with_timezone(&params.tz).format("%H:%M").to_string();
        trace!(%time, ?reason, "slot");
        slots.push(TimeSlot {
            time,
            starts_at: cursor,
            ends_at: slot_end,
            is_available: reason.is_none(),
            reason,
        });

        cursor += params.interval;
    }

    debug!(
        %date,
        total = slots.len(),
        available = slots.iter().filter(|s| s.is_available).count(),
        "computed slots"
    );
    Ok(slots)
}
