//! Multi-day availability scan for the booking page's date picker.
//!
//! Runs the calculator once per day over a window starting at a given date and
//! reports which days have anything bookable. "Now" is read once for the whole
//! scan so that every day is judged against the same instant.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::{Appointment, ScheduleBlock};
use crate::clock::Clock;
use crate::config::BookingPolicy;
use crate::error::{Result, SlotError};
use crate::hours::WeeklySchedule;
use crate::slots::{slots_for_day, SlotParams};

/// A run of consecutive days to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub from: NaiveDate,
    pub days: u32,
}

/// Summary of one day in a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOption {
    pub date: NaiveDate,
    pub has_availability: bool,
    pub available_count: usize,
}

/// Summarize availability for each day of `window`.
///
/// `window.days` is capped at the policy's `max_booking_days`. Days come back
/// in calendar order, closed days included (with `has_availability = false`).
///
/// # Errors
/// Same as [`compute_slots`](crate::compute_slots), plus
/// `SlotError::InvalidTime` for a malformed working-hours time on any scanned
/// day, and `SlotError::InvalidConfiguration` if the window runs past the end
/// of the supported calendar.
pub fn scan_days(
    window: ScanWindow,
    schedule: &WeeklySchedule,
    appointments: &[Appointment],
    blocks: &[ScheduleBlock],
    service_duration_min: u32,
    policy: &BookingPolicy,
    clock: &dyn Clock,
) -> Result<Vec<DayOption>> {
    let params = SlotParams::resolve(service_duration_min, policy, clock.now())?;
    let days = window.days.min(policy.max_booking_days);
    if days < window.days {
        debug!(
            requested = window.days,
            allowed = policy.max_booking_days,
            "scan window capped"
        );
    }

    (0..days)
        .map(|offset| {
            let date = window
                .from
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    SlotError::InvalidConfiguration(format!(
                        "{} + {} days is out of range",
                        window.from, offset
                    ))
                })?;
            let hours = schedule.for_date(date)?;
            let slots = slots_for_day(date, &hours, appointments, blocks, &params)?;
            let available_count = slots.iter().filter(|s| s.is_available).count();
            Ok(DayOption {
                date,
                has_availability: available_count > 0,
                available_count,
            })
        })
        .collect()
}
