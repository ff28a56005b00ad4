//! A self-contained availability request, as exchanged with the web app and CLI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::{Appointment, ScheduleBlock};
use crate::calendar::{scan_days, DayOption, ScanWindow};
use crate::clock::Clock;
use crate::config::BookingPolicy;
use crate::conflict::{find_conflicts, Conflict, Interval};
use crate::error::Result;
use crate::hours::{WeeklySchedule, WorkingHours};
use crate::slots::{compute_slots, TimeSlot};

/// Everything the calculator needs about one professional, as JSON.
///
/// `workingHours` may hold the whole week or just the rule for `date`; the
/// rule matching `date`'s weekday is picked either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub schedule_blocks: Vec<ScheduleBlock>,
    pub service_duration_min: u32,
}

impl SlotRequest {
    /// # Errors
    /// Returns `SlotError::JsonParse` if `json` does not describe a request.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns `SlotError::InvalidWorkingHours` for an out-of-range weekday.
    pub fn schedule(&self) -> Result<WeeklySchedule> {
        WeeklySchedule::new(self.working_hours.clone())
    }

    /// Slots for `date`. See [`compute_slots`].
    pub fn compute(&self, policy: &BookingPolicy, clock: &dyn Clock) -> Result<Vec<TimeSlot>> {
        let hours = self.schedule()?.for_date(self.date)?;
        compute_slots(
            self.date,
            &hours,
            &self.appointments,
            &self.schedule_blocks,
            self.service_duration_min,
            policy,
            clock,
        )
    }

    /// Day summaries for `days` days starting at `date`. See [`scan_days`].
    pub fn scan(
        &self,
        days: u32,
        policy: &BookingPolicy,
        clock: &dyn Clock,
    ) -> Result<Vec<DayOption>> {
        scan_days(
            ScanWindow {
                from: self.date,
                days,
            },
            &self.schedule()?,
            &self.appointments,
            &self.schedule_blocks,
            self.service_duration_min,
            policy,
            clock,
        )
    }

    /// Existing bookings that would collide with `candidate`.
    pub fn conflicts(&self, candidate: &Interval) -> Vec<Conflict> {
        find_conflicts(candidate, &self.appointments, &self.schedule_blocks)
    }
}
