//! Existing bookings consumed by the calculator: appointments and schedule blocks.
//!
//! Both arrive as read-only snapshots from the persistence layer, already
//! narrowed to one professional. The calculator filters them by status only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::Interval;

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    NoShow,
    Canceled,
}

impl AppointmentStatus {
    /// Whether an appointment in this status still holds its time.
    ///
    /// Only `scheduled` and `confirmed` do; finished, missed and canceled
    /// appointments free the interval for new bookings.
    pub fn occupies_time(self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }
}

/// The subset of an appointment the calculator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub barber_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn interval(&self) -> Interval {
        Interval::new(self.starts_at, self.ends_at)
    }

    pub fn is_active(&self) -> bool {
        self.status.occupies_time()
    }
}

/// Approval state of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Pending,
    Approved,
    Rejected,
}

/// A one-off unavailable interval: a break, leave, maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    pub barber_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: BlockStatus,
}

impl ScheduleBlock {
    pub fn interval(&self) -> Interval {
        Interval::new(self.starts_at, self.ends_at)
    }

    /// Pending and rejected blocks never constrain availability.
    pub fn is_approved(&self) -> bool {
        self.status == BlockStatus::Approved
    }
}
