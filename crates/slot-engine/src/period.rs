//! Presentation grouping of slots into morning, afternoon and evening.

use chrono::Timelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::slots::TimeSlot;

/// First local hour of the afternoon bucket.
pub const AFTERNOON_START_HOUR: u32 = 12;
/// First local hour of the evening bucket.
pub const EVENING_START_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayPeriod {
    /// 00:00 – 11:59
    Morning,
    /// 12:00 – 17:59
    Afternoon,
    /// 18:00 – 23:59
    Evening,
}

impl DayPeriod {
    pub fn of_hour(hour: u32) -> Self {
        if hour < AFTERNOON_START_HOUR {
            Self::Morning
        } else if hour < EVENING_START_HOUR {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedSlots {
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
    pub evening: Vec<TimeSlot>,
}

impl GroupedSlots {
    pub fn bucket(&self, period: DayPeriod) -> &[TimeSlot] {
        match period {
            DayPeriod::Morning => &self.morning,
            DayPeriod::Afternoon => &self.afternoon,
            DayPeriod::Evening => &self.evening,
        }
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len() + self.evening.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition slots by the hour of `starts_at` on the wall clock of `tz`.
///
/// Relative order within each bucket is preserved.
pub fn group_by_period(slots: &[TimeSlot], tz: Tz) -> GroupedSlots {
    slots.iter().fold(GroupedSlots::default(), |mut acc, slot| {
        let hour = slot.starts_at.with_timezone(&tz).hour();
        match DayPeriod::of_hour(hour) {
            DayPeriod::Morning => acc.morning.push(slot.clone()),
            DayPeriod::Afternoon => acc.afternoon.push(slot.clone()),
            DayPeriod::Evening => acc.evening.push(slot.clone()),
        }
        acc
    })
}
