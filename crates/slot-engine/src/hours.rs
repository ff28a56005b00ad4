//! Recurring working hours and their resolution to a single day.
//!
//! The persistence layer stores one [`WorkingHours`] record per weekday. The
//! calculator never looks at the raw record: it receives a [`DayAvailability`],
//! which collapses "no record" and "inactive record" into one `Closed` state.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A weekly availability rule for one professional on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    /// Local wall clock, `HH:MM`.
    pub start_time: String,
    /// Local wall clock, `HH:MM`.
    pub end_time: String,
    pub is_active: bool,
}

impl WorkingHours {
    /// Resolve this rule to a [`DayAvailability`].
    ///
    /// Inactive rules are `Closed` without looking at their times.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` if an active rule carries a time that
    /// is not `HH:MM`.
    pub fn availability(&self) -> Result<DayAvailability> {
        if !self.is_active {
            return Ok(DayAvailability::Closed);
        }
        Ok(DayAvailability::Open {
            start: parse_hhmm(&self.start_time)?,
            end: parse_hhmm(&self.end_time)?,
        })
    }
}

/// Whether a professional works on a given day, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum DayAvailability {
    #[default]
    Closed,
    /// Local wall-clock shift. `end <= start` is representable and yields no
    /// slots; shifts never wrap past midnight.
    Open { start: NaiveTime, end: NaiveTime },
}

impl DayAvailability {
    /// `None` (no rule for the weekday) is `Closed`.
    pub fn from_rule(rule: Option<&WorkingHours>) -> Result<Self> {
        rule.map_or(Ok(Self::Closed), WorkingHours::availability)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Parse a strict `HH:MM` wall-clock string (00:00 through 23:59).
///
/// # Errors
/// Returns `SlotError::InvalidTime` with the offending input.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit);
    if !well_formed {
        return Err(SlotError::InvalidTime(format!(
            "expected HH:MM, got '{}'",
            s
        )));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| SlotError::InvalidTime(format!("'{}': {}", s, e)))
}

/// A professional's full week of working-hour rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    rules: Vec<WorkingHours>,
}

impl WeeklySchedule {
    /// # Errors
    /// Returns `SlotError::InvalidWorkingHours` if any rule's `day_of_week`
    /// is outside 0..=6.
    pub fn new(rules: Vec<WorkingHours>) -> Result<Self> {
        if let Some(bad) = rules.iter().find(|r| r.day_of_week > 6) {
            return Err(SlotError::InvalidWorkingHours(format!(
                "day of week must be 0 (Sunday) through 6 (Saturday), got {}",
                bad.day_of_week
            )));
        }
        Ok(Self { rules })
    }

    /// The effective rule for `date`'s weekday: the first active rule, if any.
    pub fn rule_for(&self, date: NaiveDate) -> Option<&WorkingHours> {
        let weekday = date.weekday().num_days_from_sunday();
        self.rules
            .iter()
            .filter(|r| u32::from(r.day_of_week) == weekday)
            .find(|r| r.is_active)
    }

    /// # Errors
    /// Returns `SlotError::InvalidTime` if the effective rule has a malformed time.
    pub fn for_date(&self, date: NaiveDate) -> Result<DayAvailability> {
        DayAvailability::from_rule(self.rule_for(date))
    }
}
