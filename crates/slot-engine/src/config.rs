//! Tenant booking policy: the scalar configuration the calculator consumes.
//!
//! Mirrors the booking-related subset of a tenant's settings record. Every
//! field has a default, so `{}` is a valid policy.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const DEFAULT_SLOT_INTERVAL_MIN: u32 = 30;
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
pub const DEFAULT_LEAD_HOURS: f64 = 2.0;
pub const DEFAULT_MAX_BOOKING_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPolicy {
    /// Step between candidate slot start times, in minutes.
    pub slot_interval_min: u32,
    /// IANA zone the tenant's wall clock runs on.
    pub timezone: String,
    /// Minimum hours between "now" and a slot's start. May be fractional.
    pub booking_lead_hours: f64,
    /// How many days ahead a client may book.
    pub max_booking_days: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            slot_interval_min: DEFAULT_SLOT_INTERVAL_MIN,
            timezone: DEFAULT_TIMEZONE.to_string(),
            booking_lead_hours: DEFAULT_LEAD_HOURS,
            max_booking_days: DEFAULT_MAX_BOOKING_DAYS,
        }
    }
}

impl BookingPolicy {
    /// Parse a policy from a JSON object. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `SlotError::JsonParse` if the JSON is malformed. The parsed
    /// policy is not validated; call [`BookingPolicy::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every field and resolve the timezone.
    ///
    /// # Errors
    /// - `SlotError::InvalidConfiguration` for a zero slot interval, or a lead
    ///   time that is negative, non-finite or too large to represent.
    /// - `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
    pub fn validate(&self) -> Result<Tz> {
        if self.slot_interval_min == 0 {
            return Err(SlotError::InvalidConfiguration(
                "slot interval must be a positive number of minutes".to_string(),
            ));
        }
        if !self.booking_lead_hours.is_finite() || self.booking_lead_hours < 0.0 {
            return Err(SlotError::InvalidConfiguration(format!(
                "lead hours must be a non-negative number, got {}",
                self.booking_lead_hours
            )));
        }
        self.lead_time()?;
        self.tz()
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn slot_interval(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_interval_min))
    }

    /// Lead time rounded to the nearest minute.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfiguration` if the minutes fall outside
    /// the range a `Duration` can hold.
    pub fn lead_time(&self) -> Result<Duration> {
        let minutes = (self.booking_lead_hours * 60.0).round();
        let out_of_range = || {
            SlotError::InvalidConfiguration(format!(
                "lead hours out of range: {}",
                self.booking_lead_hours
            ))
        };
        // `as` saturates, so bound the float before converting.
        if !minutes.is_finite() || minutes.abs() >= i64::MAX as f64 {
            return Err(out_of_range());
        }
        Duration::try_minutes(minutes as i64).ok_or_else(out_of_range)
    }
}
