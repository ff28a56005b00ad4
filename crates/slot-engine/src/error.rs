//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A caller-supplied scalar (duration, interval, lead time) is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A wall-clock string was not `HH:MM`, or a local time could not be resolved.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    /// A request or policy document was not valid JSON for its shape.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
