//! # slot-engine
//!
//! Deterministic appointment slot availability for booking systems.
//!
//! Given a professional's working hours for a day, their existing appointments,
//! approved schedule blocks, a service duration and the tenant's booking policy
//! (slot interval, timezone, minimum lead time), the engine produces the ordered
//! list of candidate start times for that day, each flagged available or not.
//!
//! The engine is a pure read-side calculator. It does no I/O, holds no state
//! between calls and makes no reservation: the write path that creates an
//! appointment must re-check availability transactionally.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use slot_engine::{compute_slots, BookingPolicy, DayAvailability, FixedClock};
//! use slot_engine::hours::parse_hhmm;
//!
//! let hours = DayAvailability::Open {
//!     start: parse_hhmm("09:00").unwrap(),
//!     end: parse_hhmm("18:00").unwrap(),
//! };
//! let policy = BookingPolicy { booking_lead_hours: 0.0, ..BookingPolicy::default() };
//! let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
//! let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//!
//! let slots = compute_slots(date, &hours, &[], &[], 30, &policy, &clock).unwrap();
//! assert_eq!(slots.len(), 18);
//! assert_eq!(slots[0].time, "09:00");
//! assert_eq!(slots[17].time, "17:30");
//! ```
//!
//! ## Modules
//!
//! - [`slots`] — The calculator: candidate generation and per-slot decisions
//! - [`hours`] — Working-hours records, `HH:MM` parsing, weekly resolution
//! - [`booking`] — Appointments and schedule blocks, with their statuses
//! - [`conflict`] — Boundary-exclusive overlap detection
//! - [`period`] — Morning / afternoon / evening grouping
//! - [`calendar`] — Multi-day availability scan
//! - [`dst`] — Local wall-clock to instant resolution across DST transitions
//! - [`clock`] — Injectable time sources
//! - [`config`] — Tenant booking policy
//! - [`request`] — Self-contained JSON request for bindings and the CLI
//! - [`error`] — Error types

pub mod booking;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod hours;
pub mod period;
pub mod request;
pub mod slots;

pub use booking::{Appointment, AppointmentStatus, BlockStatus, ScheduleBlock};
pub use calendar::{scan_days, DayOption, ScanWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::BookingPolicy;
pub use conflict::{find_conflicts, Conflict, ConflictKind, Interval};
pub use error::SlotError;
pub use hours::{DayAvailability, WeeklySchedule, WorkingHours};
pub use period::{group_by_period, DayPeriod, GroupedSlots};
pub use request::SlotRequest;
pub use slots::{available_slots, compute_slots, only_available, TimeSlot, Unavailable};
