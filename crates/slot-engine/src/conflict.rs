//! Detect overlaps between a candidate interval and existing bookings.
//!
//! Overlap is boundary-exclusive: an appointment ending at 12:00 and a slot
//! starting at 12:00 are NOT in conflict, so back-to-back bookings are legal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{Appointment, ScheduleBlock};

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// This excludes the adjacent case where `a.end == b.start`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared by both intervals, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes()
    }
}

/// What a candidate interval collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictKind {
    Appointment,
    Block,
}

/// A detected conflict between a candidate interval and an existing booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The interval of the appointment or block that was hit.
    pub interval: Interval,
    pub overlap_minutes: i64,
}

/// Find every active appointment and approved block overlapping `candidate`.
///
/// Appointment conflicts come first, in input order, followed by block
/// conflicts. Inactive appointments (`completed`, `no_show`, `canceled`) and
/// unapproved blocks are ignored.
pub fn find_conflicts(
    candidate: &Interval,
    appointments: &[Appointment],
    blocks: &[ScheduleBlock],
) -> Vec<Conflict> {
    let appointment_hits = appointments
        .iter()
        .filter(|a| a.is_active())
        .map(|a| (ConflictKind::Appointment, a.interval()));
    let block_hits = blocks
        .iter()
        .filter(|b| b.is_approved())
        .map(|b| (ConflictKind::Block, b.interval()));

    appointment_hits
        .chain(block_hits)
        .filter(|(_, interval)| candidate.overlaps(interval))
        .map(|(kind, interval)| Conflict {
            kind,
            interval,
            overlap_minutes: candidate.overlap_minutes(&interval),
        })
        .collect()
}

/// The kind of the first conflict `candidate` hits, checking appointments
/// before blocks.
pub(crate) fn first_conflict(
    candidate: &Interval,
    appointments: &[&Appointment],
    blocks: &[&ScheduleBlock],
) -> Option<ConflictKind> {
    if appointments.iter().any(|a| candidate.overlaps(&a.interval())) {
        return Some(ConflictKind::Appointment);
    }
    if blocks.iter().any(|b| candidate.overlaps(&b.interval())) {
        return Some(ConflictKind::Block);
    }
    None
}
