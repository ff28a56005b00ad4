//! Tests for local wall-clock resolution across DST transitions.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::{New_York, Sao_Paulo};
use slot_engine::dst::resolve_local;

fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn ordinary_time_maps_directly() {
    let resolved = resolve_local(&Sao_Paulo, naive(2026, 3, 16, 9, 0)).unwrap();

    assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap());
}

#[test]
fn gap_time_shifts_forward_by_the_gap() {
    // 2026-03-08 02:30 does not exist in New York; read it as EST → 07:30Z,
    // which is 03:30 EDT.
    let resolved = resolve_local(&New_York, naive(2026, 3, 8, 2, 30)).unwrap();

    assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
}

#[test]
fn ambiguous_time_takes_the_earlier_instant() {
    // 2026-11-01 01:30 happens twice in New York: EDT (05:30Z) then EST (06:30Z).
    let resolved = resolve_local(&New_York, naive(2026, 11, 1, 1, 30)).unwrap();

    assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

#[test]
fn matches_chrono_tz_outside_transitions() {
    let local = naive(2026, 7, 4, 14, 15);

    let resolved = resolve_local(&New_York, local).unwrap();

    assert_eq!(
        resolved,
        New_York
            .from_local_datetime(&local)
            .unwrap()
            .with_timezone(&Utc)
    );
}
