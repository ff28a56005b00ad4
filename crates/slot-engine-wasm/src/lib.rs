//! WASM bindings for slot-engine.
//!
//! Exposes slot computation, period grouping and day scans to the booking web
//! app via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::{BookingPolicy, Clock, FixedClock, SlotRequest, SystemClock, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs and serialize outputs
// ---------------------------------------------------------------------------

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_request(json: &str) -> Result<SlotRequest, JsValue> {
    SlotRequest::from_json(json).map_err(to_js)
}

/// A missing or blank policy means the tenant defaults.
fn parse_policy(json: Option<String>) -> Result<BookingPolicy, JsValue> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(BookingPolicy::default()),
        Some(json) => BookingPolicy::from_json(json).map_err(to_js),
    }
}

/// The host clock, unless the caller pins "now" with an RFC 3339 string.
fn clock(now: Option<String>) -> Result<Box<dyn Clock>, JsValue> {
    match now {
        None => Ok(Box::new(SystemClock)),
        Some(s) => {
            let instant = DateTime::parse_from_rfc3339(&s)
                .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))?;
            Ok(Box::new(FixedClock(instant.with_timezone(&Utc))))
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute every candidate slot for the request's date.
///
/// `request_json` is a `SlotRequest` object (`date`, `workingHours`,
/// `appointments`, `scheduleBlocks`, `serviceDurationMin`). `policy_json` is an
/// optional `BookingPolicy` object; omitted fields take tenant defaults.
/// `now` optionally pins the current instant (RFC 3339) for lead-time checks.
///
/// Returns a JSON array of `{time, startsAt, endsAt, isAvailable, reason?}`.
#[wasm_bindgen(js_name = "computeSlots")]
pub fn compute_slots(
    request_json: &str,
    policy_json: Option<String>,
    now: Option<String>,
) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let policy = parse_policy(policy_json)?;
    let clock = clock(now)?;

    let slots = request.compute(&policy, clock.as_ref()).map_err(to_js)?;

    to_json(&slots)
}

/// Same as `computeSlots`, keeping only bookable slots.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    request_json: &str,
    policy_json: Option<String>,
    now: Option<String>,
) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let policy = parse_policy(policy_json)?;
    let clock = clock(now)?;

    let slots = request.compute(&policy, clock.as_ref()).map_err(to_js)?;

    to_json(&slot_engine::only_available(slots))
}

/// Group a JSON array of slots into `{morning, afternoon, evening}` by the
/// local hour of each slot's start in `timezone`.
#[wasm_bindgen(js_name = "groupByPeriod")]
pub fn group_by_period(slots_json: &str, timezone: &str) -> Result<String, JsValue> {
    let slots: Vec<TimeSlot> = serde_json::from_str(slots_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;
    let tz: Tz = timezone
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone: {}", timezone)))?;

    to_json(&slot_engine::group_by_period(&slots, tz))
}

/// Summarize availability for `days` days starting at `from` (`YYYY-MM-DD`),
/// or at the request's own date when `from` is omitted.
///
/// Returns a JSON array of `{date, hasAvailability, availableCount}`.
#[wasm_bindgen(js_name = "scanDays")]
pub fn scan_days(
    request_json: &str,
    policy_json: Option<String>,
    from: Option<String>,
    days: u32,
    now: Option<String>,
) -> Result<String, JsValue> {
    let mut request = parse_request(request_json)?;
    if let Some(from) = from {
        request.date = NaiveDate::parse_from_str(&from, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", from, e)))?;
    }
    let policy = parse_policy(policy_json)?;
    let clock = clock(now)?;

    let options = request.scan(days, &policy, clock.as_ref()).map_err(to_js)?;

    to_json(&options)
}
