//! `slots` CLI — compute and inspect appointment availability from JSON snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # All candidate slots for the request's date (stdin → stdout)
//! cat request.json | slots compute
//!
//! # Only bookable slots, grouped into morning/afternoon/evening
//! slots compute -i request.json --available-only --group
//!
//! # Tenant policy from a file, with a per-run override
//! slots compute -i request.json --policy tenant.json --lead-hours 0
//!
//! # Which of the next 14 days have anything bookable
//! slots days -i request.json --days 14
//!
//! # Which bookings a proposed interval would collide with
//! slots check -i request.json --start 2026-03-16T15:00:00Z --end 2026-03-16T15:30:00Z
//! ```
//!
//! Set `RUST_LOG=slot_engine=debug` to trace decisions on stderr, and
//! `LOG_FORMAT=json` for structured log lines.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    group_by_period, only_available, BookingPolicy, Clock, FixedClock, Interval, SlotRequest,
    SystemClock,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot availability calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the slots for the request's date
    Compute {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Drop slots that cannot be booked
        #[arg(long)]
        available_only: bool,
        /// Group slots into morning / afternoon / evening
        #[arg(long)]
        group: bool,
    },
    /// Summarize availability for consecutive days
    Days {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        /// First day to scan, YYYY-MM-DD (defaults to the request's date)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Number of days to scan (capped by the policy's maxBookingDays)
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// List bookings that overlap a proposed interval
    Check {
        #[command(flatten)]
        io: IoArgs,
        /// Interval start, RFC 3339
        #[arg(long)]
        start: DateTime<Utc>,
        /// Interval end, RFC 3339
        #[arg(long)]
        end: DateTime<Utc>,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Request JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct PolicyArgs {
    /// Tenant booking policy JSON file (defaults apply if omitted)
    #[arg(long)]
    policy: Option<String>,
    /// Override the slot interval in minutes
    #[arg(long)]
    interval: Option<u32>,
    /// Override the IANA timezone
    #[arg(long)]
    timezone: Option<String>,
    /// Override the minimum lead time in hours
    #[arg(long)]
    lead_hours: Option<f64>,
    /// Pin the current instant (RFC 3339) instead of reading the system clock
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

impl PolicyArgs {
    fn load(&self) -> Result<BookingPolicy> {
        let mut policy = match self.policy.as_deref() {
            Some(path) => {
                let json = read_input(Some(path))?;
                BookingPolicy::from_json(&json)
                    .with_context(|| format!("Failed to parse policy file: {}", path))?
            }
            None => BookingPolicy::default(),
        };
        if let Some(interval) = self.interval {
            policy.slot_interval_min = interval;
        }
        if let Some(tz) = &self.timezone {
            policy.timezone = tz.clone();
        }
        if let Some(lead) = self.lead_hours {
            policy.booking_lead_hours = lead;
        }
        debug!(?policy, "effective policy");
        Ok(policy)
    }

    fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(now) => Box::new(FixedClock(now)),
            None => Box::new(SystemClock),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            io,
            policy,
            available_only,
            group,
        } => {
            let request = load_request(io.input.as_deref())?;
            let clock = policy.clock();
            let policy = policy.load()?;

            let mut slots = request
                .compute(&policy, clock.as_ref())
                .context("Failed to compute slots")?;
            if available_only {
                slots = only_available(slots);
            }

            let json = if group {
                let tz = policy.tz()?;
                serde_json::to_string_pretty(&group_by_period(&slots, tz))?
            } else {
                serde_json::to_string_pretty(&slots)?
            };
            write_output(io.output.as_deref(), &json)?;
        }
        Commands::Days {
            io,
            policy,
            from,
            days,
        } => {
            let mut request = load_request(io.input.as_deref())?;
            if let Some(from) = from {
                request.date = from;
            }
            let clock = policy.clock();
            let policy = policy.load()?;

            let options = request
                .scan(days, &policy, clock.as_ref())
                .context("Failed to scan days")?;
            write_output(io.output.as_deref(), &serde_json::to_string_pretty(&options)?)?;
        }
        Commands::Check { io, start, end } => {
            if end <= start {
                anyhow::bail!("--end ({}) must be after --start ({})", end, start);
            }
            let request = load_request(io.input.as_deref())?;

            let conflicts = request.conflicts(&Interval::new(start, end));
            write_output(
                io.output.as_deref(),
                &serde_json::to_string_pretty(&conflicts)?,
            )?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON. `LOG_FORMAT=json` switches
/// to structured lines; `RUST_LOG` picks the level (default `warn`).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let use_json = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json");

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn load_request(path: Option<&str>) -> Result<SlotRequest> {
    let json = read_input(path)?;
    SlotRequest::from_json(&json).context("Failed to parse slot request")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
