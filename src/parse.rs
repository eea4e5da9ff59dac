use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use timeblock_core::timeblock::parse_offset;

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an RFC 3339 instant, or a date and time without offset read in the
/// local zone.
pub fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .with_context(|| {
            format!("Invalid date/time '{s}'. Expected e.g. 2025-03-20T09:00 or 2025-03-20T09:00:00+01:00")
        })?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{s}' does not exist in the local time zone"))?;

    Ok(local.fixed_offset())
}

pub fn parse_offset_arg(s: &str) -> Result<FixedOffset> {
    parse_offset(s).with_context(|| format!("Invalid offset '{s}'. Expected e.g. +02:00, +02 or Z"))
}
