//! Reductions of a picker selection to an earliest/latest pair.
//!
//! A selection is the list of instants a calendar picker hands over for one
//! gesture. It is read two ways:
//! - as a day span ([`date_range_to_matrix`]): earliest and latest instant,
//!   the latest padded so the last picked slot is included;
//! - as a clock window ([`time_range_to_matrix`]): earliest and latest time of
//!   day, with every instant projected onto one reference date so that only
//!   the clock position is compared.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::error::{TimeblockError, TimeblockResult};
use crate::timeblock::{ClockTime, at_offset};

/// Earliest and latest instant of a selection read as a span of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatrix {
    pub soonest: DateTime<FixedOffset>,
    pub latest: DateTime<FixedOffset>,
}

/// Earliest and latest clock reading of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMatrix {
    pub soonest: DateTime<FixedOffset>,
    pub latest: DateTime<FixedOffset>,
}

impl TimeMatrix {
    pub fn start_clock(&self) -> ClockTime {
        ClockTime::of(&self.soonest)
    }

    pub fn end_clock(&self) -> ClockTime {
        ClockTime::of(&self.latest)
    }
}

fn empty_selection() -> TimeblockError {
    TimeblockError::InvalidInput("selection must contain at least one date".into())
}

/// Reduce a selection to its earliest instant and its latest instant plus `pad`.
pub fn date_range_to_matrix(
    dates: &[DateTime<FixedOffset>],
    pad: Duration,
) -> TimeblockResult<DateMatrix> {
    let mut sorted = dates.to_vec();
    sorted.sort();

    let soonest = *sorted.first().ok_or_else(empty_selection)?;
    let latest = *sorted.last().ok_or_else(empty_selection)? + pad;

    Ok(DateMatrix { soonest, latest })
}

/// Reduce a selection to its earliest and latest clock reading.
///
/// A single instant is returned as-is for both ends. Otherwise each instant's
/// clock is moved onto `today` (keeping its offset) before comparing.
pub fn time_range_to_matrix(
    dates: &[DateTime<FixedOffset>],
    today: NaiveDate,
) -> TimeblockResult<TimeMatrix> {
    if let [only] = dates {
        return Ok(TimeMatrix {
            soonest: *only,
            latest: *only,
        });
    }

    let projected: Vec<_> = dates.iter().map(|d| project_onto(d, today)).collect();

    let soonest = *projected.iter().min().ok_or_else(empty_selection)?;
    let latest = *projected.iter().max().ok_or_else(empty_selection)?;

    Ok(TimeMatrix { soonest, latest })
}

/// Keep the wall clock and offset of `instant`, replace its calendar date.
pub fn project_onto(instant: &DateTime<FixedOffset>, date: NaiveDate) -> DateTime<FixedOffset> {
    at_offset(date.and_time(instant.time()), *instant.offset())
}

/// Whole minutes since the epoch; all boundary checks compare at this precision.
pub(crate) fn minute_of(instant: &DateTime<FixedOffset>) -> i64 {
    instant.timestamp().div_euclid(60)
}
