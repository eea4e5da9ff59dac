//! Timeblock record types.
//!
//! A timeblock is a time interval scoped to one calendar date. Its wire shape
//! is the `{date, start_time, end_time}` triple the record store keeps, with
//! times written as `HH:MM:SS` plus a zone offset (`09:00:00+00`).
//! Comparisons never look at those strings; they go through the absolute
//! instants returned by [`Timeblock::start`] and [`Timeblock::end`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimeblockError, TimeblockResult};

/// A time of day qualified by a fixed zone offset.
///
/// Equality is representational: `10:00+01` and `09:00+00` name the same
/// instant but are not equal. Compare instants via [`ClockTime::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl ClockTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        ClockTime { time, offset }
    }

    /// The wall-clock reading of an instant, in the instant's own offset.
    pub fn of(instant: &DateTime<FixedOffset>) -> Self {
        ClockTime::new(instant.time(), *instant.offset())
    }

    /// The wall-clock reading of an instant after converting it to `offset`.
    pub fn of_in(instant: &DateTime<FixedOffset>, offset: FixedOffset) -> Self {
        ClockTime::of(&instant.with_timezone(&offset))
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Anchor this clock reading onto `date`, giving an absolute instant.
    pub fn on(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        at_offset(date.and_time(self.time), self.offset)
    }

    /// `00:00:00` in its own offset.
    pub fn is_midnight(&self) -> bool {
        self.time == NaiveTime::MIN
    }

    /// Same offset, seconds and sub-seconds dropped.
    pub fn truncate_to_minute(&self) -> Self {
        let time = NaiveTime::from_hms_opt(self.time.hour(), self.time.minute(), 0)
            .unwrap_or(self.time);
        ClockTime::new(time, self.offset)
    }
}

/// Build a `DateTime<FixedOffset>` whose local reading is `local`.
pub(crate) fn at_offset(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(offset.local_minus_utc().into());
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Offset in the record store's style: `+HH`, or `+HH:MM` when minutes are set.
pub fn format_offset(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    let (hours, minutes) = (secs / 3600, (secs % 3600) / 60);

    if minutes == 0 {
        format!("{sign}{hours:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}")
    }
}

/// Parse `Z`, `+HH`, `+HHMM` or `+HH:MM` (and the `-` forms).
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    if s == "Z" || s == "z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, digits) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl FromStr for ClockTime {
    type Err = TimeblockError;

    fn from_str(s: &str) -> TimeblockResult<Self> {
        let invalid = || TimeblockError::InvalidClockTime(s.to_string());

        // The offset starts at the first sign or `Z` after the `HH:MM` prefix
        let split = s
            .char_indices()
            .skip(5)
            .find(|(_, c)| matches!(c, '+' | '-' | 'Z' | 'z'))
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;
        let (time_part, offset_part) = s.split_at(split);

        let time = NaiveTime::parse_from_str(time_part, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
            .map_err(|_| invalid())?;
        let offset = parse_offset(offset_part).ok_or_else(invalid)?;

        Ok(ClockTime::new(time, offset))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time.format("%H:%M:%S"), format_offset(&self.offset))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A date-scoped, offset-qualified time interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeblock {
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl Timeblock {
    pub fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        Timeblock {
            date,
            start_time,
            end_time,
        }
    }

    /// Build from the record store's string fields.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> TimeblockResult<Self> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| TimeblockError::InvalidDate(date.to_string()))?;

        Ok(Timeblock::new(date, start_time.parse()?, end_time.parse()?))
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start_time.on(self.date)
    }

    /// Blocks covering `start` to `end` from `date` on.
    ///
    /// When the end clock falls on the next day, the interval is split at
    /// midnight: `start` to `24:00` on `date`, then `00:00` to `end` on the
    /// following date.
    pub fn spanning(date: NaiveDate, start: ClockTime, end: ClockTime) -> Vec<Timeblock> {
        let block = Timeblock::new(date, start, end);
        if end.is_midnight() || end.on(date) >= start.on(date) {
            return vec![block];
        }

        let midnight = ClockTime::new(NaiveTime::MIN, end.offset());
        let mut blocks = vec![block.with_end_time(midnight)];
        if let Some(next) = date.succ_opt() {
            blocks.push(Timeblock::new(next, midnight, end));
        }
        blocks
    }

    /// End instant, always on the block's own date. An end clock of `00:00`
    /// that is not after the start reads as `24:00`, the end of the date.
    pub fn end(&self) -> DateTime<FixedOffset> {
        let end = self.end_time.on(self.date);
        if self.end_time.is_midnight() && end <= self.start() {
            end + Duration::days(1)
        } else {
            end
        }
    }

    pub fn duration(&self) -> Duration {
        self.end() - self.start()
    }

    /// Zero-length or inverted blocks are dropped from every edit result.
    pub fn is_degenerate(&self) -> bool {
        self.end() <= self.start()
    }

    /// Both bounds of `other` fall within this block (inclusive).
    pub fn contains(&self, other: &Timeblock) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    pub fn with_start_time(&self, start_time: ClockTime) -> Self {
        Timeblock {
            start_time,
            ..self.clone()
        }
    }

    pub fn with_end_time(&self, end_time: ClockTime) -> Self {
        Timeblock {
            end_time,
            ..self.clone()
        }
    }
}

impl fmt::Display for Timeblock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.date.format("%Y-%m-%d"),
            self.start_time,
            self.end_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parse_short_offset() {
        let c = clock("09:00:00+00");
        assert_eq!(c.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(c.offset().local_minus_utc(), 0);
    }

    #[test]
    fn parse_offset_variants() {
        assert_eq!(clock("09:00:00+0530").offset().local_minus_utc(), 19800);
        assert_eq!(clock("09:00:00+05:30").offset().local_minus_utc(), 19800);
        assert_eq!(clock("09:00:00-07").offset().local_minus_utc(), -25200);
        assert_eq!(clock("09:00:00Z").offset().local_minus_utc(), 0);
        assert_eq!(clock("09:15+01").time(), NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("09:00:00".parse::<ClockTime>().is_err());
        assert!("9am+00".parse::<ClockTime>().is_err());
        assert!("09:00:00+0575".parse::<ClockTime>().is_err());
        assert!("25:00:00+00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn display_matches_store_format() {
        assert_eq!(clock("09:00:00+00").to_string(), "09:00:00+00");
        assert_eq!(clock("09:00:00+0530").to_string(), "09:00:00+05:30");
        assert_eq!(clock("18:45:00-03").to_string(), "18:45:00-03");
    }

    #[test]
    fn serde_uses_record_shape() {
        let tb = Timeblock::parse("2024-01-01", "09:00:00+00", "10:00:00+00").unwrap();
        let json = serde_json::to_value(&tb).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-01-01",
                "start_time": "09:00:00+00",
                "end_time": "10:00:00+00",
            })
        );

        let back: Timeblock = serde_json::from_value(json).unwrap();
        assert_eq!(back, tb);
    }

    #[test]
    fn bounds_respect_offset() {
        let utc = Timeblock::parse("2024-01-01", "09:00:00+00", "10:00:00+00").unwrap();
        let cet = Timeblock::parse("2024-01-01", "10:00:00+01", "11:00:00+01").unwrap();

        assert_eq!(utc.start(), cet.start());
        assert_eq!(utc.end(), cet.end());
    }

    #[test]
    fn midnight_end_closes_the_date() {
        let evening = Timeblock::parse("2024-01-01", "23:00:00+00", "00:00:00+00").unwrap();
        assert_eq!(evening.duration(), Duration::hours(1));

        let whole_day = Timeblock::parse("2024-01-01", "00:00:00+00", "00:00:00+00").unwrap();
        assert_eq!(whole_day.duration(), Duration::hours(24));
        assert!(!whole_day.is_degenerate());
    }

    #[test]
    fn end_before_start_never_wraps() {
        let tb = Timeblock::parse("2024-01-01", "23:00:00+00", "00:15:00+00").unwrap();
        assert_eq!(tb.end(), tb.end_time.on(tb.date));
        assert!(tb.is_degenerate());
    }

    #[test]
    fn spanning_splits_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let blocks = Timeblock::spanning(date, clock("23:50:00+00"), clock("00:05:00+00"));

        assert_eq!(
            blocks,
            vec![
                Timeblock::parse("2024-01-01", "23:50:00+00", "00:00:00+00").unwrap(),
                Timeblock::parse("2024-01-02", "00:00:00+00", "00:05:00+00").unwrap(),
            ]
        );
        assert_eq!(blocks[0].duration(), Duration::minutes(10));
        assert_eq!(blocks[1].duration(), Duration::minutes(5));
    }

    #[test]
    fn spanning_within_one_date_is_one_block() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let blocks = Timeblock::spanning(date, clock("23:00:00+00"), clock("00:00:00+00"));

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].duration(), Duration::hours(1));
    }

    #[test]
    fn equality_compares_representation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (cet, utc) = (clock("10:00:00+01"), clock("09:00:00+00"));

        assert_ne!(cet, utc);
        assert_eq!(cet.on(date), utc.on(date));
    }

    #[test]
    fn equal_bounds_are_degenerate() {
        let tb = Timeblock::parse("2024-01-01", "10:00:00+00", "10:00:00+00").unwrap();
        assert!(tb.is_degenerate());
    }

    #[test]
    fn invalid_date_is_reported() {
        let err = Timeblock::parse("2024-13-01", "10:00:00+00", "11:00:00+00").unwrap_err();
        assert!(matches!(err, TimeblockError::InvalidDate(_)));
    }
}
