//! Interval set editor.
//!
//! Keeps a list of timeblocks free of same-date overlaps while blocks are
//! added from, or cut out by, picker selections. Every operation borrows the
//! caller's list and returns a freshly built one.

use chrono::{DateTime, Duration, FixedOffset};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::TimeblockConfig;
use crate::constants::SELECTION_PAD_MINUTES;
use crate::error::TimeblockResult;
use crate::selection::{self, DateMatrix, TimeMatrix, minute_of, project_onto};
use crate::timeblock::{ClockTime, Timeblock, at_offset};

#[derive(Debug, Clone)]
pub struct TimeblockEditor<C: Clock = SystemClock> {
    pad: Duration,
    forced_offset: Option<FixedOffset>,
    clock: C,
}

impl Default for TimeblockEditor<SystemClock> {
    fn default() -> Self {
        TimeblockEditor {
            pad: Duration::minutes(SELECTION_PAD_MINUTES),
            forced_offset: None,
            clock: SystemClock,
        }
    }
}

impl TimeblockEditor<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TimeblockConfig) -> TimeblockResult<Self> {
        Ok(TimeblockEditor {
            pad: config.selection_pad()?,
            forced_offset: config.forced_offset()?,
            clock: SystemClock,
        })
    }
}

impl<C: Clock> TimeblockEditor<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> TimeblockEditor<D> {
        TimeblockEditor {
            pad: self.pad,
            forced_offset: self.forced_offset,
            clock,
        }
    }

    pub fn with_pad(mut self, pad: Duration) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_forced_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.forced_offset = offset;
        self
    }

    pub fn pad(&self) -> Duration {
        self.pad
    }

    pub fn forced_offset(&self) -> Option<FixedOffset> {
        self.forced_offset
    }

    /// Earliest instant and padded latest instant of a selection.
    pub fn date_range_to_matrix(&self, dates: &[DateTime<FixedOffset>]) -> TimeblockResult<DateMatrix> {
        selection::date_range_to_matrix(dates, self.pad)
    }

    /// Earliest and latest clock reading of a selection, projected onto today.
    pub fn time_range_to_matrix(&self, dates: &[DateTime<FixedOffset>]) -> TimeblockResult<TimeMatrix> {
        selection::time_range_to_matrix(dates, self.clock.today())
    }

    /// Expand a start/end selection into one block per day of its span, each
    /// covering the same clock window (start clock to end clock plus pad).
    /// A window that runs past midnight is split across the two dates.
    ///
    /// Anything other than exactly two instants yields no blocks.
    pub fn build_timeblocks_from_range(&self, dates: &[DateTime<FixedOffset>]) -> Vec<Timeblock> {
        if dates.len() != 2 {
            return Vec::new();
        }
        let (Ok(clock), Ok(span)) = (self.time_range_to_matrix(dates), self.date_range_to_matrix(dates))
        else {
            return Vec::new();
        };

        let start_time = clock.start_clock();
        let end_time = ClockTime::of(&(clock.latest + self.pad));

        let mut cursor = with_clock_of(&span.soonest, &clock.soonest);
        let end = with_clock_of(&span.latest, &clock.latest);

        let mut blocks = Vec::new();
        while cursor < end {
            blocks.extend(Timeblock::spanning(cursor.date_naive(), start_time, end_time));
            cursor += Duration::days(1);
        }

        debug!(
            count = blocks.len(),
            start = %start_time,
            end = %end_time,
            "built timeblocks from selection"
        );
        blocks
    }

    /// A single picked slot: the instant's clock up to one pad later. A slot
    /// running past midnight comes back as two blocks, one per date.
    pub fn slot_at(&self, instant: &DateTime<FixedOffset>) -> Vec<Timeblock> {
        Timeblock::spanning(
            instant.date_naive(),
            ClockTime::of(instant),
            ClockTime::of(&(*instant + self.pad)),
        )
    }

    /// Union of two block lists, merging same-date blocks that overlap or touch.
    ///
    /// Blocks on different dates are never merged. Zero-length blocks are dropped.
    pub fn add_timeblocks(&self, existing: &[Timeblock], incoming: &[Timeblock]) -> Vec<Timeblock> {
        let mut sorted: Vec<Timeblock> = existing
            .iter()
            .chain(incoming)
            .filter(|tb| !tb.is_degenerate())
            .cloned()
            .collect();
        sorted.sort_by_key(|tb| (tb.date, tb.start(), tb.end()));

        let mut result: Vec<Timeblock> = Vec::with_capacity(sorted.len());

        for curr in sorted {
            let Some(last) = result.last_mut() else {
                result.push(curr);
                continue;
            };
            if last.date != curr.date {
                result.push(curr);
                continue;
            }

            if last.contains(&curr) {
                continue;
            }

            if last.end() >= curr.start() {
                last.end_time = curr.end_time;
            } else {
                result.push(curr);
            }
        }

        debug!(
            existing = existing.len(),
            incoming = incoming.len(),
            result = result.len(),
            "merged timeblocks"
        );
        result
    }

    /// Cut a selection out of the blocks at day granularity.
    ///
    /// Blocks entirely before or after the padded selection span are kept.
    /// The rest keep at most the part whose clock lies before the selection's
    /// first clock and the part whose clock lies after its last clock.
    /// An empty selection leaves the list unchanged.
    #[deprecated(note = "use `time_matrix_remove_timeblocks`, which clips each day of the selection")]
    pub fn remove_timeblocks(&self, existing: &[Timeblock], dates: &[DateTime<FixedOffset>]) -> Vec<Timeblock> {
        let Ok(span) = self.date_range_to_matrix(dates) else {
            return existing.to_vec();
        };

        let first_cut = ClockTime::of(&span.soonest);
        let last_cut = ClockTime::of(&span.latest);
        let mut result = Vec::with_capacity(existing.len());

        for tb in existing {
            let (tb_start, tb_end) = (tb.start(), tb.end());

            if (tb_start < span.soonest && tb_end < span.soonest)
                || (tb_start > span.latest && tb_end > span.latest)
            {
                result.push(tb.clone());
                continue;
            }

            let head = (project_onto(&tb_start, span.soonest.date_naive()) < span.soonest).then(|| {
                let end_time = if first_cut.on(tb.date) < tb_end {
                    first_cut
                } else {
                    tb.end_time
                };
                tb.with_end_time(end_time)
            });
            let tail = (project_onto(&tb_end, span.latest.date_naive()) > span.latest).then(|| {
                let start_time = if last_cut.on(tb.date) > tb_start {
                    last_cut
                } else {
                    tb.start_time
                };
                tb.with_start_time(start_time)
            });

            match (head, tail) {
                // Cuts cross when the first clock is later than the last one
                (Some(head), Some(tail)) if head.end() >= tail.start() => result.push(tb.clone()),
                (head, tail) => result.extend(head.into_iter().chain(tail)),
            }
        }

        result.retain(|tb| !tb.is_degenerate());

        debug!(
            existing = existing.len(),
            result = result.len(),
            "removed selection from timeblocks by day"
        );
        result
    }

    /// Cut the selection's clock window out of every block dated within the
    /// selection's span of days.
    ///
    /// The window runs from the earliest selected clock to the latest selected
    /// clock, so a single instant removes nothing. Bounds are compared at
    /// minute precision. A block
    /// that straddles the whole window is split in two. Clipped times are
    /// written in `forced_offset`, else the editor's configured offset, else
    /// the window's own offset. An empty selection leaves the list unchanged.
    pub fn time_matrix_remove_timeblocks(
        &self,
        existing: &[Timeblock],
        dates: &[DateTime<FixedOffset>],
        forced_offset: Option<FixedOffset>,
    ) -> Vec<Timeblock> {
        let Ok(clock) = self.time_range_to_matrix(dates) else {
            return existing.to_vec();
        };
        let (Some(first_day), Some(last_day)) = (
            dates.iter().map(|d| d.date_naive()).min(),
            dates.iter().map(|d| d.date_naive()).max(),
        ) else {
            return existing.to_vec();
        };

        let window_start = clock.start_clock();
        let window_end = clock.end_clock();
        let offset = forced_offset
            .or(self.forced_offset)
            .unwrap_or_else(|| window_start.offset());

        let mut result = Vec::with_capacity(existing.len());

        for tb in existing {
            if tb.date < first_day || tb.date > last_day {
                result.push(tb.clone());
                continue;
            }

            let (rm_start, rm_end) = (window_start.on(tb.date), window_end.on(tb.date));
            let (rm_start_m, rm_end_m) = (minute_of(&rm_start), minute_of(&rm_end));
            let (tb_start_m, tb_end_m) = (minute_of(&tb.start()), minute_of(&tb.end()));

            if rm_end_m <= rm_start_m || tb_end_m <= rm_start_m || tb_start_m >= rm_end_m {
                result.push(tb.clone());
                continue;
            }
            if tb_start_m >= rm_start_m && tb_end_m <= rm_end_m {
                continue;
            }

            if tb_start_m < rm_start_m {
                result.push(tb.with_end_time(ClockTime::of_in(&rm_start, offset)));
            }
            if tb_end_m > rm_end_m {
                result.push(tb.with_start_time(ClockTime::of_in(&rm_end, offset)));
            }
        }

        result.retain(|tb| !tb.is_degenerate());

        debug!(
            existing = existing.len(),
            result = result.len(),
            window_start = %window_start,
            window_end = %window_end,
            "removed clock window from timeblocks"
        );
        result
    }
}

/// `date_of`'s calendar date with the hour and minute of `clock_of`, seconds zeroed.
fn with_clock_of(date_of: &DateTime<FixedOffset>, clock_of: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let time = ClockTime::of(clock_of).truncate_to_minute().time();
    at_offset(date_of.date_naive().and_time(time), *date_of.offset())
}
