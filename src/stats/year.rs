//! Calendar-year scoping for timestamped records.

use chrono::{Datelike, FixedOffset, Local, Offset, TimeZone, Utc};

use super::time::format_date;
use crate::models::{HistoryItem, Vote};

/// Anything with an event time in unix seconds.
pub trait Timestamped {
    /// Event time; `None` or 0 means unknown.
    fn event_time(&self) -> Option<i64>;
}

impl Timestamped for HistoryItem {
    fn event_time(&self) -> Option<i64> {
        self.last_view_timestamp
    }
}

impl Timestamped for Vote {
    fn event_time(&self) -> Option<i64> {
        self.voted_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Local,
    Fixed(FixedOffset),
}

/// One calendar year, evaluated in a time zone.
///
/// A timestamp belongs to the year when its calendar date in that zone
/// falls within it, i.e. `[Jan 1 00:00:00, Dec 31 23:59:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    year: i32,
    zone: Zone,
}

impl YearWindow {
    /// The current year on the local clock.
    pub fn current() -> Self {
        Self::local(Local::now().year())
    }

    /// A year in the local time zone.
    pub fn local(year: i32) -> Self {
        Self {
            year,
            zone: Zone::Local,
        }
    }

    /// A year in UTC.
    pub fn utc(year: i32) -> Self {
        Self::fixed(year, Utc.fix())
    }

    /// A year at a fixed UTC offset.
    pub fn fixed(year: i32, offset: FixedOffset) -> Self {
        Self {
            year,
            zone: Zone::Fixed(offset),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar year of a timestamp in this window's zone.
    fn year_of(&self, ts: i64) -> Option<i32> {
        match self.zone {
            Zone::Local => Local.timestamp_opt(ts, 0).single().map(|d| d.year()),
            Zone::Fixed(offset) => offset.timestamp_opt(ts, 0).single().map(|d| d.year()),
        }
    }

    /// Check whether a timestamp falls in the year. 0 never does.
    pub fn contains(&self, ts: i64) -> bool {
        ts != 0 && self.year_of(ts) == Some(self.year)
    }

    /// Check an optional timestamp.
    pub fn contains_opt(&self, ts: Option<i64>) -> bool {
        ts.is_some_and(|ts| self.contains(ts))
    }

    /// Format a timestamp as a date in this window's zone.
    pub fn format_date(&self, ts: i64) -> String {
        match self.zone {
            Zone::Local => format_date(ts, &Local),
            Zone::Fixed(offset) => format_date(ts, &offset),
        }
    }

    /// Check a timestamped record.
    pub fn includes<T: Timestamped + ?Sized>(&self, item: &T) -> bool {
        self.contains_opt(item.event_time())
    }
}

impl Default for YearWindow {
    fn default() -> Self {
        Self::current()
    }
}

/// Records whose event time falls in the year, in input order.
pub fn filter_by_year<'a, T: Timestamped>(items: &'a [T], window: &YearWindow) -> Vec<&'a T> {
    items.iter().filter(|item| window.includes(*item)).collect()
}

/// Number of records in the year.
pub fn count_in_year<T: Timestamped>(items: &[T], window: &YearWindow) -> usize {
    items.iter().filter(|item| window.includes(*item)).count()
}

/// Check whether any record falls in the year.
pub fn any_in_year<T: Timestamped>(items: &[T], window: &YearWindow) -> bool {
    items.iter().any(|item| window.includes(item))
}
