use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::DateRange;
use crate::types::{end_of_day, first_of_month, start_of_day};

/// The inclusive window `[min_date, max_date]` a committed date must fall in.
///
/// `min_date <= max_date` is not checked. With inverted bounds every typed
/// keystroke is rejected and clamping pins values to one end, which is a
/// dead control but never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_date: NaiveDateTime,
    pub max_date: NaiveDateTime,
}

impl Bounds {
    pub const fn new(min_date: NaiveDateTime, max_date: NaiveDateTime) -> Self {
        Self { min_date, max_date }
    }

    /// Jan 1 of the current year at midnight through the end of today.
    pub fn default_for(now: NaiveDateTime) -> Self {
        let jan_first = first_of_month(now.date()).with_month0(0).unwrap_or(now.date());
        Self {
            min_date: start_of_day(jan_first),
            max_date: end_of_day(now.date()),
        }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.min_date <= date && date <= self.max_date
    }

    /// Pulls `date` into the window. Values already inside come back unchanged.
    pub fn clamp(&self, date: NaiveDateTime) -> NaiveDateTime {
        if date < self.min_date {
            self.min_date
        } else if date > self.max_date {
            self.max_date
        } else {
            date
        }
    }

    /// Clamps both endpoints of `range`; an absent `to` stays absent.
    pub fn clamp_range(&self, range: DateRange) -> DateRange {
        DateRange::new(self.clamp(range.from), range.to.map(|to| self.clamp(to)))
    }
}
