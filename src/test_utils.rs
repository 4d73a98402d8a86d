//! Shared constructors for unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{end_of_day, start_of_day};
use crate::{Bounds, DateRange};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date must exist")
}

/// Midnight of the given day.
pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    start_of_day(date(year, month, day))
}

/// 23:59:59.999 of the given day.
pub fn end_of(year: i32, month: u32, day: u32) -> NaiveDateTime {
    end_of_day(date(year, month, day))
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("test time must exist")
}

pub fn range(from: NaiveDateTime, to: NaiveDateTime) -> DateRange {
    DateRange::new(from, Some(to))
}

pub fn open_range(from: NaiveDateTime) -> DateRange {
    DateRange::new(from, None)
}

/// Bounds covering the whole of 2024.
pub fn bounds_2024() -> Bounds {
    Bounds::new(midnight(2024, 1, 1), end_of(2024, 12, 31))
}
