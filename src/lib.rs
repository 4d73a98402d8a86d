//! Computation and validation engine behind a date range picker control.
//!
//! The crate resolves named presets ("yesterday", "last 7 days", ...) into
//! concrete local-time ranges, keeps a primary range and an optional
//! comparison range consistent while the user edits them, and drives the
//! segmented day/month/year input fields. Rendering is left to the caller:
//! a UI layer forwards keystrokes, calendar selections and button clicks to
//! [`DateRangePicker`] and reads the resulting state back.

mod bounds;
mod clock;
mod config;
mod consts;
mod field;
mod locale;
mod picker;
mod prelude;
mod preset;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use bounds::Bounds;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DateValue, PickerConfig, PresetPosition};
pub use consts::*;
pub use field::{Caret, DateField, DateParts, FieldState, Key, KeyResponse, Segment};
pub use locale::{Action, FieldOrder, Label, TranslationOverrides, Translations, is_day_first};
pub use picker::{DateRangePicker, Endpoint, PresetDisplay};
pub use preset::{Preset, PresetError, PresetName, derive_active_preset, resolve};
pub use range::{DateRange, RangeUpdate, ranges_equal};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use chrono::NaiveDate;

/// Failure to read a calendar date from text or from raw components.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Parses a `YYYY-MM-DD` string as a local calendar date.
///
/// The components are read as plain integers and assembled directly, so the
/// result is the written day no matter what the host's UTC offset is.
///
/// # Errors
/// Returns `ParseError` for empty input, a wrong number of components,
/// non-numeric components, or a date that does not exist.
pub fn parse_local_date(s: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s) in {trimmed}",
            parts.len()
        )));
    };

    let year = Year::new(parse_component(year)?)?;
    let month = Month::new(parse_component(month)?)?;
    let day = Day::new(parse_component(day)?, year, month)?;
    types::calendar_date(year, month, day)
}

/// Helper to parse a numeric component with a readable error
fn parse_component<T: std::str::FromStr>(s: &str) -> Result<T, ParseError> {
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}
