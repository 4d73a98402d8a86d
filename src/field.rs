//! The segmented day / month / year input used for each range endpoint.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::prelude::*;
use crate::types::{calendar_date, days_in_month, start_of_day};
use crate::{Bounds, DECEMBER, Day, FieldOrder, JANUARY, MIN_DAY, Month, ParseError, Year};

/// One editable numeric component of a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// Raw segment values as displayed.
///
/// Outside of a keystroke these always form a legal calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateParts {
    pub day:   u8,
    pub month: u8,
    pub year:  i32,
}

impl DateParts {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            // day() and month() are at most 31 and 12
            day:   u8::try_from(date.day()).unwrap_or(MIN_DAY),
            month: u8::try_from(date.month()).unwrap_or(JANUARY),
            year:  date.year(),
        }
    }

    pub const fn get(self, segment: Segment) -> i32 {
        match segment {
            Segment::Day => self.day as i32,
            Segment::Month => self.month as i32,
            Segment::Year => self.year,
        }
    }

    /// Replaces one segment. Values too large for the segment saturate and
    /// are caught by [`DateParts::validate`].
    pub fn with(self, segment: Segment, value: u32) -> Self {
        match segment {
            Segment::Day => Self {
                day: u8::try_from(value).unwrap_or(u8::MAX),
                ..self
            },
            Segment::Month => Self {
                month: u8::try_from(value).unwrap_or(u8::MAX),
                ..self
            },
            Segment::Year => Self {
                year: i32::try_from(value).unwrap_or(i32::MAX),
                ..self
            },
        }
    }

    /// Checks the typed-input ranges (day 1-31, month 1-12, year 1000-9999)
    /// and that the triple names a real day.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that fails.
    pub fn validate(self) -> Result<NaiveDate, ParseError> {
        let year = u16::try_from(self.year)
            .map_err(|_| ParseError::InvalidFormat(self.year.to_string()))
            .and_then(Year::new)?;
        let month = Month::new(self.month)?;
        let day = Day::new(self.day, year, month)?;
        calendar_date(year, month, day)
    }

    /// Steps one segment by one, carrying into the larger segments.
    ///
    /// Rolling the month or year keeps the day inside the new month, so
    /// Jan 31 + 1 month is Feb 28/29.
    pub fn rolled(self, segment: Segment, up: bool) -> Self {
        let Self { day, month, year } = self;
        match (segment, up) {
            (Segment::Day, true) if day >= days_in_month(year, month) => {
                let (year, month) = next_month(year, month);
                Self { day: MIN_DAY, month, year }
            },
            (Segment::Day, true) => Self { day: day + 1, ..self },
            (Segment::Day, false) if day <= MIN_DAY => {
                let (year, month) = previous_month(year, month);
                Self {
                    day: days_in_month(year, month),
                    month,
                    year,
                }
            },
            (Segment::Day, false) => Self { day: day - 1, ..self },
            (Segment::Month, true) => Self::fitted(day, next_month(year, month)),
            (Segment::Month, false) => Self::fitted(day, previous_month(year, month)),
            (Segment::Year, true) => Self::fitted(day, (year.saturating_add(1), month)),
            (Segment::Year, false) => Self::fitted(day, (year.saturating_sub(1), month)),
        }
    }

    fn fitted(day: u8, (year, month): (i32, u8)) -> Self {
        Self {
            day: day.min(days_in_month(year, month)),
            month,
            year,
        }
    }

    /// The calendar date, without the typed-input year range check.
    fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
    }
}

fn next_month(year: i32, month: u8) -> (i32, u8) {
    if month >= DECEMBER {
        (year.saturating_add(1), JANUARY)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u8) -> (i32, u8) {
    if month <= JANUARY {
        (year.saturating_sub(1), DECEMBER)
    } else {
        (year, month - 1)
    }
}

/// Where a field is in its edit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldState {
    /// Showing the externally supplied value; external updates are applied.
    #[default]
    Idle,
    /// The user has typed into `segment`; external updates are ignored.
    Editing { segment: Segment },
    /// Validating and clamping on blur.
    Committing,
}

/// A key press delivered to a segment before the browser applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Backspace,
    Delete,
    Tab,
    Enter,
    /// Any key combined with Ctrl or Cmd.
    Shortcut,
    /// Any other named key (Escape, Home, F5, ...).
    Other,
}

/// Text selection within a segment, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Caret {
    pub start: usize,
    pub end:   usize,
}

impl Caret {
    pub const fn at(position: usize) -> Self {
        Self {
            start: position,
            end:   position,
        }
    }

    pub const fn select(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What the UI should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyResponse {
    /// Let the key through; a text change arrives later through `input`.
    PassThrough,
    /// Swallow the key.
    Suppressed,
    /// The key rolled a segment; the new value is reported.
    Changed(NaiveDateTime),
    /// Move focus to another segment.
    Focus(Segment),
}

/// Three-segment date entry with live validation and commit-time clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    parts:      DateParts,
    last_valid: DateParts,
    state:      FieldState,
    order:      FieldOrder,
    bounds:     Bounds,
}

impl DateField {
    pub fn new(value: NaiveDateTime, order: FieldOrder, bounds: Bounds) -> Self {
        let parts = DateParts::from_date(value.date());
        Self {
            parts,
            last_valid: parts,
            state: FieldState::Idle,
            order,
            bounds,
        }
    }

    pub const fn parts(&self) -> DateParts {
        self.parts
    }

    pub const fn state(&self) -> FieldState {
        self.state
    }

    pub const fn order(&self) -> FieldOrder {
        self.order
    }

    /// The displayed value at midnight, if the segments form a date.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.parts.to_date().map(start_of_day)
    }

    /// Displayed text of one segment, without padding.
    pub fn text(&self, segment: Segment) -> String {
        self.parts.get(segment).to_string()
    }

    /// Applies an externally supplied value unless the user is mid-edit.
    /// Returns whether the value was taken.
    pub fn sync(&mut self, value: NaiveDateTime) -> bool {
        if matches!(self.state, FieldState::Editing { .. }) {
            trace!(%value, "sync ignored while editing");
            return false;
        }
        self.parts = DateParts::from_date(value.date());
        self.last_valid = self.parts;
        true
    }

    /// Handles the segment's text changing to `text` after a keystroke.
    ///
    /// The change is kept only if the resulting triple is a real date inside
    /// the bounds; in that case the new value (at midnight) is returned.
    pub fn input(&mut self, segment: Segment, text: &str) -> Option<NaiveDateTime> {
        self.state = FieldState::Editing { segment };

        let (parts, date) = match self.propose(segment, text) {
            Ok(proposal) => proposal,
            Err(err) => {
                trace!(%segment, text, %err, "keystroke rejected");
                return None;
            },
        };

        let tentative = start_of_day(date);
        if !self.bounds.contains(tentative) {
            trace!(%segment, %tentative, "keystroke rejected: outside bounds");
            return None;
        }

        self.parts = parts;
        Some(tentative)
    }

    /// Filters a key press and handles arrow keys.
    pub fn key_down(&mut self, segment: Segment, key: Key, caret: Caret) -> KeyResponse {
        match key {
            Key::Shortcut
            | Key::Backspace
            | Key::Delete
            | Key::Tab
            | Key::Enter => KeyResponse::PassThrough,
            Key::Char(c) if c.is_ascii_digit() => KeyResponse::PassThrough,
            Key::Char(_) | Key::Other => KeyResponse::Suppressed,
            Key::ArrowUp => self.roll(segment, true),
            Key::ArrowDown => self.roll(segment, false),
            Key::ArrowRight => {
                let len = self.text(segment).len();
                let at_end = caret.start == len || (caret.start == 0 && caret.end == len);
                if at_end {
                    self.order
                        .next(segment)
                        .map_or(KeyResponse::Suppressed, KeyResponse::Focus)
                } else {
                    KeyResponse::PassThrough
                }
            },
            Key::ArrowLeft => {
                if caret.start == 0 {
                    self.order
                        .previous(segment)
                        .map_or(KeyResponse::Suppressed, KeyResponse::Focus)
                } else {
                    KeyResponse::PassThrough
                }
            },
        }
    }

    /// Commits the segment when it loses focus.
    ///
    /// Empty or invalid text reverts to the last valid triple. A valid date
    /// outside the bounds is clamped into them. Returns the new value when
    /// the committed date differs from what was displayed.
    pub fn blur(&mut self, segment: Segment, text: &str) -> Option<NaiveDateTime> {
        self.state = FieldState::Committing;
        let changed = self.commit(segment, text);
        self.state = FieldState::Idle;
        changed
    }

    fn commit(&mut self, segment: Segment, text: &str) -> Option<NaiveDateTime> {
        let Ok((parts, date)) = self.propose(segment, text) else {
            trace!(%segment, text, "reverting to last valid date");
            self.parts = self.last_valid;
            return None;
        };

        let typed = start_of_day(date);
        let clamped = self.bounds.clamp(typed);
        let committed = if clamped == typed {
            parts
        } else {
            DateParts::from_date(clamped.date())
        };

        let displayed = self.parts;
        self.parts = committed;
        self.last_valid = committed;

        if clamped != typed {
            trace!(%segment, %typed, %clamped, "committed date clamped into bounds");
            Some(clamped)
        } else if committed != displayed {
            Some(typed)
        } else {
            None
        }
    }

    fn propose(&self, segment: Segment, text: &str) -> Result<(DateParts, NaiveDate), ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let value = text
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat(text.to_owned()))?;
        let parts = self.parts.with(segment, value);
        let date = parts.validate()?;
        Ok((parts, date))
    }

    fn roll(&mut self, segment: Segment, up: bool) -> KeyResponse {
        let rolled = self.parts.rolled(segment, up);
        match rolled.to_date() {
            Some(date) => {
                self.parts = rolled;
                KeyResponse::Changed(start_of_day(date))
            },
            None => KeyResponse::Suppressed,
        }
    }
}
