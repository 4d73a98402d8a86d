use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, END_OF_DAY_MILLIS, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_YEAR,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year a user may type into a date field, guaranteed to be in
/// `MIN_YEAR..=MAX_YEAR` (1000..=9999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it has four digits
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            return Err(ParseError::InvalidYear(value));
        }
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(ParseError::InvalidYear(value))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        Self::from(year.0.get())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        Self::from(month.0.get())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to exist in a given year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of `year`-`month`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month: month.get(),
            day: value,
            year: year.get(),
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > days_in_month(i32::from(year), month.get()) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u32 {
    fn from(day: Day) -> Self {
        Self::from(day.0.get())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the calendar date for already validated components.
pub fn calendar_date(year: Year, month: Month, day: Day) -> Result<NaiveDate, ParseError> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)).ok_or(
        ParseError::InvalidDay {
            month: month.get(),
            day: day.get(),
            year: year.get(),
        },
    )
}

// Calendar arithmetic

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Midnight (00:00:00.000) of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond (23:59:59.999) of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + TimeDelta::milliseconds(END_OF_DAY_MILLIS)
}

/// Drops the time-of-day component.
pub fn truncate_to_day(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant.date())
}

/// Day 1 of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.day0()))
}

/// Moves `date` by whole calendar years, keeping month and day.
///
/// A day that does not exist in the target year (Feb 29) rolls forward into
/// the following month, the same way local calendar construction overflows.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + years, date.month(), 1)
        .map_or(date, |first| first + TimeDelta::days(i64::from(date.day0())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1000).is_ok());
        assert!(Year::new(2024).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_rejects_short_and_long_years() {
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(999), Err(ParseError::InvalidYear(999))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_try_from_u16() {
        let year: Year = 2024.try_into().unwrap();
        assert_eq!(year.get(), 2024);
        assert_eq!(i32::from(year), 2024);

        let result: Result<Year, _> = 12.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_depends_on_month_length() {
        let leap = Year::new(2024).unwrap();
        let common = Year::new(2023).unwrap();
        let feb = Month::new(2).unwrap();
        let apr = Month::new(4).unwrap();

        assert!(Day::new(29, leap, feb).is_ok());
        assert!(Day::new(30, leap, feb).is_err());
        assert!(Day::new(29, common, feb).is_err());
        assert!(Day::new(30, common, apr).is_ok());
        assert!(matches!(
            Day::new(31, common, apr),
            Err(ParseError::InvalidDay {
                month: 4,
                day: 31,
                year: 2023
            })
        ));
        assert!(Day::new(0, common, apr).is_err());
    }

    #[test]
    fn test_display() {
        let year = Year::new(2024).unwrap();
        let month = Month::new(8).unwrap();
        let day = Day::new(5, year, month).unwrap();
        assert_eq!(year.to_string(), "2024");
        assert_eq!(month.to_string(), "8");
        assert_eq!(day.to_string(), "5");
    }

    #[test]
    fn test_serde_validates_components() {
        let year: Year = serde_json::from_str("2024").unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "2024");
        assert!(serde_json::from_str::<Year>("999").is_err());

        let month: Month = serde_json::from_str("12").unwrap();
        assert_eq!(month.get(), 12);
        assert!(serde_json::from_str::<Month>("0").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, expected) in [
            (2020, true),
            (2024, true),
            (2023, false),
            (1900, false),
            (2100, false),
            (2000, true),
            (2400, true),
        ] {
            assert_eq!(is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u8 {
            assert_eq!(days_in_month(2023, month), expected[month as usize]);
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_day_boundaries() {
        let d = date(2024, 6, 15);
        assert_eq!(start_of_day(d).to_string(), "2024-06-15 00:00:00");
        assert_eq!(end_of_day(d).to_string(), "2024-06-15 23:59:59.999");
        assert_eq!(truncate_to_day(end_of_day(d)), start_of_day(d));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(first_of_month(date(2024, 3, 31)), date(2024, 3, 1));
        assert_eq!(first_of_month(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn test_shift_years_keeps_month_and_day() {
        assert_eq!(shift_years(date(2024, 6, 10), -1), date(2023, 6, 10));
        assert_eq!(shift_years(date(2024, 12, 31), -1), date(2023, 12, 31));
    }

    #[test]
    fn test_shift_years_rolls_leap_day_forward() {
        assert_eq!(shift_years(date(2024, 2, 29), -1), date(2023, 3, 1));
        assert_eq!(shift_years(date(2024, 2, 29), -4), date(2020, 2, 29));
    }
}
