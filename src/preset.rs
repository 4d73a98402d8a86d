use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::{end_of_day, first_of_month, start_of_day};
use crate::{DateRange, ranges_equal};

/// Every shortcut the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetName {
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "yesterday")]
    Yesterday,
    #[display(fmt = "last7")]
    Last7,
    #[display(fmt = "last14")]
    Last14,
    #[display(fmt = "last30")]
    Last30,
    #[display(fmt = "thisWeek")]
    ThisWeek,
    #[display(fmt = "lastWeek")]
    LastWeek,
    #[display(fmt = "thisMonth")]
    ThisMonth,
    #[display(fmt = "lastMonth")]
    LastMonth,
}

impl PresetName {
    pub const ALL: [Self; 9] = [
        Self::Today,
        Self::Yesterday,
        Self::Last7,
        Self::Last14,
        Self::Last30,
        Self::ThisWeek,
        Self::LastWeek,
        Self::ThisMonth,
        Self::LastMonth,
    ];

    /// The shortcuts offered when the caller doesn't choose a list.
    pub const DEFAULT_LIST: [Self; 5] = [
        Self::Yesterday,
        Self::Last7,
        Self::Last30,
        Self::ThisMonth,
        Self::LastMonth,
    ];
}

impl FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.to_string() == s)
            .ok_or_else(|| PresetError::UnknownPreset(s.to_owned()))
    }
}

/// A shortcut as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preset {
    pub name:  PresetName,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    /// The name does not belong to the closed preset set.
    #[error("Unknown date range preset: {0}")]
    UnknownPreset(String),
}

/// Resolves `preset` against `now` into a concrete range.
///
/// `from` is pinned to midnight and `to` to 23:59:59.999 of their days.
/// The rolling presets (`last7`, `last14`, `last30`) count today, while
/// `lastWeek` covers only the previous Sunday-to-Saturday week.
pub fn resolve(preset: PresetName, now: NaiveDateTime) -> DateRange {
    let today = now.date();
    let days = |n: u32| TimeDelta::days(i64::from(n));
    let week_start = today - days(today.weekday().num_days_from_sunday());

    let (from, to) = match preset {
        PresetName::Today => (today, today),
        PresetName::Yesterday => (today - days(1), today - days(1)),
        PresetName::Last7 => (today - days(6), today),
        PresetName::Last14 => (today - days(13), today),
        PresetName::Last30 => (today - days(29), today),
        PresetName::ThisWeek => (week_start, today),
        PresetName::LastWeek => (week_start - days(7), week_start - days(1)),
        PresetName::ThisMonth => (first_of_month(today), today),
        PresetName::LastMonth => {
            // day 0 of this month is the last day of the previous one
            let last_day = first_of_month(today) - days(1);
            (first_of_month(last_day), last_day)
        },
    };

    DateRange::new(start_of_day(from), Some(end_of_day(to)))
}

/// Finds the first candidate whose resolved range covers the same days as
/// `range`. Times of day are ignored on both sides.
pub fn derive_active_preset<I>(range: &DateRange, candidates: I, now: NaiveDateTime) -> Option<PresetName>
where
    I: IntoIterator<Item = PresetName>,
{
    // a half-finished selection never highlights a shortcut
    if range.to.is_none() {
        return None;
    }
    let live = range.truncated_to_days();

    candidates.into_iter().find(|&name| {
        let candidate = resolve(name, now).truncated_to_days();
        ranges_equal(Some(&live), Some(&candidate))
    })
}
