use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{start_of_day, truncate_to_day};
use crate::{
    Bounds, DEFAULT_LOCALE, DateRange, ParseError, PresetName, TranslationOverrides,
    parse_local_date,
};

/// A configured date: either a full local instant or a `YYYY-MM-DD` day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    At(NaiveDateTime),
    Day(String),
}

impl DateValue {
    /// The instant this value names; a day string means its local midnight.
    ///
    /// # Errors
    /// Returns `ParseError` when a day string is malformed.
    pub fn resolve(&self) -> Result<NaiveDateTime, ParseError> {
        match self {
            Self::At(at) => Ok(*at),
            Self::Day(day) => parse_local_date(day).map(start_of_day),
        }
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(at: NaiveDateTime) -> Self {
        Self::At(at)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(day: NaiveDate) -> Self {
        Self::At(start_of_day(day))
    }
}

impl From<&str> for DateValue {
    fn from(day: &str) -> Self {
        Self::Day(day.to_owned())
    }
}

/// Where the preset buttons sit next to the calendar on wide screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetPosition {
    Left,
    #[default]
    Right,
    #[serde(rename = "none")]
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A configured date could not be read.
    #[error("Invalid {field}: {source}")]
    InvalidDate {
        field:  &'static str,
        source: ParseError,
    },
}

/// Construction options for [`crate::DateRangePicker`]. Every field has a
/// default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub initial_date_from:    Option<DateValue>,
    pub initial_date_to:      Option<DateValue>,
    pub initial_compare_from: Option<DateValue>,
    pub initial_compare_to:   Option<DateValue>,
    pub locale:               String,
    pub show_compare:         bool,
    pub preset_position:      PresetPosition,
    pub min_date:             Option<DateValue>,
    pub max_date:             Option<DateValue>,
    pub translations:         TranslationOverrides,
    /// Shortcuts offered to the user, in display order.
    pub presets:              Vec<PresetName>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_date_from:    None,
            initial_date_to:      None,
            initial_compare_from: None,
            initial_compare_to:   None,
            locale:               DEFAULT_LOCALE.to_owned(),
            show_compare:         true,
            preset_position:      PresetPosition::default(),
            min_date:             None,
            max_date:             None,
            translations:         TranslationOverrides::default(),
            presets:              PresetName::DEFAULT_LIST.to_vec(),
        }
    }
}

impl PickerConfig {
    /// Primary and comparison ranges to start from.
    ///
    /// Without an initial `from` the primary range is today at midnight; a
    /// missing `to` copies `from`. Comparison endpoints are truncated to
    /// midnight and exist only when `initial_compare_from` is set.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDate` naming the first unreadable field.
    pub fn initial_ranges(
        &self,
        now: NaiveDateTime,
    ) -> Result<(DateRange, Option<DateRange>), ConfigError> {
        let from = resolve_field("initialDateFrom", self.initial_date_from.as_ref())?
            .unwrap_or_else(|| truncate_to_day(now));
        let to = resolve_field("initialDateTo", self.initial_date_to.as_ref())?.unwrap_or(from);

        let compare = match resolve_field("initialCompareFrom", self.initial_compare_from.as_ref())? {
            Some(compare_from) => {
                let compare_from = truncate_to_day(compare_from);
                let compare_to = resolve_field("initialCompareTo", self.initial_compare_to.as_ref())?
                    .map_or(compare_from, truncate_to_day);
                Some(DateRange::new(compare_from, Some(compare_to)))
            },
            None => None,
        };

        Ok((DateRange::new(from, Some(to)), compare))
    }

    /// The selectable window, falling back to [`Bounds::default_for`].
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDate` if `minDate` or `maxDate` is malformed.
    pub fn bounds(&self, now: NaiveDateTime) -> Result<Bounds, ConfigError> {
        let defaults = Bounds::default_for(now);
        Ok(Bounds::new(
            resolve_field("minDate", self.min_date.as_ref())?.unwrap_or(defaults.min_date),
            resolve_field("maxDate", self.max_date.as_ref())?.unwrap_or(defaults.max_date),
        ))
    }
}

fn resolve_field(
    field: &'static str,
    value: Option<&DateValue>,
) -> Result<Option<NaiveDateTime>, ConfigError> {
    value
        .map(DateValue::resolve)
        .transpose()
        .map_err(|source| ConfigError::InvalidDate { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, end_of, midnight};

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: PickerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PickerConfig::default());
        assert_eq!(config.locale, "en-US");
        assert!(config.show_compare);
        assert_eq!(config.preset_position, PresetPosition::Right);
        assert_eq!(config.presets, PresetName::DEFAULT_LIST.to_vec());
    }

    #[test]
    fn test_full_json() {
        let config: PickerConfig = serde_json::from_str(
            r#"{
                "initialDateFrom": "2023-01-01",
                "initialDateTo": "2023-12-31T18:30:00",
                "locale": "pt-BR",
                "showCompare": false,
                "presetPosition": "none",
                "minDate": "2020-01-01",
                "presets": ["today", "lastWeek"],
                "translations": { "actions": { "update": "Aplicar" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.initial_date_from, Some(DateValue::Day("2023-01-01".to_owned())));
        assert_eq!(config.initial_date_to, Some(DateValue::At(at(2023, 12, 31, 18, 30))));
        assert_eq!(config.locale, "pt-BR");
        assert!(!config.show_compare);
        assert_eq!(config.preset_position, PresetPosition::Hidden);
        assert_eq!(config.presets, vec![PresetName::Today, PresetName::LastWeek]);
        assert_eq!(config.translations.actions.len(), 1);
    }

    #[test]
    fn test_day_strings_resolve_to_local_midnight() {
        let value = DateValue::from("2023-06-30");
        assert_eq!(value.resolve().unwrap(), midnight(2023, 6, 30));
    }

    #[test]
    fn test_initial_ranges_defaults() {
        let now = at(2024, 6, 15, 14, 0);
        let (range, compare) = PickerConfig::default().initial_ranges(now).unwrap();
        assert_eq!(range, DateRange::single(midnight(2024, 6, 15)));
        assert_eq!(compare, None);
    }

    #[test]
    fn test_initial_ranges_from_strings() {
        let config = PickerConfig {
            initial_date_from: Some("2023-01-01".into()),
            initial_date_to: Some("2023-12-31".into()),
            initial_compare_from: Some(at(2022, 1, 1, 9, 15).into()),
            ..PickerConfig::default()
        };
        let (range, compare) = config.initial_ranges(at(2024, 6, 15, 14, 0)).unwrap();
        assert_eq!(range, DateRange::new(midnight(2023, 1, 1), Some(midnight(2023, 12, 31))));
        assert_eq!(compare, Some(DateRange::single(midnight(2022, 1, 1))));
    }

    #[test]
    fn test_initial_to_defaults_to_from() {
        let config = PickerConfig {
            initial_date_from: Some(at(2024, 3, 3, 8, 0).into()),
            ..PickerConfig::default()
        };
        let (range, _) = config.initial_ranges(at(2024, 6, 15, 14, 0)).unwrap();
        assert_eq!(range, DateRange::single(at(2024, 3, 3, 8, 0)));
    }

    #[test]
    fn test_bounds_defaults_and_overrides() {
        let now = at(2024, 6, 15, 14, 0);
        let bounds = PickerConfig::default().bounds(now).unwrap();
        assert_eq!(bounds, Bounds::new(midnight(2024, 1, 1), end_of(2024, 6, 15)));

        let config = PickerConfig {
            max_date: Some("2030-12-31".into()),
            ..PickerConfig::default()
        };
        let bounds = config.bounds(now).unwrap();
        assert_eq!(bounds.min_date, midnight(2024, 1, 1));
        assert_eq!(bounds.max_date, midnight(2030, 12, 31));
    }

    #[test]
    fn test_invalid_date_names_the_field() {
        let config = PickerConfig {
            initial_compare_to: Some("2024-02-30".into()),
            initial_compare_from: Some("2024-02-01".into()),
            ..PickerConfig::default()
        };
        let err = config.initial_ranges(at(2024, 6, 15, 14, 0)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDate {
                field: "initialCompareTo",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid initialCompareTo: Invalid day 30 for month 2024-02"
        );
    }
}
