//! Locale-dependent data: segment order and display strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DAY_FIRST_LOCALES, DEFAULT_LOCALE, PresetName, Segment};

/// Whether `locale` conventionally writes the day before the month.
///
/// Matching is by language prefix against [`DAY_FIRST_LOCALES`], so `en-CA`
/// or a bare `fr` count as day-first. Only `en-US` is excluded from its
/// language's classification.
pub fn is_day_first(locale: &str) -> bool {
    locale != DEFAULT_LOCALE
        && DAY_FIRST_LOCALES.iter().any(|tag| {
            let language = tag.split('-').next().unwrap_or(tag);
            locale.starts_with(language)
        })
}

/// Left-to-right order of the three segments of a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldOrder {
    /// D / M / Y
    DayFirst,
    /// M / D / Y
    #[default]
    MonthFirst,
}

impl FieldOrder {
    pub fn for_locale(locale: &str) -> Self {
        if is_day_first(locale) {
            Self::DayFirst
        } else {
            Self::MonthFirst
        }
    }

    pub const fn segments(self) -> [Segment; 3] {
        match self {
            Self::DayFirst => [Segment::Day, Segment::Month, Segment::Year],
            Self::MonthFirst => [Segment::Month, Segment::Day, Segment::Year],
        }
    }

    /// Segment to the right of `segment`, if any.
    pub fn next(self, segment: Segment) -> Option<Segment> {
        let segments = self.segments();
        let index = segments.iter().position(|&s| s == segment)?;
        segments.get(index + 1).copied()
    }

    /// Segment to the left of `segment`, if any.
    pub fn previous(self, segment: Segment) -> Option<Segment> {
        let segments = self.segments();
        let index = segments.iter().position(|&s| s == segment)?;
        index.checked_sub(1).and_then(|i| segments.get(i).copied())
    }
}

/// Buttons and toggles whose captions are translatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Update,
    Compare,
    Cancel,
}

/// Free-standing translatable labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Label {
    SelectPlaceholder,
}

/// Partial replacement strings, grouped by category.
///
/// Supplying one key in a category leaves its siblings at their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationOverrides {
    pub presets: BTreeMap<PresetName, String>,
    pub actions: BTreeMap<Action, String>,
    pub labels:  BTreeMap<Label, String>,
}

/// Display strings used by the picker, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translations {
    overrides: TranslationOverrides,
}

impl Translations {
    /// The baked `en-US` table with `overrides` merged over it.
    pub fn with_overrides(overrides: TranslationOverrides) -> Self {
        Self { overrides }
    }

    pub fn preset(&self, name: PresetName) -> &str {
        self.overrides
            .presets
            .get(&name)
            .map_or_else(|| default_preset_label(name), String::as_str)
    }

    pub fn action(&self, action: Action) -> &str {
        self.overrides
            .actions
            .get(&action)
            .map_or_else(|| default_action_label(action), String::as_str)
    }

    pub fn label(&self, label: Label) -> &str {
        self.overrides
            .labels
            .get(&label)
            .map_or_else(|| default_label(label), String::as_str)
    }
}

const fn default_preset_label(name: PresetName) -> &'static str {
    match name {
        PresetName::Today => "Today",
        PresetName::Yesterday => "Yesterday",
        PresetName::Last7 => "Last 7 days",
        PresetName::Last14 => "Last 14 days",
        PresetName::Last30 => "Last 30 days",
        PresetName::ThisWeek => "This Week",
        PresetName::LastWeek => "Last Week",
        PresetName::ThisMonth => "This Month",
        PresetName::LastMonth => "Last Month",
    }
}

const fn default_action_label(action: Action) -> &'static str {
    match action {
        Action::Update => "Update",
        Action::Compare => "Compare",
        Action::Cancel => "Cancel",
    }
}

const fn default_label(label: Label) -> &'static str {
    match label {
        Label::SelectPlaceholder => "Select...",
    }
}
