//! The controller tying presets, fields and the compare range together.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::types::{shift_years, start_of_day};
use crate::{
    Bounds, COMPARE_OFFSET_DAYS, Caret, Clock, ConfigError, DateField, DateRange, FieldOrder, Key,
    KeyResponse, PickerConfig, Preset, PresetError, PresetName, PresetPosition, RangeUpdate,
    SMALL_SCREEN_WIDTH, Segment, SystemClock, Translations, derive_active_preset, ranges_equal,
    resolve,
};

/// One of the four date fields the picker renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    PrimaryFrom,
    PrimaryTo,
    CompareFrom,
    CompareTo,
}

/// How the preset shortcuts should be laid out for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetDisplay {
    /// A column of buttons left of the calendar.
    Left,
    /// A column of buttons right of the calendar.
    Right,
    /// A single dropdown above the calendar (narrow screens).
    Dropdown,
    Hidden,
}

type UpdateListener = Box<dyn FnMut(&RangeUpdate)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    range:         DateRange,
    range_compare: Option<DateRange>,
}

#[derive(Debug, Clone)]
struct Fields {
    primary_from: DateField,
    primary_to:   DateField,
    compare_from: DateField,
    compare_to:   DateField,
}

/// State and behaviour of a date range picker, independent of rendering.
///
/// The picker owns the primary range, the optional comparison range and
/// the highlighted preset. The highlighted preset is recomputed from the
/// range after every change and can't be set directly.
pub struct DateRangePicker<C = SystemClock> {
    clock:           C,
    bounds:          Bounds,
    locale:          String,
    order:           FieldOrder,
    show_compare:    bool,
    preset_position: PresetPosition,
    candidates:      Vec<PresetName>,
    translations:    Translations,
    initial:         Snapshot,
    range:           DateRange,
    range_compare:   Option<DateRange>,
    selected_preset: Option<PresetName>,
    is_open:         bool,
    opened:          Option<Snapshot>,
    small_screen:    bool,
    fields:          Fields,
    on_update:       Option<UpdateListener>,
}

impl DateRangePicker<SystemClock> {
    /// Builds a picker reading "now" from the host clock.
    ///
    /// # Errors
    /// Returns `ConfigError` if a configured date can't be parsed.
    pub fn new(config: &PickerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> DateRangePicker<C> {
    /// Builds a picker with an explicit clock.
    ///
    /// # Errors
    /// Returns `ConfigError` if a configured date can't be parsed.
    pub fn with_clock(config: &PickerConfig, clock: C) -> Result<Self, ConfigError> {
        let now = clock.now();
        let (range, range_compare) = config.initial_ranges(now)?;
        let bounds = config.bounds(now)?;
        let order = FieldOrder::for_locale(&config.locale);
        let initial = Snapshot { range, range_compare };

        let mut picker = Self {
            fields: build_fields(initial, now, order, bounds),
            clock,
            bounds,
            locale: config.locale.clone(),
            order,
            show_compare: config.show_compare,
            preset_position: config.preset_position,
            candidates: config.presets.clone(),
            translations: Translations::with_overrides(config.translations.clone()),
            initial,
            range,
            range_compare,
            selected_preset: None,
            is_open: false,
            opened: None,
            small_screen: false,
            on_update: None,
        };
        picker.refresh_selected_preset();
        Ok(picker)
    }

    /// Registers the listener called when a commit changes the selection.
    pub fn on_update(&mut self, listener: impl FnMut(&RangeUpdate) + 'static) {
        self.on_update = Some(Box::new(listener));
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub const fn range_compare(&self) -> Option<DateRange> {
        self.range_compare
    }

    pub const fn selected_preset(&self) -> Option<PresetName> {
        self.selected_preset
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub const fn field_order(&self) -> FieldOrder {
        self.order
    }

    pub const fn show_compare(&self) -> bool {
        self.show_compare
    }

    pub const fn translations(&self) -> &Translations {
        &self.translations
    }

    /// The offered shortcuts with their display labels.
    pub fn presets(&self) -> Vec<Preset> {
        self.candidates
            .iter()
            .map(|&name| Preset {
                name,
                label: self.translations.preset(name).to_owned(),
            })
            .collect()
    }

    pub const fn field(&self, endpoint: Endpoint) -> &DateField {
        match endpoint {
            Endpoint::PrimaryFrom => &self.fields.primary_from,
            Endpoint::PrimaryTo => &self.fields.primary_to,
            Endpoint::CompareFrom => &self.fields.compare_from,
            Endpoint::CompareTo => &self.fields.compare_to,
        }
    }

    // --- range edits ---

    /// Replaces the range with the preset's range. An active comparison
    /// follows, moved back one calendar year.
    pub fn select_preset(&mut self, name: PresetName) {
        let range = resolve(name, self.clock.now());
        debug!(preset = %name, %range, "preset selected");
        if self.range_compare.is_some() {
            self.range_compare = Some(range.previous_year());
        }
        self.set_range(range);
    }

    /// [`Self::select_preset`] by the preset's wire name.
    ///
    /// # Errors
    /// Returns `PresetError::UnknownPreset` if `name` isn't a preset.
    pub fn select_preset_named(&mut self, name: &str) -> Result<(), PresetError> {
        let preset = name.parse::<PresetName>()?;
        self.select_preset(preset);
        Ok(())
    }

    /// Moves the start of the range, dragging `to` along if it would end up
    /// before `from`.
    pub fn set_primary_from(&mut self, date: NaiveDateTime) {
        let to = match self.range.to {
            Some(to) if date <= to => to,
            _ => date,
        };
        self.set_range(DateRange::new(date, Some(to)));
    }

    /// Moves the end of the range, dragging `from` along if it would end up
    /// after `to`.
    pub fn set_primary_to(&mut self, date: NaiveDateTime) {
        let from = if date < self.range.from { date } else { self.range.from };
        self.set_range(DateRange::new(from, Some(date)));
    }

    /// Moves the start of the comparison range. With comparison disabled
    /// this creates one running from `date` to now.
    pub fn set_compare_from(&mut self, date: NaiveDateTime) {
        let compare = match self.range_compare {
            Some(compare) => {
                let to = match compare.to {
                    Some(to) if date <= to => to,
                    _ => date,
                };
                DateRange::new(date, Some(to))
            },
            None => DateRange::new(date, Some(self.clock.now())),
        };
        self.set_range_compare(Some(compare));
    }

    /// Moves the end of the comparison range; ignored while comparison is off.
    pub fn set_compare_to(&mut self, date: NaiveDateTime) {
        let Some(compare) = self.range_compare else {
            return;
        };
        let from = if date < compare.from { date } else { compare.from };
        self.set_range_compare(Some(DateRange::new(from, Some(date))));
    }

    /// Applies a selection reported by the calendar grid. A selection without
    /// a start is ignored; one without an end leaves `to` open.
    pub fn select_calendar_range(&mut self, from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) {
        if let Some(from) = from {
            self.set_range(DateRange::new(from, to));
        }
    }

    /// Turns the comparison range on or off.
    ///
    /// Enabling closes an open primary range first, then starts the
    /// comparison 365 days before `from` and ends it one calendar year
    /// before `to`. Disabling drops the comparison range.
    pub fn toggle_compare(&mut self, enabled: bool) {
        if !enabled {
            debug!("compare disabled");
            self.set_range_compare(None);
            return;
        }

        let closed = self.range.closed();
        if closed != self.range {
            self.set_range(closed);
        }
        let to = closed.to.unwrap_or(closed.from);
        let compare = DateRange::new(
            start_of_day(closed.from.date() - TimeDelta::days(COMPARE_OFFSET_DAYS)),
            Some(start_of_day(shift_years(to.date(), -1))),
        );
        debug!(%compare, "compare enabled");

        let now = self.clock.now();
        self.fields.compare_from = DateField::new(compare.from, self.order, self.bounds);
        self.fields.compare_to = DateField::new(compare.to.unwrap_or(now), self.order, self.bounds);
        self.range_compare = Some(compare);
    }

    // --- popover lifecycle ---

    /// Opens the popover and remembers the selection to compare against on
    /// commit and to restore on cancel.
    pub fn open(&mut self) {
        self.is_open = true;
        self.opened = Some(self.current());
        self.rebuild_fields();
    }

    /// Discards edits made since the popover opened and closes it.
    ///
    /// Without a recorded opening the constructor's initial values are
    /// restored.
    pub fn cancel(&mut self) {
        let restore = self.opened.unwrap_or(self.initial);
        debug!(range = %restore.range, "selection reverted");
        self.is_open = false;
        self.range = restore.range;
        self.range_compare = restore.range_compare;
        self.refresh_selected_preset();
        self.rebuild_fields();
    }

    /// Closing by clicking outside the popover behaves like cancel.
    pub fn dismiss(&mut self) {
        self.cancel();
    }

    /// Closes the popover and publishes the selection if it changed.
    ///
    /// The primary range is clamped into the bounds in the published value;
    /// the comparison range is passed through as is. Returns the published
    /// update, or `None` when nothing changed since the popover opened.
    pub fn commit(&mut self) -> Option<RangeUpdate> {
        self.is_open = false;

        let opened = self.opened.as_ref();
        let unchanged = ranges_equal(Some(&self.range), opened.map(|s| &s.range))
            && ranges_equal(
                self.range_compare.as_ref(),
                opened.and_then(|s| s.range_compare.as_ref()),
            );
        if unchanged {
            debug!("commit without changes, no update published");
            return None;
        }

        let update = RangeUpdate {
            range:         self.bounds.clamp_range(self.range),
            range_compare: self.range_compare,
        };
        debug!(range = %update.range, "publishing update");
        if let Some(listener) = self.on_update.as_mut() {
            listener(&update);
        }
        Some(update)
    }

    // --- field routing ---

    /// Forwards a segment's text change and applies an accepted value.
    pub fn field_input(&mut self, endpoint: Endpoint, segment: Segment, text: &str) -> Option<NaiveDateTime> {
        let changed = self.field_mut(endpoint).input(segment, text);
        if let Some(date) = changed {
            self.apply(endpoint, date);
        }
        changed
    }

    /// Forwards a key press; arrow rolls are applied to the range.
    pub fn field_key_down(&mut self, endpoint: Endpoint, segment: Segment, key: Key, caret: Caret) -> KeyResponse {
        let response = self.field_mut(endpoint).key_down(segment, key, caret);
        if let KeyResponse::Changed(date) = response {
            self.apply(endpoint, date);
        }
        response
    }

    /// Forwards a blur; a value corrected by clamping is applied to the range.
    pub fn field_blur(&mut self, endpoint: Endpoint, segment: Segment, text: &str) -> Option<NaiveDateTime> {
        let changed = self.field_mut(endpoint).blur(segment, text);
        if let Some(date) = changed {
            self.apply(endpoint, date);
        }
        changed
    }

    // --- layout ---

    /// Records the viewport width; narrow viewports get the compact layout.
    pub const fn set_viewport_width(&mut self, width: u32) {
        self.small_screen = width < SMALL_SCREEN_WIDTH;
    }

    pub const fn is_small_screen(&self) -> bool {
        self.small_screen
    }

    pub const fn preset_display(&self) -> PresetDisplay {
        match (self.preset_position, self.small_screen) {
            (PresetPosition::Hidden, _) => PresetDisplay::Hidden,
            (_, true) => PresetDisplay::Dropdown,
            (PresetPosition::Left, false) => PresetDisplay::Left,
            (PresetPosition::Right, false) => PresetDisplay::Right,
        }
    }

    /// Number of months the calendar grid should show side by side.
    pub const fn calendar_months(&self) -> u8 {
        if self.small_screen { 1 } else { 2 }
    }

    // --- internals ---

    const fn current(&self) -> Snapshot {
        Snapshot {
            range:         self.range,
            range_compare: self.range_compare,
        }
    }

    const fn field_mut(&mut self, endpoint: Endpoint) -> &mut DateField {
        match endpoint {
            Endpoint::PrimaryFrom => &mut self.fields.primary_from,
            Endpoint::PrimaryTo => &mut self.fields.primary_to,
            Endpoint::CompareFrom => &mut self.fields.compare_from,
            Endpoint::CompareTo => &mut self.fields.compare_to,
        }
    }

    fn apply(&mut self, endpoint: Endpoint, date: NaiveDateTime) {
        match endpoint {
            Endpoint::PrimaryFrom => self.set_primary_from(date),
            Endpoint::PrimaryTo => self.set_primary_to(date),
            Endpoint::CompareFrom => self.set_compare_from(date),
            Endpoint::CompareTo => self.set_compare_to(date),
        }
    }

    fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.refresh_selected_preset();
        self.sync_fields();
    }

    fn set_range_compare(&mut self, range_compare: Option<DateRange>) {
        self.range_compare = range_compare;
        self.sync_fields();
    }

    fn refresh_selected_preset(&mut self) {
        self.selected_preset =
            derive_active_preset(&self.range, self.candidates.iter().copied(), self.clock.now());
    }

    /// Pushes the ranges into every field that isn't being edited.
    fn sync_fields(&mut self) {
        let now = self.clock.now();
        self.fields.primary_from.sync(self.range.from);
        self.fields.primary_to.sync(self.range.to.unwrap_or(now));
        if let Some(compare) = self.range_compare {
            self.fields.compare_from.sync(compare.from);
            self.fields.compare_to.sync(compare.to.unwrap_or(now));
        }
    }

    fn rebuild_fields(&mut self) {
        self.fields = build_fields(self.current(), self.clock.now(), self.order, self.bounds);
    }
}

fn build_fields(snapshot: Snapshot, now: NaiveDateTime, order: FieldOrder, bounds: Bounds) -> Fields {
    let field = |value: NaiveDateTime| DateField::new(value, order, bounds);
    let Snapshot { range, range_compare } = snapshot;
    Fields {
        primary_from: field(range.from),
        primary_to:   field(range.to.unwrap_or(now)),
        compare_from: field(range_compare.map_or(now, |c| c.from)),
        compare_to:   field(range_compare.and_then(|c| c.to).unwrap_or(now)),
    }
}

impl<C: fmt::Debug> fmt::Debug for DateRangePicker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangePicker")
            .field("clock", &self.clock)
            .field("range", &self.range)
            .field("range_compare", &self.range_compare)
            .field("selected_preset", &self.selected_preset)
            .field("is_open", &self.is_open)
            .field("bounds", &self.bounds)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
