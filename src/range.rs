use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::RANGE_SEPARATOR;
use crate::types::{shift_years, start_of_day, truncate_to_day};

/// Format used for the endpoints in [`DateRange::summary`].
const SUMMARY_FORMAT: &str = "%b %-d, %Y";

/// A selected interval of local instants.
///
/// `to` is absent while a calendar drag is half finished. The steady state
/// has `from <= to`, but the picker tolerates an inverted range between
/// edits and repairs it rather than rejecting the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to:   Option<NaiveDateTime>,
}

impl DateRange {
    pub const fn new(from: NaiveDateTime, to: Option<NaiveDateTime>) -> Self {
        Self { from, to }
    }

    /// A range covering exactly one instant.
    pub const fn single(at: NaiveDateTime) -> Self {
        Self { from: at, to: Some(at) }
    }

    /// Returns the range with `to` filled in from `from` when absent.
    pub const fn closed(self) -> Self {
        match self.to {
            Some(_) => self,
            None => Self::single(self.from),
        }
    }

    /// Returns the range with both endpoints truncated to midnight.
    pub fn truncated_to_days(self) -> Self {
        Self {
            from: truncate_to_day(self.from),
            to:   self.to.map(truncate_to_day),
        }
    }

    /// Both endpoints moved one calendar year back, at midnight.
    pub fn previous_year(self) -> Self {
        let shift = |instant: NaiveDateTime| start_of_day(shift_years(instant.date(), -1));
        Self {
            from: shift(self.from),
            to:   self.to.map(shift),
        }
    }

    /// Renders the range the way the picker's trigger button shows it,
    /// e.g. `Jan 1, 2023 - Dec 31, 2023`.
    pub fn summary(&self) -> String {
        let from = self.from.format(SUMMARY_FORMAT);
        match self.to {
            Some(to) => format!("{from}{RANGE_SEPARATOR}{}", to.format(SUMMARY_FORMAT)),
            None => from.to_string(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// The payload delivered when the user confirms a changed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeUpdate {
    pub range:         DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_compare: Option<DateRange>,
}

/// Compares two optional ranges the way the picker detects no-op updates.
///
/// Two absent ranges are equal, and one absent range never equals a present
/// one. For two present ranges the `from` instants must match exactly; a
/// missing `to` on either side matches any `to`.
pub fn ranges_equal(a: Option<&DateRange>, b: Option<&DateRange>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.from == b.from
                && match (a.to, b.to) {
                    (Some(a_to), Some(b_to)) => a_to == b_to,
                    _ => true,
                }
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{end_of, midnight, open_range, range};

    #[test]
    fn test_equal_absent_cases() {
        let r = range(midnight(2024, 6, 1), midnight(2024, 6, 10));
        assert!(ranges_equal(None, None));
        assert!(!ranges_equal(Some(&r), None));
        assert!(!ranges_equal(None, Some(&r)));
    }

    #[test]
    fn test_equal_requires_exact_instants() {
        let a = range(midnight(2024, 6, 1), midnight(2024, 6, 10));
        let b = range(midnight(2024, 6, 1), midnight(2024, 6, 10));
        let later_to = range(midnight(2024, 6, 1), end_of(2024, 6, 10));
        let later_from = range(end_of(2024, 6, 1), midnight(2024, 6, 10));

        assert!(ranges_equal(Some(&a), Some(&b)));
        assert!(!ranges_equal(Some(&a), Some(&later_to)));
        assert!(!ranges_equal(Some(&a), Some(&later_from)));
    }

    #[test]
    fn test_missing_to_is_a_wildcard() {
        let half = open_range(midnight(2024, 6, 1));
        for to in [midnight(2024, 6, 1), midnight(2024, 6, 30), end_of(2030, 1, 1)] {
            let full = range(midnight(2024, 6, 1), to);
            assert!(ranges_equal(Some(&half), Some(&full)));
            assert!(ranges_equal(Some(&full), Some(&half)));
        }

        let other_from = range(midnight(2024, 6, 2), midnight(2024, 6, 30));
        assert!(!ranges_equal(Some(&half), Some(&other_from)));
    }

    #[test]
    fn test_closed_fills_missing_to() {
        let half = open_range(midnight(2024, 6, 1));
        assert_eq!(half.closed().to, Some(midnight(2024, 6, 1)));

        let full = range(midnight(2024, 6, 1), midnight(2024, 6, 3));
        assert_eq!(full.closed(), full);
    }

    #[test]
    fn test_truncated_to_days() {
        let r = range(end_of(2024, 6, 1), end_of(2024, 6, 3)).truncated_to_days();
        assert_eq!(r, range(midnight(2024, 6, 1), midnight(2024, 6, 3)));
    }

    #[test]
    fn test_previous_year() {
        let r = range(end_of(2024, 2, 29), end_of(2024, 6, 10)).previous_year();
        assert_eq!(r, range(midnight(2023, 3, 1), midnight(2023, 6, 10)));

        let half = open_range(midnight(2024, 6, 1)).previous_year();
        assert_eq!(half, open_range(midnight(2023, 6, 1)));
    }

    #[test]
    fn test_summary() {
        let r = range(midnight(2023, 1, 1), midnight(2023, 12, 31));
        assert_eq!(r.summary(), "Jan 1, 2023 - Dec 31, 2023");
        assert_eq!(r.to_string(), "Jan 1, 2023 - Dec 31, 2023");
        assert_eq!(open_range(midnight(2024, 6, 5)).summary(), "Jun 5, 2024");
    }

    #[test]
    fn test_update_serde_shape() {
        let update = RangeUpdate {
            range:         range(midnight(2024, 6, 1), end_of(2024, 6, 10)),
            range_compare: None,
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json["range"]["from"], "2024-06-01T00:00:00");
        assert_eq!(json["range"]["to"], "2024-06-10T23:59:59.999");
        assert!(json.get("rangeCompare").is_none());

        let parsed: RangeUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, update);
    }
}
