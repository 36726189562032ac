//! The two shapes exchanged with the console UI.
//!
//! - [`DaySelection`] — the intervals selected for one weekday (grid side)
//! - [`MergedRange`] — weekdays sharing one contiguous window (wire side)
//!
//! The wire shape of a merged range is exactly
//! `{"weekdays":[1,2],"start_time":"09:00","end_time":"10:00"}`.
//! Deserializing validates it: weekday numbers outside `1..=7`, malformed
//! times and empty windows are rejected, and weekdays are sorted and
//! deduplicated.

use serde::{Deserialize, Serialize};

use crate::clock::{Interval, TimeOfDay, Weekday};
use crate::error::{Result, WeektimeError};

/// The intervals selected on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySelection {
    pub day: Weekday,
    pub value: Vec<Interval>,
}

impl DaySelection {
    pub fn new(day: Weekday, value: Vec<Interval>) -> Self {
        Self { day, value }
    }
}

/// One contiguous window shared by a set of weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMergedRange")]
pub struct MergedRange {
    /// Sorted ascending, no duplicates.
    pub weekdays: Vec<Weekday>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl MergedRange {
    /// Build a range, sorting and deduplicating `weekdays`.
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidRange`] when `start_time >= end_time`
    /// or when no weekday is given.
    pub fn new(
        weekdays: impl IntoIterator<Item = Weekday>,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<Self> {
        let mut weekdays: Vec<Weekday> = weekdays.into_iter().collect();
        weekdays.sort_unstable();
        weekdays.dedup();

        if weekdays.is_empty() {
            return Err(WeektimeError::InvalidRange(format!(
                "{start_time}-{end_time} applies to no weekday"
            )));
        }
        if start_time >= end_time {
            return Err(WeektimeError::InvalidRange(format!(
                "start_time {start_time} must be before end_time {end_time}"
            )));
        }

        Ok(Self {
            weekdays,
            start_time,
            end_time,
        })
    }

    /// The window as an [`Interval`], or `None` for a hand-built empty window.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time).ok()
    }

    /// Comma-joined weekday numbers, e.g. `"1,2,3"`.
    pub fn weekday_key(&self) -> String {
        weekday_key(&self.weekdays)
    }
}

pub(crate) fn weekday_key(weekdays: &[Weekday]) -> String {
    weekdays
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Deserialize)]
struct RawMergedRange {
    weekdays: Vec<Weekday>,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
}

impl TryFrom<RawMergedRange> for MergedRange {
    type Error = WeektimeError;

    fn try_from(raw: RawMergedRange) -> Result<Self> {
        Self::new(raw.weekdays, raw.start_time, raw.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups_weekdays() {
        let range = MergedRange::new(
            [Weekday::Friday, Weekday::Monday, Weekday::Friday],
            "09:00".parse().unwrap(),
            "18:00".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(range.weekdays, [Weekday::Monday, Weekday::Friday]);
        assert_eq!(range.weekday_key(), "1,5");
    }

    #[test]
    fn test_new_rejects_empty_window() {
        let nine = "09:00".parse().unwrap();
        let err = MergedRange::new([Weekday::Monday], nine, nine)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid range"), "got: {err}");
    }

    #[test]
    fn test_interval() {
        let range = MergedRange::new(
            [Weekday::Sunday],
            "02:00".parse().unwrap(),
            "06:00".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(range.interval().unwrap().to_string(), "02:00~06:00");

        let six = "06:00".parse().unwrap();
        let degenerate = MergedRange {
            start_time: six,
            end_time: six,
            ..range
        };
        assert_eq!(degenerate.interval(), None);
    }

    #[test]
    fn test_new_rejects_no_weekdays() {
        let result = MergedRange::new(
            Vec::<Weekday>::new(),
            "09:00".parse().unwrap(),
            "10:00".parse().unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_shape() {
        let range = MergedRange::new(
            [Weekday::Monday, Weekday::Tuesday],
            "09:00".parse().unwrap(),
            "10:00".parse().unwrap(),
        )
        .unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(
            json,
            r#"{"weekdays":[1,2],"start_time":"09:00","end_time":"10:00"}"#
        );
    }

    #[test]
    fn test_deserialize_normalizes_weekdays() {
        let range: MergedRange = serde_json::from_str(
            r#"{"weekdays":[3,1,3],"start_time":"08:00","end_time":"08:30"}"#,
        )
        .unwrap();
        assert_eq!(range.weekdays, [Weekday::Monday, Weekday::Wednesday]);
    }

    #[test]
    fn test_deserialize_rejects_bad_values() {
        let bad = [
            r#"{"weekdays":[0],"start_time":"08:00","end_time":"08:30"}"#,
            r#"{"weekdays":[1],"start_time":"8:00","end_time":"08:30"}"#,
            r#"{"weekdays":[1],"start_time":"09:00","end_time":"08:30"}"#,
            r#"{"weekdays":[1],"start_time":"09:00"}"#,
        ];
        for json in bad {
            assert!(
                serde_json::from_str::<MergedRange>(json).is_err(),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn test_day_selection_wire_shape() {
        let selection: DaySelection =
            serde_json::from_str(r#"{"day":2,"value":["09:00~09:30","09:30~10:00"]}"#).unwrap();
        assert_eq!(selection.day, Weekday::Tuesday);
        assert_eq!(selection.value.len(), 2);
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"day":2,"value":["09:00~09:30","09:30~10:00"]}"#
        );
    }
}
