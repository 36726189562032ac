//! Expand weekday-grouped ranges back into per-weekday half-hour slots.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::clock::{split_half_hour, Interval, Weekday};
use crate::merge::merge_time_range;
use crate::range::{DaySelection, MergedRange};

/// Split ranges into the sorted half-hour slots of every weekday they cover.
///
/// Overlapping ranges on the same weekday contribute each slot once. Weekdays
/// with no slots are left out, and the output is ordered Monday first.
///
/// ```
/// use weektime_engine::{split_time_range, MergedRange, Weekday};
///
/// let range = MergedRange::new(
///     [Weekday::Wednesday],
///     "23:00".parse().unwrap(),
///     "23:59".parse().unwrap(),
/// )
/// .unwrap();
///
/// let days = split_time_range(&[range]);
/// let slots: Vec<String> = days[0].value.iter().map(|s| s.to_string()).collect();
/// assert_eq!(days[0].day, Weekday::Wednesday);
/// assert_eq!(slots, ["23:00~23:30", "23:30~23:59"]);
/// ```
pub fn split_time_range(ranges: &[MergedRange]) -> Vec<DaySelection> {
    let mut day_slots: BTreeMap<Weekday, BTreeSet<Interval>> = BTreeMap::new();
    for range in ranges {
        let Some(interval) = range.interval() else {
            warn!(
                start_time = %range.start_time,
                end_time = %range.end_time,
                "skipping empty range"
            );
            continue;
        };
        for &day in &range.weekdays {
            day_slots
                .entry(day)
                .or_default()
                .extend(split_half_hour(interval.start(), interval.end()));
        }
    }

    let days: Vec<DaySelection> = day_slots
        .into_iter()
        .map(|(day, slots)| DaySelection::new(day, slots.into_iter().collect()))
        .collect();

    debug!(ranges = ranges.len(), days = days.len(), "split merged ranges");
    days
}

/// Canonical form of an arbitrary range list: split, then merge again.
///
/// Overlapping or fragmented ranges collapse, and time shared by several
/// weekday sets is regrouped under the union of those sets. The result is a
/// fixed point: normalizing it again changes nothing.
pub fn normalize_time_ranges(ranges: &[MergedRange]) -> Vec<MergedRange> {
    merge_time_range(&split_time_range(ranges))
}
