//! Collapse per-weekday grid selections into weekday-grouped ranges.
//!
//! Every distinct interval is tagged with the set of weekdays that select it.
//! Intervals sharing exactly the same weekday set and touching end-to-start
//! are then fused into one range. Nothing is merged across different weekday
//! sets and no gaps are filled.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::clock::{Interval, Weekday};
use crate::range::{weekday_key, DaySelection, MergedRange};

/// Merge per-weekday selections into the minimal list of weekday-grouped ranges.
///
/// Output is ordered by the comma-joined weekday list (compared as a string,
/// so `"1,2"` sorts before `"1,2,3"` before `"2"`), then by start time.
///
/// ```
/// use weektime_engine::{merge_time_range, DaySelection, Interval, Weekday};
///
/// let slots: Vec<Interval> = vec!["09:00~09:30".parse().unwrap(), "09:30~10:00".parse().unwrap()];
/// let merged = merge_time_range(&[
///     DaySelection::new(Weekday::Monday, slots.clone()),
///     DaySelection::new(Weekday::Tuesday, slots),
/// ]);
///
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].weekdays, [Weekday::Monday, Weekday::Tuesday]);
/// assert_eq!(merged[0].start_time.to_string(), "09:00");
/// assert_eq!(merged[0].end_time.to_string(), "10:00");
/// ```
pub fn merge_time_range(selections: &[DaySelection]) -> Vec<MergedRange> {
    let mut interval_days: BTreeMap<Interval, BTreeSet<Weekday>> = BTreeMap::new();
    for selection in selections {
        for &interval in &selection.value {
            interval_days
                .entry(interval)
                .or_default()
                .insert(selection.day);
        }
    }

    let mut candidates: Vec<(String, MergedRange)> = interval_days
        .into_iter()
        .map(|(interval, days)| {
            let weekdays: Vec<Weekday> = days.into_iter().collect();
            let key = weekday_key(&weekdays);
            let candidate = MergedRange {
                weekdays,
                start_time: interval.start(),
                end_time: interval.end(),
            };
            (key, candidate)
        })
        .collect();

    // Stable sort: equal (key, start) pairs keep the map's end-time order.
    candidates.sort_by(|(a_key, a), (b_key, b)| {
        a_key
            .cmp(b_key)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });

    let mut merged: Vec<MergedRange> = Vec::with_capacity(candidates.len());
    for (_, candidate) in candidates {
        match merged.last_mut() {
            Some(prev)
                if prev.weekdays == candidate.weekdays
                    && prev.end_time == candidate.start_time =>
            {
                prev.end_time = candidate.end_time;
            }
            _ => merged.push(candidate),
        }
    }

    debug!(
        selections = selections.len(),
        ranges = merged.len(),
        "merged day selections"
    );
    merged
}
