use proptest::prelude::*;
use proptest::test_runner::Config;
use weektime_engine::grid::day_slots;
use weektime_engine::{
    merge_time_range, normalize_time_ranges, split_time_range, DaySelection, Interval,
    MergedRange, TimeOfDay, WeekGrid, Weekday, SLOTS_PER_DAY,
};

const ROW_MASK: u64 = (1 << SLOTS_PER_DAY) - 1;

/// Day selections painted from one 48-bit mask per weekday, empty days dropped.
fn selections_from_masks(masks: &[u64; 7]) -> Vec<DaySelection> {
    Weekday::ALL
        .iter()
        .zip(masks)
        .filter_map(|(&day, &mask)| {
            let value: Vec<Interval> = day_slots()
                .enumerate()
                .filter(|(col, _)| mask & (1u64 << col) != 0)
                .map(|(_, slot)| slot)
                .collect();
            (!value.is_empty()).then(|| DaySelection::new(day, value))
        })
        .collect()
}

fn arb_masks() -> impl Strategy<Value = [u64; 7]> {
    prop::array::uniform7(any::<u64>().prop_map(|m| m & ROW_MASK))
}

fn slot_boundary(slot: usize) -> TimeOfDay {
    if slot == SLOTS_PER_DAY {
        TimeOfDay::DAY_END
    } else {
        TimeOfDay::from_minutes(slot as u16 * 30).unwrap()
    }
}

/// Half-hour aligned ranges, possibly overlapping each other.
fn arb_ranges() -> impl Strategy<Value = Vec<MergedRange>> {
    let range = (
        prop::sample::subsequence((1u8..=7).collect::<Vec<_>>(), 1..=7),
        0usize..SLOTS_PER_DAY,
        1usize..=SLOTS_PER_DAY,
    )
        .prop_map(|(days, start, len)| {
            let end = (start + len).min(SLOTS_PER_DAY);
            MergedRange::new(
                days.into_iter().map(|d| Weekday::from_number(d).unwrap()),
                slot_boundary(start),
                slot_boundary(end),
            )
            .unwrap()
        });
    prop::collection::vec(range, 0..8)
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn split_undoes_merge(masks in arb_masks()) {
        let selections = selections_from_masks(&masks);
        prop_assert_eq!(split_time_range(&merge_time_range(&selections)), selections);
    }

    #[test]
    fn merge_is_a_fixed_point(masks in arb_masks()) {
        let merged = merge_time_range(&selections_from_masks(&masks));
        prop_assert_eq!(merge_time_range(&split_time_range(&merged)), merged);
    }

    #[test]
    fn merge_output_is_minimal(masks in arb_masks()) {
        let merged = merge_time_range(&selections_from_masks(&masks));
        for pair in merged.windows(2) {
            prop_assert!(
                !(pair[0].weekdays == pair[1].weekdays && pair[0].end_time == pair[1].start_time),
                "uncoalesced neighbours: {:?}",
                pair
            );
        }
    }

    #[test]
    fn merge_output_respects_range_invariants(masks in arb_masks()) {
        for range in merge_time_range(&selections_from_masks(&masks)) {
            prop_assert!(range.start_time < range.end_time);
            prop_assert!(!range.weekdays.is_empty());
            prop_assert!(range.weekdays.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn split_lists_each_weekday_once_in_order(ranges in arb_ranges()) {
        let days = split_time_range(&ranges);
        prop_assert!(days.windows(2).all(|w| w[0].day < w[1].day));
        for selection in &days {
            prop_assert!(!selection.value.is_empty());
            prop_assert!(selection.value.windows(2).all(|w| w[0].end() <= w[1].start()));
        }
    }

    #[test]
    fn normalize_is_idempotent(ranges in arb_ranges()) {
        let once = normalize_time_ranges(&ranges);
        prop_assert_eq!(normalize_time_ranges(&once), once);
    }

    #[test]
    fn normalize_preserves_coverage(ranges in arb_ranges()) {
        let normalized = normalize_time_ranges(&ranges);
        prop_assert_eq!(WeekGrid::from_ranges(&normalized), WeekGrid::from_ranges(&ranges));
    }

    #[test]
    fn grid_round_trips_through_ranges(masks in arb_masks()) {
        let grid = WeekGrid::from_selections(&selections_from_masks(&masks));
        let expected: usize = masks.iter().map(|m| m.count_ones() as usize).sum();
        prop_assert_eq!(grid.selected_count(), expected);
        prop_assert_eq!(WeekGrid::from_ranges(&grid.to_ranges()), grid);
    }
}
