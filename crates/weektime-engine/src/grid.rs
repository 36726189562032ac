//! The 7 x 48 week grid the operator paints access windows on.
//!
//! Rows are weekdays (Monday first), columns are half-hour slots. Column `i`
//! covers `[i * 30 min, (i + 1) * 30 min)`, except the last column, which ends
//! at `23:59` so that every cell stays within one day. The same convention is
//! used by [`split_half_hour`] when splitting a range that ends at `23:59`, so
//! a painted grid, its merged ranges and the split slots always agree.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::clock::{split_half_hour, HalfHourSlots, Interval, TimeOfDay, Weekday};
use crate::error::{Result, WeektimeError};
use crate::merge::merge_time_range;
use crate::range::{DaySelection, MergedRange};
use crate::split::split_time_range;

/// Half-hour columns per grid row.
pub const SLOTS_PER_DAY: usize = 48;

/// One cell of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: Weekday,
    pub row: usize,
    pub col: usize,
    pub begin: TimeOfDay,
    pub end: TimeOfDay,
    /// `begin~end`.
    pub value: Interval,
}

/// One weekday row of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub day: Weekday,
    pub row: usize,
    pub cells: Vec<GridCell>,
}

/// The slot intervals of one grid row, column 0 first.
pub fn day_slots() -> HalfHourSlots {
    split_half_hour(TimeOfDay::MIDNIGHT, TimeOfDay::DAY_END)
}

/// The interval of column `col`, or `None` past the last column.
pub fn slot_interval(col: usize) -> Option<Interval> {
    day_slots().nth(col)
}

/// The full grid layout: 7 rows of 48 cells.
pub fn week_cells() -> Vec<GridRow> {
    Weekday::ALL
        .iter()
        .map(|&day| GridRow {
            day,
            row: day.row(),
            cells: day_slots()
                .enumerate()
                .map(|(col, value)| GridCell {
                    day,
                    row: day.row(),
                    col,
                    begin: value.start(),
                    end: value.end(),
                    value,
                })
                .collect(),
        })
        .collect()
}

/// Which cells of the week grid are selected.
///
/// Each row is a bitmask; bit `i` is column `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekGrid {
    rows: [u64; 7],
}

impl WeekGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the cells covered by the given day selections.
    ///
    /// A cell is selected when one interval of its weekday fully covers it.
    pub fn from_selections(selections: &[DaySelection]) -> Self {
        let mut grid = Self::new();
        for selection in selections {
            for (col, slot) in day_slots().enumerate() {
                if selection.value.iter().any(|i| i.covers(slot)) {
                    grid.rows[selection.day.row()] |= 1u64 << col;
                }
            }
        }
        debug!(
            selections = selections.len(),
            cells = grid.selected_count(),
            "painted grid from selections"
        );
        grid
    }

    /// Select the cells covered by merged ranges.
    pub fn from_ranges(ranges: &[MergedRange]) -> Self {
        Self::from_selections(&split_time_range(ranges))
    }

    /// Selected cells as day selections, Monday first, empty days omitted.
    pub fn to_selections(&self) -> Vec<DaySelection> {
        Weekday::ALL
            .iter()
            .filter_map(|&day| {
                let bits = self.rows[day.row()];
                let value: Vec<Interval> = day_slots()
                    .enumerate()
                    .filter(|(col, _)| bits & (1u64 << col) != 0)
                    .map(|(_, slot)| slot)
                    .collect();
                (!value.is_empty()).then(|| DaySelection::new(day, value))
            })
            .collect()
    }

    /// Selected cells as merged ranges.
    pub fn to_ranges(&self) -> Vec<MergedRange> {
        merge_time_range(&self.to_selections())
    }

    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidSlot`] if `col` is not a grid column.
    pub fn set(&mut self, day: Weekday, col: usize, selected: bool) -> Result<()> {
        check_col(col)?;
        let row = &mut self.rows[day.row()];
        if selected {
            *row |= 1u64 << col;
        } else {
            *row &= !(1u64 << col);
        }
        Ok(())
    }

    /// `false` for columns outside the grid.
    pub fn is_selected(&self, day: Weekday, col: usize) -> bool {
        col < SLOTS_PER_DAY && self.rows[day.row()] & (1u64 << col) != 0
    }

    /// Set every cell of a dragged rectangle.
    ///
    /// Both ranges are inclusive and may be given in either direction, as a
    /// drag can start from any corner.
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidSlot`] if either column bound is not a
    /// grid column; the grid is left untouched.
    pub fn select_block(
        &mut self,
        days: RangeInclusive<Weekday>,
        cols: RangeInclusive<usize>,
        selected: bool,
    ) -> Result<()> {
        let (first_col, last_col) = ordered(*cols.start(), *cols.end());
        check_col(last_col)?;
        let (first_day, last_day) = ordered(*days.start(), *days.end());

        let mask = (first_col..=last_col).fold(0u64, |mask, col| mask | (1u64 << col));
        for row in first_day.row()..=last_day.row() {
            if selected {
                self.rows[row] |= mask;
            } else {
                self.rows[row] &= !mask;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows = [0; 7];
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}

fn check_col(col: usize) -> Result<()> {
    if col >= SLOTS_PER_DAY {
        return Err(WeektimeError::InvalidSlot(format!(
            "column {col} is outside 0-{}",
            SLOTS_PER_DAY - 1
        )));
    }
    Ok(())
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
