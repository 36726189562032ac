//! # weektime-engine
//!
//! Deterministic normalization of weekly access windows.
//!
//! Operators paint allowed access time on a 7 x 48 grid of half-hour cells.
//! The grid is stored as a short list of weekday-grouped ranges
//! (`{weekdays, start_time, end_time}`). This crate converts between the two
//! forms without losing or inventing a single slot.
//!
//! ## Modules
//!
//! - [`clock`] — `HH:mm` times, weekdays, intervals and half-hour splitting
//! - [`range`] — the day selection and merged range value types
//! - [`merge`] — day selections → minimal weekday-grouped ranges
//! - [`split`] — weekday-grouped ranges → per-weekday half-hour slots
//! - [`grid`] — the week grid layout and selection bitmap
//! - [`template`] — named templates and the built-in set
//! - [`wire`] — JSON encoding shared by the CLI and WASM bindings
//! - [`error`] — Error types

pub mod clock;
pub mod error;
pub mod grid;
pub mod merge;
pub mod range;
pub mod split;
pub mod template;
pub mod wire;

pub use clock::{
    minutes_to_time, split_half_hour, time_to_minutes, Interval, TimeOfDay, Weekday,
};
pub use error::WeektimeError;
pub use grid::{week_cells, GridCell, GridRow, WeekGrid, SLOTS_PER_DAY};
pub use merge::merge_time_range;
pub use range::{DaySelection, MergedRange};
pub use split::{normalize_time_ranges, split_time_range};
pub use template::{builtin_template, builtin_templates, TemplateCategory, TimeTemplate};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
