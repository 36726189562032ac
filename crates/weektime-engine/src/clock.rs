//! Time-of-day arithmetic for the weekly access grid.
//!
//! Everything in this crate works on wall-clock times within a single day
//! (`00:00` through `23:59`) and on ISO weekdays (Monday = 1 ... Sunday = 7).
//! Dates, timezones and instants never enter the computation: a weekly
//! window is the same shape every week.
//!
//! # Types
//!
//! - [`TimeOfDay`] — validated `HH:mm`, stored as minutes since midnight
//! - [`Weekday`] — bounded weekday number `1..=7`
//! - [`Interval`] — half-open `[start, end)` written as `"HH:mm~HH:mm"`
//!
//! # Day end
//!
//! `24:00` is not a valid time of day. The last half-hour of a day is
//! `23:30~23:59`, matching the cells of the week grid (see [`crate::grid`]).

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeektimeError};

/// Number of minutes in a day. No [`TimeOfDay`] reaches this value.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Width of one grid slot in minutes.
pub const SLOT_MINUTES: u16 = 30;

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time within a day, `00:00` through `23:59`.
///
/// Ordering is chronological, which is also the lexical order of the
/// zero-padded `HH:mm` form. Serialized as that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// `23:59`, the end of the last slot of every day.
    pub const DAY_END: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);

    /// Build a time from hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidTime`] when either component is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(WeektimeError::InvalidTime(format!(
                "{hour:02}:{minute:02} is outside 00:00-23:59"
            )));
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Inverse of [`TimeOfDay::to_minutes`].
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidTime`] when `minutes` is 1440 or more.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(WeektimeError::InvalidTime(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight: `60 * H + M`, in `0..=1439`.
    pub const fn to_minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// `hour:00`, for literal times.
    ///
    /// Panics if `hour > 23`; called inside `const { .. }` that panic is a
    /// compile error.
    pub const fn at_hour(hour: u8) -> Self {
        assert!(hour <= 23, "hour must be 0-23");
        Self(hour as u16 * 60)
    }

    /// The same wall-clock time as a `chrono::NaiveTime` (seconds are zero).
    pub fn to_naive_time(self) -> chrono::NaiveTime {
        chrono::NaiveTime::default() + chrono::Duration::minutes(i64::from(self.0))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = WeektimeError;

    /// Strict `HH:mm`: two hour digits, a colon, two minute digits.
    fn from_str(s: &str) -> Result<Self> {
        let b = s.as_bytes();
        let well_formed = b.len() == 5
            && b[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| b[i].is_ascii_digit());
        if !well_formed {
            return Err(WeektimeError::InvalidTime(format!(
                "'{s}': expected zero-padded HH:mm"
            )));
        }

        let hour = (b[0] - b'0') * 10 + (b[1] - b'0');
        let minute = (b[3] - b'0') * 10 + (b[4] - b'0');
        Self::new(hour, minute)
            .map_err(|_| WeektimeError::InvalidTime(format!("'{s}': outside 00:00-23:59")))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = WeektimeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl TryFrom<chrono::NaiveTime> for TimeOfDay {
    type Error = WeektimeError;

    fn try_from(t: chrono::NaiveTime) -> Result<Self> {
        if t.second() != 0 || t.nanosecond() != 0 {
            return Err(WeektimeError::InvalidTime(format!(
                "'{t}': sub-minute precision is not supported"
            )));
        }
        // hour() and minute() are bounded by chrono
        Self::new(t.hour() as u8, t.minute() as u8)
    }
}

/// Parse an `HH:mm` string and return its minutes since midnight.
///
/// # Errors
///
/// Returns [`WeektimeError::InvalidTime`] if the string is not a valid time of day.
pub fn time_to_minutes(s: &str) -> Result<u16> {
    Ok(s.parse::<TimeOfDay>()?.to_minutes())
}

/// Format minutes since midnight as a zero-padded `HH:mm` string.
///
/// # Errors
///
/// Returns [`WeektimeError::InvalidTime`] if `minutes` is 1440 or more.
pub fn minutes_to_time(minutes: u16) -> Result<String> {
    Ok(TimeOfDay::from_minutes(minutes)?.to_string())
}

// ── Weekday ─────────────────────────────────────────────────────────────────

/// ISO weekday number: Monday = 1 ... Sunday = 7. Serialized as the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based grid row (Monday = 0).
    pub const fn row(self) -> usize {
        self as usize - 1
    }

    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidWeekday`] for anything outside `1..=7`.
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1..=7 => Ok(Self::ALL[usize::from(n) - 1]),
            _ => Err(WeektimeError::InvalidWeekday(format!(
                "{n} is outside 1 (Monday) - 7 (Sunday)"
            ))),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Weekday {
    type Error = WeektimeError;

    fn try_from(n: u8) -> Result<Self> {
        Self::from_number(n)
    }
}

impl From<Weekday> for u8 {
    fn from(d: Weekday) -> Self {
        d.number()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(d: chrono::Weekday) -> Self {
        Self::ALL[d.num_days_from_monday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(d: Weekday) -> Self {
        match d {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// A half-open time interval `[start, end)` within one day, written `"HH:mm~HH:mm"`.
///
/// Always `start < end`. Ordered by start, then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Interval {
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidInterval`] unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(WeektimeError::InvalidInterval(format!(
                "{start}~{end}: start must be before end"
            )));
        }
        Ok(Self { start, end })
    }

    pub const fn start(self) -> TimeOfDay {
        self.start
    }

    pub const fn end(self) -> TimeOfDay {
        self.end
    }

    pub const fn minutes(self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn covers(self, other: Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

impl FromStr for Interval {
    type Err = WeektimeError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once('~').ok_or_else(|| {
            WeektimeError::InvalidInterval(format!("'{s}': expected HH:mm~HH:mm"))
        })?;
        Self::new(start.parse()?, end.parse()?)
    }
}

impl TryFrom<String> for Interval {
    type Error = WeektimeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Interval> for String {
    fn from(i: Interval) -> Self {
        i.to_string()
    }
}

// ── Half-hour splitting ─────────────────────────────────────────────────────

/// Split `[start, end)` into consecutive 30-minute intervals.
///
/// Slots are left-aligned at `start`; the last one is clipped to `end` and may
/// be shorter than 30 minutes. Yields nothing when `start >= end`.
///
/// ```
/// use weektime_engine::clock::{split_half_hour, TimeOfDay};
///
/// let start: TimeOfDay = "23:00".parse().unwrap();
/// let slots: Vec<String> = split_half_hour(start, TimeOfDay::DAY_END)
///     .map(|slot| slot.to_string())
///     .collect();
/// assert_eq!(slots, ["23:00~23:30", "23:30~23:59"]);
/// ```
pub fn split_half_hour(start: TimeOfDay, end: TimeOfDay) -> HalfHourSlots {
    HalfHourSlots {
        next: start.0,
        end: end.0,
    }
}

/// Iterator returned by [`split_half_hour`].
#[derive(Debug, Clone)]
pub struct HalfHourSlots {
    next: u16,
    end: u16,
}

impl Iterator for HalfHourSlots {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if self.next >= self.end {
            return None;
        }
        let stop = (self.next + SLOT_MINUTES).min(self.end);
        let slot = Interval {
            start: TimeOfDay(self.next),
            end: TimeOfDay(stop),
        };
        self.next = stop;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.end.saturating_sub(self.next));
        let n = remaining.div_ceil(usize::from(SLOT_MINUTES));
        (n, Some(n))
    }
}

impl ExactSizeIterator for HalfHourSlots {}

impl FusedIterator for HalfHourSlots {}

// ── Tests ───────────────────────────────────────────────────────────────────
