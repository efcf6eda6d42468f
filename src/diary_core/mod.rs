//! Core diary types without I/O operations.
//!
//! This module contains the `Entry` record and the small value types it is built
//! from (`Happiness`, `RecordingLength`), along with the calendar naming helpers
//! used by the table format and the statistics rankings. Nothing here touches the
//! filesystem.

pub mod continuity;

use crate::constants::{
    DATE_FORMAT_ISO, DATE_FORMAT_TABLE, HAPPINESS_MAX_HALVES, HAPPINESS_MIN_HALVES,
};
use crate::errors::ParseError;
use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

pub use continuity::{next_expected_date, resolve_gap};

/// Months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Weekdays in the order the diary reports them, starting on Sunday.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns the English name of a weekday ("Monday").
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses an exact English month name as written in the diary table.
pub fn parse_month_name(name: &str) -> Result<Month, ParseError> {
    MONTHS
        .iter()
        .copied()
        .find(|month| month.name() == name)
        .ok_or_else(|| ParseError::MonthName(name.to_string()))
}

/// Parses an exact English weekday name as written in the diary table.
pub fn parse_weekday_name(name: &str) -> Result<Weekday, ParseError> {
    WEEKDAYS
        .iter()
        .copied()
        .find(|weekday| weekday_name(*weekday) == name)
        .ok_or_else(|| ParseError::WeekdayName(name.to_string()))
}

/// Parses a date in the table format, MM/DD/YYYY.
pub fn parse_table_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT_TABLE)
        .map_err(|_| ParseError::Date(value.to_string()))
}

/// Parses a date in the table format, falling back to ISO YYYY-MM-DD.
pub fn parse_flexible_date(value: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT_TABLE)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DATE_FORMAT_ISO))
        .map_err(|_| ParseError::Date(value.to_string()))
}

/// Formats a date the way the diary table stores it.
pub fn format_table_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_TABLE).to_string()
}

/// Converts a name to title case.
///
/// Every letter that follows a non-letter is uppercased and every other letter
/// is lowercased, so `"o'neil mcDonald"` becomes `"O'Neil Mcdonald"`.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut previous_is_letter = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }
    result
}

/// A happiness rating between 1.0 and 5.0 in half-point steps.
///
/// Stored as a count of half points so that equality and hashing are exact.
///
/// # Examples
///
/// ```
/// use autodiary::diary_core::Happiness;
///
/// let rating: Happiness = "3.5".parse().unwrap();
/// assert_eq!(rating.value(), 3.5);
/// assert_eq!(rating.to_string(), "3.5");
/// assert!("3.25".parse::<Happiness>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Happiness(u8);

impl Happiness {
    /// Creates a rating from a number of half points (2 to 10).
    pub fn from_halves(halves: u8) -> Option<Self> {
        (HAPPINESS_MIN_HALVES..=HAPPINESS_MAX_HALVES)
            .contains(&halves)
            .then_some(Happiness(halves))
    }

    /// Every valid rating, lowest first.
    pub fn all() -> Vec<Happiness> {
        (HAPPINESS_MIN_HALVES..=HAPPINESS_MAX_HALVES)
            .map(Happiness)
            .collect()
    }

    /// The rating as a number.
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl FromStr for Happiness {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::Happiness(s.to_string()))?;
        let halves = value * 2.0;
        if !halves.is_finite() || halves.fract() != 0.0 {
            return Err(ParseError::Happiness(s.to_string()));
        }
        if halves < f64::from(HAPPINESS_MIN_HALVES) || halves > f64::from(HAPPINESS_MAX_HALVES) {
            return Err(ParseError::Happiness(s.to_string()));
        }
        Ok(Happiness(halves as u8))
    }
}

impl fmt::Display for Happiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl Serialize for Happiness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// The length of a diary recording, with one-second granularity.
///
/// Lengths add as true durations, carrying seconds into minutes and minutes into
/// hours:
///
/// ```
/// use autodiary::diary_core::RecordingLength;
///
/// let a: RecordingLength = "1:30:00".parse().unwrap();
/// let b: RecordingLength = "0:45:00".parse().unwrap();
/// assert_eq!((a + b).to_string(), "2:15:00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordingLength(u64);

impl RecordingLength {
    /// Creates a length from a number of seconds.
    pub fn from_seconds(seconds: u64) -> Self {
        RecordingLength(seconds)
    }

    /// Creates a length from hour, minute and second components.
    ///
    /// Components may exceed their usual range; they are normalized. A total
    /// past `u64::MAX` seconds saturates.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        RecordingLength(
            hours
                .saturating_mul(3600)
                .saturating_add(minutes.saturating_mul(60))
                .saturating_add(seconds),
        )
    }

    /// Total length in seconds.
    pub fn as_seconds(self) -> u64 {
        self.0
    }

    /// Splits the length into hours, minutes and seconds.
    pub fn hms(self) -> (u64, u64, u64) {
        (self.0 / 3600, (self.0 % 3600) / 60, self.0 % 60)
    }
}

impl FromStr for RecordingLength {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Duration(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut components = [0u64; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| invalid())?;
        }
        let [hours, minutes, seconds] = components;

        hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .map(RecordingLength)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for RecordingLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.hms();
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Add for RecordingLength {
    type Output = RecordingLength;

    fn add(self, rhs: RecordingLength) -> RecordingLength {
        RecordingLength(self.0.saturating_add(rhs.0))
    }
}

impl Sum for RecordingLength {
    fn sum<I: Iterator<Item = RecordingLength>>(iter: I) -> Self {
        iter.fold(RecordingLength::default(), Add::add)
    }
}

impl<'a> Sum<&'a RecordingLength> for RecordingLength {
    fn sum<I: Iterator<Item = &'a RecordingLength>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for RecordingLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One calendar day's diary record.
///
/// Year, month and weekday are derived from `date` rather than stored, so they can
/// never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// The day this entry describes
    pub date: NaiveDate,
    /// Free-text summary, with its original case
    pub summary: Option<String>,
    /// How the day was rated
    pub happiness: Option<Happiness>,
    /// Length of the day's recording, if one was made
    pub duration: Option<RecordingLength>,
    /// Noteworthy people, in the order they were given
    pub people: Vec<String>,
}

impl Entry {
    /// Creates an entry with no data besides its date.
    pub fn blank(date: NaiveDate) -> Self {
        Entry {
            date,
            summary: None,
            happiness: None,
            duration: None,
            people: Vec::new(),
        }
    }

    /// The calendar year of the entry.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The calendar month of the entry.
    pub fn month(&self) -> Month {
        MONTHS[self.date.month0() as usize]
    }

    /// The day of the week of the entry.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}
