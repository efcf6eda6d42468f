//! Row codec for the delimited diary table.
//!
//! The table has a header row followed by one row per day:
//!
//! ```text
//! date,year,month,weekday,summary,happiness,duration,people
//! 01/02/2021,2021,January,Saturday,Went to the beach,4.5,0:12:30,"Alice Smith, Bob Jones"
//! ```
//!
//! Empty cells are absent values. The year, month and weekday columns are
//! redundant with the date and must agree with it.

use crate::constants::{PEOPLE_SEPARATOR, TABLE_COLUMNS};
use crate::diary_core::{
    format_table_date, parse_month_name, parse_table_date, parse_weekday_name, weekday_name,
    Entry, Happiness, RecordingLength,
};
use crate::errors::ParseError;
use csv::StringRecord;

/// Number of columns every row must have.
pub const COLUMN_COUNT: usize = TABLE_COLUMNS.len();

/// The header row as a single comma-joined line.
pub fn header_line() -> String {
    TABLE_COLUMNS.join(",")
}

/// Whether a parsed header row names exactly the expected columns.
pub fn header_matches(header: &StringRecord) -> bool {
    header.len() == COLUMN_COUNT
        && header
            .iter()
            .zip(TABLE_COLUMNS.iter())
            .all(|(found, expected)| found.trim() == *expected)
}

/// Encodes an entry as the eight cells of a table row.
pub fn encode(entry: &Entry) -> [String; COLUMN_COUNT] {
    [
        format_table_date(entry.date),
        entry.year().to_string(),
        entry.month().name().to_string(),
        weekday_name(entry.weekday()).to_string(),
        entry.summary.clone().unwrap_or_default(),
        entry.happiness.map(|h| h.to_string()).unwrap_or_default(),
        entry.duration.map(|d| d.to_string()).unwrap_or_default(),
        entry.people.join(PEOPLE_SEPARATOR),
    ]
}

/// Checks that `entry` reads back unchanged once encoded.
///
/// Present summaries must not be blank, and every person name must pass
/// [`check_person_name`].
pub fn check_encodable(entry: &Entry) -> Result<(), ParseError> {
    if entry
        .summary
        .as_deref()
        .is_some_and(|summary| summary.trim().is_empty())
    {
        return Err(ParseError::BlankSummary(entry.date));
    }
    entry
        .people
        .iter()
        .try_for_each(|name| check_person_name(name))
}

/// Checks that a single name survives the comma-joined people column.
pub fn check_person_name(name: &str) -> Result<(), ParseError> {
    if name.is_empty() || name.trim() != name || name.contains(',') {
        return Err(ParseError::PersonName(name.to_string()));
    }
    Ok(())
}

/// Decodes one row into an entry.
///
/// The caller is responsible for checking the column count first.
pub fn decode(record: &StringRecord) -> Result<Entry, ParseError> {
    let cell = |index: usize| record.get(index).unwrap_or("");

    let date = parse_table_date(cell(0))?;

    let year_text = cell(1).trim();
    let year: i32 = year_text
        .parse()
        .map_err(|_| ParseError::Year(year_text.to_string()))?;

    let mut entry = Entry::blank(date);
    if year != entry.year() {
        return Err(ParseError::Mismatch {
            column: "year",
            date,
            expected: entry.year().to_string(),
            found: year_text.to_string(),
        });
    }

    let month = parse_month_name(cell(2).trim())?;
    if month != entry.month() {
        return Err(ParseError::Mismatch {
            column: "month",
            date,
            expected: entry.month().name().to_string(),
            found: month.name().to_string(),
        });
    }

    let weekday = parse_weekday_name(cell(3).trim())?;
    if weekday != entry.weekday() {
        return Err(ParseError::Mismatch {
            column: "weekday",
            date,
            expected: weekday_name(entry.weekday()).to_string(),
            found: weekday_name(weekday).to_string(),
        });
    }

    entry.summary = non_empty(cell(4)).map(str::to_string);
    entry.happiness = non_empty(cell(5))
        .map(str::parse::<Happiness>)
        .transpose()?;
    entry.duration = non_empty(cell(6))
        .map(str::parse::<RecordingLength>)
        .transpose()?;
    entry.people = split_people(cell(7));

    Ok(entry)
}

/// Splits a comma-joined people cell into trimmed, non-empty names.
pub fn split_people(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(cell: &str) -> Option<&str> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell)
    }
}
