//! Bulk import of a legacy, headerless diary export.
//!
//! The export has one row per day with the columns
//! `date, summary, happiness, duration, person, person, ...`. Rows are loaded
//! into a flat, date-sorted collection; grouping by year or month is computed on
//! demand rather than stored.

use crate::diary_core::{parse_flexible_date, Entry, Happiness, RecordingLength, MONTHS};
use crate::errors::{AppError, AppResult, ParseError, PersistenceError};
use crate::store::{self, table, DiaryStore};
use chrono::{Month, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Entries read from an import file, sorted by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedDiary {
    entries: Vec<Entry>,
}

impl ImportedDiary {
    /// Builds an import from entries in any order.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by_key(|e| e.date);
        ImportedDiary { entries }
    }

    /// All entries, oldest first. Duplicated dates stay adjacent in file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of imported rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was imported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by year.
    pub fn by_year(&self) -> BTreeMap<i32, Vec<&Entry>> {
        let mut years: BTreeMap<i32, Vec<&Entry>> = BTreeMap::new();
        for entry in &self.entries {
            years.entry(entry.year()).or_default().push(entry);
        }
        years
    }

    /// Entries of `year` grouped by month, in calendar order. Months without
    /// entries are left out.
    pub fn by_month(&self, year: i32) -> Vec<(Month, Vec<&Entry>)> {
        MONTHS
            .iter()
            .map(|month| {
                let group: Vec<&Entry> = self
                    .entries
                    .iter()
                    .filter(|e| e.year() == year && e.month() == *month)
                    .collect();
                (*month, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    /// Dates that appear on more than one row, each listed once.
    pub fn duplicates(&self) -> Vec<NaiveDate> {
        let mut duplicates: Vec<NaiveDate> = self
            .entries
            .windows(2)
            .filter(|pair| pair[0].date == pair[1].date)
            .map(|pair| pair[0].date)
            .collect();
        duplicates.dedup();
        duplicates
    }

    /// Persists the import as a new diary table at `path` and loads it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Maintenance` if any date is duplicated, and
    /// `PersistenceError::AlreadyExists` if a file is already at `path`.
    pub fn write_store(&self, path: &Path) -> AppResult<DiaryStore> {
        let duplicates = self.duplicates();
        if let Some(first) = duplicates.first() {
            return Err(AppError::Maintenance(format!(
                "Import has {} duplicated dates (first: {}); resolve them before writing",
                duplicates.len(),
                first
            )));
        }

        store::write_new_table(path, &self.entries)?;
        info!("Wrote {} imported entries to {:?}", self.entries.len(), path);
        DiaryStore::load(path)
    }
}

/// Reads a headerless export file.
///
/// Blank summary, happiness and duration cells are absent values. People are
/// read from the fifth column on, stopping at the first empty cell. A quoted
/// person cell holding a comma is rejected, since the diary table joins names
/// with commas.
///
/// # Errors
///
/// Returns `PersistenceError::Missing` if the file does not exist, and
/// `PersistenceError::InvalidRow` with the 1-based line number for the first
/// row that fails to parse, or `PersistenceError::Malformed` if the file cannot
/// be split into records. Nothing is imported when any row is bad.
pub fn import_csv(path: &Path) -> AppResult<ImportedDiary> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PersistenceError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            PersistenceError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| store::malformed(path, source))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!("Skipping empty line {}", line);
            continue;
        }

        let entry = decode_row(&record).map_err(|source| PersistenceError::InvalidRow {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        entries.push(entry);
    }

    let imported = ImportedDiary::from_entries(entries);
    let duplicates = imported.duplicates();
    if !duplicates.is_empty() {
        warn!("Import contains {} duplicated dates", duplicates.len());
    }
    info!("Imported {} entries from {:?}", imported.len(), path);
    Ok(imported)
}

fn decode_row(record: &StringRecord) -> Result<Entry, ParseError> {
    let cell = |index: usize| record.get(index).map(str::trim).unwrap_or("");

    let date = parse_flexible_date(cell(0))?;

    let summary = Some(cell(1))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let happiness = match cell(2) {
        "" => None,
        text => Some(text.parse::<Happiness>()?),
    };

    let duration = match cell(3) {
        "" => None,
        text => Some(text.parse::<RecordingLength>()?),
    };

    let people = record
        .iter()
        .skip(4)
        .map(str::trim)
        .take_while(|name| !name.is_empty())
        .map(|name| table::check_person_name(name).map(|()| name.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Entry {
        date,
        summary,
        happiness,
        duration,
        people,
    })
}
