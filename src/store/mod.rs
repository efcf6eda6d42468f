//! The persisted diary table and its in-memory snapshot.
//!
//! `DiaryStore` is the single source of truth for every other component. It is
//! loaded in full, only grows through `append`, and re-reads the table from disk
//! after every write so the snapshot always matches what is durable.
//!
//! # Example
//!
//! ```no_run
//! use autodiary::store::DiaryStore;
//! use autodiary::diary_core::Entry;
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! let mut store = DiaryStore::load(Path::new("/home/me/Documents/diary/diary-data.csv"))?;
//! let next = store.last_date().and_then(|d| d.succ_opt());
//! if let Some(date) = next {
//!     store.append(Entry::blank(date))?;
//! }
//! # Ok::<(), autodiary::AppError>(())
//! ```

pub mod table;

use crate::diary_core::{next_expected_date, Entry};
use crate::errors::{AppError, AppResult, ContinuityError, PersistenceError};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Owns the diary table at `path` and the entries last read from it.
#[derive(Debug)]
pub struct DiaryStore {
    path: PathBuf,
    entries: Vec<Entry>,
}

impl DiaryStore {
    /// Creates a new table containing only the header row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AlreadyExists` if a file is already present at `path`,
    /// or an I/O error if the file cannot be created.
    pub fn create(path: &Path) -> AppResult<Self> {
        write_new_table(path, &[])?;
        info!("Created empty diary table at {:?}", path);
        Ok(DiaryStore {
            path: path.to_path_buf(),
            entries: Vec::new(),
        })
    }

    /// Loads the whole table into memory.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the file is missing or unreadable, if the header
    /// or any row's column count is wrong, if any row fails to parse, or if rows are not
    /// in strictly ascending date order. A single bad row fails the whole load.
    pub fn load(path: &Path) -> AppResult<Self> {
        let entries = read_table(path)?;
        debug!("Loaded {} entries from {:?}", entries.len(), path);
        Ok(DiaryStore {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Replaces the in-memory snapshot with a fresh read of the table.
    pub fn reload(&mut self) -> AppResult<()> {
        self.entries = read_table(&self.path)?;
        Ok(())
    }

    /// Path of the backing table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, or `None` for an empty store.
    pub fn last_entry(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// The date of the most recent entry, or `None` for an empty store.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last_entry().map(|entry| entry.date)
    }

    /// The year of the earliest entry.
    pub fn first_year(&self) -> Option<i32> {
        self.entries.first().map(Entry::year)
    }

    /// Entries recorded in `year`, oldest first.
    pub fn query_year(&self, year: i32) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.year() == year).collect()
    }

    /// Checks that `date` is the one date the store can accept next.
    ///
    /// Any date is accepted by an empty store. Otherwise the date must be the day
    /// right after the last entry.
    pub fn check_append(&self, date: NaiveDate) -> Result<(), ContinuityError> {
        let Some(last) = self.last_date() else {
            return Ok(());
        };
        if date <= last {
            return Err(ContinuityError::TemporalInconsistency {
                last,
                current: date,
            });
        }
        match next_expected_date(last) {
            Some(expected) if expected != date => Err(ContinuityError::Gap {
                expected,
                got: date,
            }),
            _ => Ok(()),
        }
    }

    /// Writes `entry` after the current last row, then reloads the table.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the entry holds a blank summary or a person name
    /// the table cannot hold, since it would read back differently. Returns a
    /// `ContinuityError` if the entry would duplicate a date, go back in time, or
    /// leave a gap. Returns a `PersistenceError` or I/O error if the write or
    /// the reload fails. On a reload failure the file on disk is authoritative.
    pub fn append(&mut self, entry: Entry) -> AppResult<()> {
        table::check_encodable(&entry)?;
        self.check_append(entry.date)?;

        if !self.path.exists() {
            return Err(PersistenceError::Missing {
                path: self.path.clone(),
            }
            .into());
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.unreadable(source))?;

        if !ends_with_newline(&mut file).map_err(|source| self.unreadable(source))? {
            file.write_all(b"\n")
                .map_err(|source| self.unreadable(source))?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(table::encode(&entry))?;
        writer.flush().map_err(|source| self.unreadable(source))?;
        drop(writer);

        debug!("Appended entry for {}", entry.date);

        self.reload()?;

        if self.last_date() != Some(entry.date) {
            warn!(
                "Reloaded table ends at {:?}, expected {}",
                self.last_date(),
                entry.date
            );
        }
        Ok(())
    }

    /// Removes every occurrence of `text` from every summary.
    ///
    /// Matching is case-sensitive. A summary left blank becomes absent. Returns how
    /// many entries changed. The table is rewritten atomically only when something
    /// changed.
    pub fn remove_from_summaries(&mut self, text: &str) -> AppResult<usize> {
        if text.is_empty() {
            return Ok(0);
        }

        let mut updated = self.entries.clone();
        let mut changed = 0;
        for entry in updated.iter_mut() {
            let Some(summary) = entry.summary.as_deref() else {
                continue;
            };
            if summary.contains(text) {
                let scrubbed = summary.replace(text, "");
                entry.summary = Some(scrubbed).filter(|s| !s.trim().is_empty());
                changed += 1;
            }
        }

        if changed > 0 {
            self.rewrite(&updated)?;
        }
        info!("Removed text from {} summaries", changed);
        Ok(changed)
    }

    /// Replaces `find` with `replace` inside every name of every people list.
    ///
    /// Returns how many entries changed. List lengths never change.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Maintenance` if `replace` contains a comma, or if the
    /// replacement would leave any name empty, since either would change a list's
    /// length when the table is read back.
    pub fn rename_person(&mut self, find: &str, replace: &str) -> AppResult<usize> {
        if find.is_empty() {
            return Ok(0);
        }
        if replace.contains(',') {
            return Err(AppError::Maintenance(
                "Replacement name cannot contain a comma".to_string(),
            ));
        }

        let mut updated = self.entries.clone();
        let mut changed = 0;
        for entry in updated.iter_mut() {
            let mut entry_changed = false;
            for name in entry.people.iter_mut() {
                if name.contains(find) {
                    let renamed = name.replace(find, replace);
                    if renamed.trim().is_empty() {
                        return Err(AppError::Maintenance(format!(
                            "Renaming '{}' on {} would leave an empty name",
                            name, entry.date
                        )));
                    }
                    *name = renamed.trim().to_string();
                    entry_changed = true;
                }
            }
            if entry_changed {
                changed += 1;
            }
        }

        if changed > 0 {
            self.rewrite(&updated)?;
        }
        info!("Renamed people in {} entries", changed);
        Ok(changed)
    }

    fn rewrite(&mut self, entries: &[Entry]) -> AppResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        write_rows(temp.as_file_mut(), entries)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| self.unreadable(e.error))?;
        debug!("Rewrote diary table with {} entries", entries.len());
        self.reload()
    }

    fn unreadable(&self, source: io::Error) -> AppError {
        PersistenceError::Unreadable {
            path: self.path.clone(),
            source,
        }
        .into()
    }
}

/// Reads and validates a complete diary table.
pub fn read_table(path: &Path) -> AppResult<Vec<Entry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PersistenceError::Missing {
                path: path.to_path_buf(),
            }
            .into())
        }
        Err(source) => {
            return Err(PersistenceError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
            .into())
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let header = reader
        .headers()
        .map_err(|source| malformed(path, source))?
        .clone();
    if !table::header_matches(&header) {
        return Err(PersistenceError::BadHeader {
            path: path.to_path_buf(),
            expected: table::header_line(),
            found: header.iter().collect::<Vec<_>>().join(","),
        }
        .into());
    }

    let mut entries: Vec<Entry> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| malformed(path, source))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != table::COLUMN_COUNT {
            return Err(PersistenceError::ColumnCount {
                path: path.to_path_buf(),
                line,
                expected: table::COLUMN_COUNT,
                found: record.len(),
            }
            .into());
        }

        let entry = table::decode(&record).map_err(|source| PersistenceError::InvalidRow {
            path: path.to_path_buf(),
            line,
            source,
        })?;

        if let Some(previous) = entries.last() {
            if entry.date <= previous.date {
                return Err(PersistenceError::Unordered {
                    path: path.to_path_buf(),
                    line,
                    date: entry.date,
                    previous: previous.date,
                }
                .into());
            }
            if Some(entry.date) != previous.date.succ_opt() {
                warn!(
                    "Diary table has missing days between {} and {}",
                    previous.date, entry.date
                );
            }
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Wraps a reader failure on `path` as a `PersistenceError::Malformed`.
pub(crate) fn malformed(path: &Path, source: csv::Error) -> AppError {
    let line = source.position().map(|p| p.line()).unwrap_or_default();
    PersistenceError::Malformed {
        path: path.to_path_buf(),
        line,
        source,
    }
    .into()
}

/// Writes `entries` to a new table at `path`, refusing to overwrite.
///
/// Fails before touching the disk if any entry would not read back unchanged.
pub fn write_new_table(path: &Path, entries: &[Entry]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    for entry in entries {
        table::check_encodable(entry)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(PersistenceError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into())
        }
        Err(e) => return Err(e.into()),
    };
    write_rows(&mut file, entries)
}

fn write_rows<W: Write>(sink: W, entries: &[Entry]) -> AppResult<()> {
    for entry in entries {
        table::check_encodable(entry)?;
    }
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(crate::constants::TABLE_COLUMNS)?;
    for entry in entries {
        writer.write_record(table::encode(entry))?;
    }
    writer.flush()?;
    Ok(())
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
