//! Error handling utilities for the autodiary application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use chrono::NaiveDate;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures to turn a single field of a diary row into its typed value.
///
/// Parse errors never get coerced into a default. A row that fails to parse is
/// rejected along with the whole load or import it belongs to.
///
/// # Examples
///
/// ```
/// use autodiary::errors::ParseError;
///
/// let error = ParseError::Happiness("7.5".to_string());
/// assert!(format!("{}", error).contains("7.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The date is not in MM/DD/YYYY (or, for imports, YYYY-MM-DD) form.
    #[error("Invalid date '{0}': expected MM/DD/YYYY")]
    Date(String),

    /// The happiness rating is not a half-point step between 1.0 and 5.0.
    #[error("Invalid happiness rating '{0}': expected 1.0 to 5.0 in steps of 0.5")]
    Happiness(String),

    /// The recording duration is not in H:M:S form.
    #[error("Invalid duration '{0}': expected H:M:S")]
    Duration(String),

    /// The year column is not an integer.
    #[error("Invalid year '{0}'")]
    Year(String),

    /// The month column is not an English month name.
    #[error("Invalid month name '{0}'")]
    MonthName(String),

    /// The weekday column is not an English weekday name.
    #[error("Invalid weekday name '{0}'")]
    WeekdayName(String),

    /// A derived column disagrees with the date it should be derived from.
    #[error("Column '{column}' is '{found}' but date {date} implies '{expected}'")]
    Mismatch {
        /// The derived column that disagrees
        column: &'static str,
        /// The row's date
        date: NaiveDate,
        /// The value implied by the date
        expected: String,
        /// The value actually stored
        found: String,
    },

    /// A person name the comma-joined people column cannot hold as given.
    #[error("Invalid person name '{0}': names must be non-empty, trimmed and contain no comma")]
    PersonName(String),

    /// A summary that is present but blank, which reads back as absent.
    #[error("Summary for {0} is blank: leave it absent instead")]
    BlankSummary(NaiveDate),
}

/// Represents failures of the persisted diary table itself.
///
/// # Examples
///
/// ```
/// use autodiary::errors::PersistenceError;
/// use std::path::PathBuf;
///
/// let error = PersistenceError::Missing {
///     path: PathBuf::from("/data/diary-data.csv"),
/// };
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The diary table does not exist.
    #[error("Diary table not found at {path}. Run `autodiary init` to create an empty one.")]
    Missing {
        /// Where the table was expected
        path: PathBuf,
    },

    /// The diary table exists but could not be read or written.
    #[error("Failed to access diary table {path}: {source}")]
    Unreadable {
        /// The table path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Refused to overwrite an existing table.
    #[error("A diary table already exists at {path}")]
    AlreadyExists {
        /// The existing table path
        path: PathBuf,
    },

    /// The header row does not name the expected columns.
    #[error("Diary table {path} has header '{found}', expected '{expected}'")]
    BadHeader {
        /// The table path
        path: PathBuf,
        /// The expected header
        expected: String,
        /// The header actually found
        found: String,
    },

    /// A row has the wrong number of columns.
    #[error("Row on line {line} of {path} has {found} columns, expected {expected}")]
    ColumnCount {
        /// The table path
        path: PathBuf,
        /// 1-based line number
        line: u64,
        /// The expected column count
        expected: usize,
        /// The column count found
        found: usize,
    },

    /// A row's fields could not be parsed.
    #[error("Row on line {line} of {path} is invalid: {source}")]
    InvalidRow {
        /// The table path
        path: PathBuf,
        /// 1-based line number
        line: u64,
        /// What failed to parse
        #[source]
        source: ParseError,
    },

    /// Rows are not in strictly ascending date order.
    #[error("Row on line {line} of {path} dated {date} does not follow {previous}")]
    Unordered {
        /// The table path
        path: PathBuf,
        /// 1-based line number
        line: u64,
        /// The out-of-order date
        date: NaiveDate,
        /// The date of the row before it
        previous: NaiveDate,
    },

    /// The file could not be split into delimited records, e.g. invalid UTF-8.
    #[error("Diary file {path} is malformed near line {line}: {source}")]
    Malformed {
        /// The file path
        path: PathBuf,
        /// 1-based line number, 0 when unknown
        line: u64,
        /// The underlying reader error
        #[source]
        source: csv::Error,
    },
}

/// Represents violations of the gap-free, ascending date sequence.
///
/// # Examples
///
/// ```
/// use autodiary::errors::ContinuityError;
/// use chrono::NaiveDate;
///
/// let error = ContinuityError::TemporalInconsistency {
///     last: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
///     current: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
/// };
/// assert!(format!("{}", error).contains("precedes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContinuityError {
    /// The current date is at or before the last recorded date.
    #[error("Date {current} precedes or repeats the last recorded date {last}. Check the system clock.")]
    TemporalInconsistency {
        /// The last recorded date
        last: NaiveDate,
        /// The offending date
        current: NaiveDate,
    },

    /// An append would leave missing days behind it.
    #[error("Cannot record {got} before {expected}: missing days must be filled in order")]
    Gap {
        /// The next date the store will accept
        expected: NaiveDate,
        /// The date that was offered
        got: NaiveDate,
    },
}

/// Represents all possible errors that can occur in the autodiary application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use autodiary::errors::AppError;
///
/// let error = AppError::Config("Missing diary directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing diary directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use autodiary::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors reading, validating or writing the diary table.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A value that could not be parsed outside of a table load.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The date sequence would be broken.
    #[error("Continuity error: {0}")]
    Continuity(#[from] ContinuityError),

    /// Errors while collecting input from the user.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// An administrative edit that would corrupt the table.
    #[error("Maintenance error: {0}")]
    Maintenance(String),

    /// Low-level delimited file errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors serializing statistics for JSON output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use autodiary::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Prompt("stdin closed".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
