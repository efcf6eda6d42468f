//! Constants used throughout the application.
//!
//! This module contains all constants used in the autodiary application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "autodiary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal diary that keeps every day accounted for";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the diary data directory.
pub const ENV_VAR_DIARY_DIR: &str = "AUTODIARY_DIR";
/// Environment variable for the diary table file name.
pub const ENV_VAR_DIARY_FILE: &str = "AUTODIARY_FILE";
/// Environment variable for the directory reports are written to.
pub const ENV_VAR_REPORTS_DIR: &str = "AUTODIARY_REPORTS_DIR";
/// Environment variable overriding which year counts as the partial first year.
pub const ENV_VAR_PARTIAL_YEAR: &str = "AUTODIARY_PARTIAL_YEAR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for diary data within the user's home directory.
pub const DEFAULT_DIARY_SUBDIR: &str = "Documents/diary";
/// Default file name of the diary table.
pub const DEFAULT_DIARY_FILE: &str = "diary-data.csv";

/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Diary Table Format
/// Column names of the persisted diary table, in order.
pub const TABLE_COLUMNS: [&str; 8] = [
    "date",
    "year",
    "month",
    "weekday",
    "summary",
    "happiness",
    "duration",
    "people",
];
/// Date format used in the diary table (MM/DD/YYYY).
pub const DATE_FORMAT_TABLE: &str = "%m/%d/%Y";
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Separator placed between names in the people column.
pub const PEOPLE_SEPARATOR: &str = ", ";

// Ratings
/// Lowest happiness rating, in half points.
pub const HAPPINESS_MIN_HALVES: u8 = 2;
/// Highest happiness rating, in half points.
pub const HAPPINESS_MAX_HALVES: u8 = 10;

// Statistics
/// Number of people kept in the yearly mention ranking.
pub const TOP_PEOPLE_LIMIT: usize = 10;
/// File name of the statistics report.
pub const STATISTICS_REPORT_FILE: &str = "statistics.csv";
/// File extension for search reports.
pub const SEARCH_REPORT_EXTENSION: &str = "csv";
/// Maximum number of decimal places written for means in reports.
pub const REPORT_MEAN_PRECISION: usize = 6;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "autodiary";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
