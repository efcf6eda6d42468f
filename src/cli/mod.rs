//! Command-line interface definitions.
//!
//! Arguments are parsed with clap's derive API. Global flags control logging;
//! each diary operation is a subcommand.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A personal diary that keeps every day accounted for
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON],
        global = true
    )]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Diary operations.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an empty diary table
    Init,

    /// Record today's entry, catching up on any missed days first
    Update {
        /// Treat this date as today (YYYY-MM-DD or YYYYMMDD)
        #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },

    /// Show the last entry and any missing days
    Status {
        /// Treat this date as today (YYYY-MM-DD or YYYYMMDD)
        #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },

    /// Find entries whose summary mentions a keyword
    Search {
        /// Text to look for, ignoring case
        keyword: String,
    },

    /// Show totals and write the statistics report for every complete year
    Stats {
        /// Print totals and yearly statistics as JSON
        #[arg(long)]
        json: bool,

        /// Treat this date as today (YYYY-MM-DD or YYYYMMDD)
        #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },

    /// Show the statistics of a single year
    Year {
        /// The calendar year
        year: i32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a headerless export file and optionally write it as a new diary
    Import {
        /// The export file
        file: PathBuf,

        /// Write the imported entries to a new diary table at this path
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },

    /// Remove a piece of text from every summary
    Scrub {
        /// Exact, case-sensitive text to remove
        text: String,
    },

    /// Find and replace text inside people's names
    RenamePerson {
        /// Text to find
        find: String,
        /// Replacement text
        replace: String,
    },
}

/// Parses a date given on the command line, as YYYY-MM-DD or YYYYMMDD.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD or YYYYMMDD", value))
}
