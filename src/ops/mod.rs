//! High-level diary operations.
//!
//! This module provides the user-facing operations built on top of the store:
//! recording entries with catch-up, computing statistics, searching summaries,
//! writing report files, and importing legacy exports.

pub mod import;
pub mod report;
pub mod search;
pub mod statistics;
pub mod update;

// Re-export commonly used functions
pub use import::{import_csv, ImportedDiary};
pub use report::{write_search_report, write_statistics_report};
pub use search::search;
pub use statistics::{
    aggregate, complete_years, summarize, totals, MeanRank, MentionRank, StatisticsSummary,
    Totals, YearStatistics,
};
pub use update::{assemble, diary_status, update_diary, DiaryStatus, UpdateReport};
