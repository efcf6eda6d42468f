//! Recording new entries, catching up on missed days first.

use crate::diary_core::{resolve_gap, Entry};
use crate::errors::{AppResult, ContinuityError};
use crate::prompt::EntrySource;
use crate::store::DiaryStore;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Outcome of an update run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    /// Dates that were recorded, oldest first
    pub recorded: Vec<NaiveDate>,
    /// Whether the user chose not to record today after catching up
    pub skipped_today: bool,
    /// Whether today had already been recorded, so nothing was asked
    pub already_up_to_date: bool,
}

/// Where the diary stands relative to a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryStatus {
    /// Date of the latest entry
    pub last_date: Option<NaiveDate>,
    /// Days between the latest entry and today that have no entry
    pub missing: Vec<NaiveDate>,
    /// Whether today already has an entry
    pub today_recorded: bool,
}

/// Builds an entry for `date` from the fields `source` supplies.
pub fn assemble(date: NaiveDate, source: &mut dyn EntrySource) -> AppResult<Entry> {
    let summary = source.summary(date)?;
    let happiness = source.happiness(date)?;
    let duration = source.duration(date)?;
    let people = source.people(date)?;

    Ok(Entry {
        date,
        summary,
        happiness,
        duration,
        people,
    })
}

/// Reports the last recorded date and the days missing before `today`.
///
/// # Errors
///
/// Returns `ContinuityError::TemporalInconsistency` if the last entry is after `today`.
pub fn diary_status(store: &DiaryStore, today: NaiveDate) -> Result<DiaryStatus, ContinuityError> {
    let last_date = store.last_date();
    let missing = match last_date {
        Some(last) => resolve_gap(last, today)?,
        None => Vec::new(),
    };
    Ok(DiaryStatus {
        last_date,
        missing,
        today_recorded: last_date == Some(today),
    })
}

/// Records every missing day up to `today`, then today itself.
///
/// # Flow
///
/// 1. An empty store only records today
/// 2. If today is already recorded, nothing happens
/// 3. Each missing day is assembled and appended, oldest first
/// 4. If any days were caught up, the source may choose to skip today
/// 5. Today is assembled and appended
///
/// Each append reloads the store, so a failure part-way leaves every earlier day
/// durably recorded and the next run resumes from there.
///
/// # Errors
///
/// Returns `ContinuityError::TemporalInconsistency` if the last entry is after `today`,
/// and propagates any prompt or persistence error.
pub fn update_diary(
    store: &mut DiaryStore,
    source: &mut dyn EntrySource,
    today: NaiveDate,
) -> AppResult<UpdateReport> {
    let mut report = UpdateReport::default();

    if let Some(last) = store.last_date() {
        let missing = resolve_gap(last, today)?;
        if last == today {
            info!("Diary is already up to date for {}", today);
            report.already_up_to_date = true;
            return Ok(report);
        }

        if !missing.is_empty() {
            info!("Catching up on {} missed days", missing.len());
            for date in missing {
                debug!("Collecting entry for missed day {}", date);
                let entry = assemble(date, source)?;
                store.append(entry)?;
                report.recorded.push(date);
            }

            if source.skip_today(today)? {
                info!("Skipping today's entry");
                report.skipped_today = true;
                return Ok(report);
            }
        }
    }

    let entry = assemble(today, source)?;
    store.append(entry)?;
    report.recorded.push(today);

    info!("Recorded {} entries", report.recorded.len());
    Ok(report)
}
