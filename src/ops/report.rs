//! Delimited report files derived from the diary.
//!
//! Two reports exist. `statistics.csv` holds two-row blocks for every complete
//! year, and `<keyword>.csv` holds the rows a search matched. Both are plain CSV
//! meant to be opened in a spreadsheet.

use crate::constants::{REPORT_MEAN_PRECISION, SEARCH_REPORT_EXTENSION, STATISTICS_REPORT_FILE};
use crate::diary_core::Entry;
use crate::errors::AppResult;
use crate::ops::statistics::{MeanRank, YearStatistics};
use crate::store::table;
use csv::{Writer, WriterBuilder};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `statistics.csv` into `dir`, replacing any previous report.
///
/// Years are written in the order given. Each year gets four blocks of two rows:
/// a label row that starts with an empty cell and a value row that starts with the
/// year. The blocks are the year's mean, its ranked months, its ranked weekdays and
/// its most mentioned people. Absent means are written as empty cells.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_statistics_report(dir: &Path, years: &[YearStatistics]) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(STATISTICS_REPORT_FILE);

    let mut writer = report_writer(File::create(&path)?);
    for stats in years {
        write_block(
            &mut writer,
            stats.year,
            [(String::new(), format_mean(stats.mean_happiness))],
        )?;
        write_block(&mut writer, stats.year, mean_cells(&stats.months))?;
        write_block(&mut writer, stats.year, mean_cells(&stats.weekdays))?;
        write_block(
            &mut writer,
            stats.year,
            stats
                .people
                .iter()
                .map(|p| (p.name.clone(), p.mentions.to_string())),
        )?;
    }
    writer.flush()?;

    info!("Wrote statistics for {} years to {:?}", years.len(), path);
    Ok(path)
}

/// Writes the entries matched by `keyword` into `dir` as `<keyword>.csv`.
///
/// Returns `None` without touching the filesystem when there are no matches.
pub fn write_search_report(
    dir: &Path,
    keyword: &str,
    matches: &[&Entry],
) -> AppResult<Option<PathBuf>> {
    if matches.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}.{}",
        sanitize_keyword(keyword),
        SEARCH_REPORT_EXTENSION
    ));

    let mut writer = report_writer(File::create(&path)?);
    writer.write_record(crate::constants::TABLE_COLUMNS)?;
    for entry in matches {
        writer.write_record(table::encode(entry))?;
    }
    writer.flush()?;

    info!("Wrote {} search results to {:?}", matches.len(), path);
    Ok(Some(path))
}

/// Makes a keyword safe to use as a file name.
///
/// Alphanumerics, `-`, `_` and spaces are kept, everything else becomes `_`. An
/// empty keyword becomes `_`.
///
/// ```
/// use autodiary::ops::report::sanitize_keyword;
///
/// assert_eq!(sanitize_keyword("beach day"), "beach day");
/// assert_eq!(sanitize_keyword("../etc"), "___etc");
/// ```
pub fn sanitize_keyword(keyword: &str) -> String {
    let sanitized: String = keyword
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Formats a mean with at most six decimals, keeping at least one.
pub fn format_mean(mean: Option<f64>) -> String {
    let Some(value) = mean else {
        return String::new();
    };
    let mut text = format!("{:.*}", REPORT_MEAN_PRECISION, value);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

fn report_writer(file: File) -> Writer<File> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file)
}

fn mean_cells(ranks: &[MeanRank]) -> Vec<(String, String)> {
    ranks
        .iter()
        .map(|r| (r.label.to_string(), format_mean(r.mean)))
        .collect()
}

fn write_block(
    writer: &mut Writer<File>,
    year: i32,
    cells: impl IntoIterator<Item = (String, String)>,
) -> AppResult<()> {
    let (labels, values): (Vec<String>, Vec<String>) = cells.into_iter().unzip();

    let mut label_row = vec![String::new()];
    label_row.extend(labels);
    let mut value_row = vec![year.to_string()];
    value_row.extend(values);

    writer.write_record(&label_row)?;
    writer.write_record(&value_row)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::statistics::aggregate_entries;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_format_mean() {
        assert_eq!(format_mean(None), "");
        assert_eq!(format_mean(Some(4.0)), "4.0");
        assert_eq!(format_mean(Some(3.5)), "3.5");
        assert_eq!(format_mean(Some(10.0 / 3.0)), "3.333333");
        assert_eq!(format_mean(Some(2.25)), "2.25");
    }

    #[test]
    fn test_sanitize_keyword() {
        assert_eq!(sanitize_keyword("beach"), "beach");
        assert_eq!(sanitize_keyword("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_keyword("café-night_1"), "café-night_1");
        assert_eq!(sanitize_keyword(""), "_");
    }

    #[test]
    fn test_search_report_skipped_without_matches() {
        let dir = tempdir().unwrap();
        let written = write_search_report(dir.path(), "beach", &[]).unwrap();

        assert!(written.is_none());
        assert!(!dir.path().join("beach.csv").exists());
    }

    #[test]
    fn test_search_report_keeps_original_case() {
        let dir = tempdir().unwrap();
        let mut entry = Entry::blank(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        entry.summary = Some("Went to the BEACH".to_string());

        let path = write_search_report(dir.path(), "beach", &[&entry])
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("beach.csv"));
        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("date,year,month,weekday,summary,happiness,duration,people")
        );
        assert_eq!(
            lines.next(),
            Some("06/01/2021,2021,June,Tuesday,Went to the BEACH,,,")
        );
    }

    #[test]
    fn test_statistics_report_layout() {
        let dir = tempdir().unwrap();
        let mut entry = Entry::blank(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        entry.happiness = Some("4.0".parse().unwrap());
        entry.people = vec!["alice smith".to_string()];
        let stats = aggregate_entries(&[&entry], 2020);

        let path = write_statistics_report(dir.path(), &[stats]).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ",");
        assert_eq!(lines[1], "2020,4.0");
        assert!(lines[2].starts_with(",March,January,February"));
        assert!(lines[3].starts_with("2020,4.0,,"));
        assert!(lines[4].starts_with(",Sunday,Monday"));
        assert_eq!(lines[6], ",Alice Smith");
        assert_eq!(lines[7], "2020,1");
    }

    #[test]
    fn test_statistics_report_is_replaced() {
        let dir = tempdir().unwrap();
        let first = aggregate_entries(&[], 2019);
        let second = aggregate_entries(&[], 2018);

        write_statistics_report(dir.path(), &[first.clone(), second]).unwrap();
        let path = write_statistics_report(dir.path(), &[first]).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 8);
        assert!(!content.contains("2018"));
    }
}
