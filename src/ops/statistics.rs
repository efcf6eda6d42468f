//! Yearly rankings and global totals over the diary.
//!
//! Rankings use one explicit comparator everywhere: the metric descending,
//! absent metrics after all present ones, and ties broken by canonical order
//! (calendar order for months, Sunday-first for weekdays, first mention for people).

use crate::constants::TOP_PEOPLE_LIMIT;
use crate::diary_core::{title_case, weekday_name, Entry, RecordingLength, MONTHS, WEEKDAYS};
use crate::store::DiaryStore;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Mean happiness for one month or weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanRank {
    /// Month or weekday name
    pub label: &'static str,
    /// Mean happiness, absent when nothing in the group was rated
    pub mean: Option<f64>,
    /// Number of entries in the group
    pub entries: usize,
}

/// Mention count for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionRank {
    /// Title-cased name
    pub name: String,
    /// Number of times the name was listed
    pub mentions: usize,
}

/// Statistics for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStatistics {
    /// The year described
    pub year: i32,
    /// Number of entries in the year
    pub entries: usize,
    /// Mean of all ratings in the year
    pub mean_happiness: Option<f64>,
    /// All twelve months, ranked
    pub months: Vec<MeanRank>,
    /// All seven weekdays, ranked
    pub weekdays: Vec<MeanRank>,
    /// The most mentioned people, at most ten
    pub people: Vec<MentionRank>,
}

/// Counts over the whole diary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Number of entries
    pub entries: usize,
    /// Number of entries with a recording
    pub recordings: usize,
    /// Combined length of all recordings
    pub total_duration: RecordingLength,
}

/// Totals plus the statistics for every complete year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Counts over the whole diary
    pub totals: Totals,
    /// Complete years, newest first
    pub years: Vec<YearStatistics>,
}

/// Computes the statistics for `year`.
///
/// A year without entries yields absent means and an empty people ranking, never zeros.
pub fn aggregate(store: &DiaryStore, year: i32) -> YearStatistics {
    aggregate_entries(&store.query_year(year), year)
}

/// Computes the statistics for `year` over an already-filtered set of entries.
pub fn aggregate_entries(entries: &[&Entry], year: i32) -> YearStatistics {
    debug!("Aggregating {} entries for {}", entries.len(), year);

    let months = rank_means(MONTHS.iter().map(|month| {
        let group: Vec<&Entry> = entries
            .iter()
            .copied()
            .filter(|e| e.month() == *month)
            .collect();
        (month.name(), group)
    }));

    let weekdays = rank_means(WEEKDAYS.iter().map(|weekday| {
        let group: Vec<&Entry> = entries
            .iter()
            .copied()
            .filter(|e| e.weekday() == *weekday)
            .collect();
        (weekday_name(*weekday), group)
    }));

    let mut people = rank_mentions(entries.iter().copied());
    people.truncate(TOP_PEOPLE_LIMIT);

    YearStatistics {
        year,
        entries: entries.len(),
        mean_happiness: mean_happiness(entries.iter().copied()),
        months,
        weekdays,
        people,
    }
}

/// Counts entries and recordings and sums recording lengths across the diary.
pub fn totals(store: &DiaryStore) -> Totals {
    let durations: Vec<RecordingLength> =
        store.entries().iter().filter_map(|e| e.duration).collect();
    Totals {
        entries: store.len(),
        recordings: durations.len(),
        total_duration: durations.iter().sum(),
    }
}

/// The year treated as partial: the override if one is given, else the first year
/// with an entry.
pub fn partial_year(store: &DiaryStore, override_year: Option<i32>) -> Option<i32> {
    override_year.or_else(|| store.first_year())
}

/// Years strictly between `partial_year` and `current_year`, newest first.
///
/// # Examples
///
/// ```
/// use autodiary::ops::statistics::complete_years;
///
/// assert_eq!(complete_years(2021, Some(2017)), vec![2020, 2019, 2018]);
/// assert!(complete_years(2021, Some(2020)).is_empty());
/// assert!(complete_years(2021, None).is_empty());
/// ```
pub fn complete_years(current_year: i32, partial_year: Option<i32>) -> Vec<i32> {
    match partial_year.and_then(|partial| partial.checked_add(1)) {
        Some(first) if first < current_year => (first..current_year).rev().collect(),
        _ => Vec::new(),
    }
}

/// Totals plus statistics for every complete year before `current_year`.
pub fn summarize(
    store: &DiaryStore,
    current_year: i32,
    partial_year_override: Option<i32>,
) -> StatisticsSummary {
    let years = complete_years(current_year, partial_year(store, partial_year_override))
        .into_iter()
        .map(|year| aggregate(store, year))
        .collect();
    StatisticsSummary {
        totals: totals(store),
        years,
    }
}

fn mean_happiness<'a>(entries: impl Iterator<Item = &'a Entry>) -> Option<f64> {
    let ratings: Vec<f64> = entries
        .filter_map(|e| e.happiness.map(|h| h.value()))
        .collect();
    if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

fn rank_means<'a>(groups: impl Iterator<Item = (&'static str, Vec<&'a Entry>)>) -> Vec<MeanRank> {
    let mut ranked: Vec<(usize, MeanRank)> = groups
        .enumerate()
        .map(|(index, (label, group))| {
            let rank = MeanRank {
                label,
                mean: mean_happiness(group.iter().copied()),
                entries: group.len(),
            };
            (index, rank)
        })
        .collect();

    ranked.sort_by(|(ia, a), (ib, b)| compare_metric(a.mean, b.mean).then(ia.cmp(ib)));
    ranked.into_iter().map(|(_, rank)| rank).collect()
}

fn rank_mentions<'a>(entries: impl Iterator<Item = &'a Entry>) -> Vec<MentionRank> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<MentionRank> = Vec::new();

    for entry in entries {
        for raw in &entry.people {
            let name = title_case(raw.trim());
            if name.is_empty() {
                continue;
            }
            match first_seen.get(&name) {
                Some(&index) => counts[index].mentions += 1,
                None => {
                    first_seen.insert(name.clone(), counts.len());
                    counts.push(MentionRank { name, mentions: 1 });
                }
            }
        }
    }

    // Stable, so equal counts keep first-mention order.
    counts.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    counts
}

fn compare_metric(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
