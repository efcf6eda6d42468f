//! Keyword search over diary summaries.

use crate::diary_core::Entry;
use crate::store::DiaryStore;
use tracing::debug;

/// Finds every entry whose summary contains `keyword`, ignoring case.
///
/// Entries come back in store order with their summaries untouched. Entries
/// without a summary never match. No matches is an empty result, not an error.
///
/// # Arguments
///
/// * `store` - The diary to search
/// * `keyword` - Text to look for
pub fn search<'a>(store: &'a DiaryStore, keyword: &str) -> Vec<&'a Entry> {
    let matches = search_entries(store.entries(), keyword);
    debug!("Search for '{}' matched {} entries", keyword, matches.len());
    matches
}

/// Same as [`search`], over any slice of entries.
pub fn search_entries<'a>(entries: &'a [Entry], keyword: &str) -> Vec<&'a Entry> {
    let needle = keyword.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry
                .summary
                .as_deref()
                .is_some_and(|summary| summary.to_lowercase().contains(&needle))
        })
        .collect()
}
