//! Search-as-filter with relevance ranking for the acronym dictionary
//! widget. The entry data itself is host-supplied.

use crate::search::fuzzy_matches;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcronymEntry {
    pub acronym: String,
    pub definition: String,
    pub category: String,
}

/// Fixed relevance weights: exact acronym match dominates, then acronym
/// prefix/substring, definition substring, and fuzzy matches last. The
/// weights are summed so an exact match also collects its fuzzy bonus.
pub fn relevance(query: &str, entry: &AcronymEntry) -> u32 {
    if query.is_empty() {
        return 0;
    }
    let query_lower = query.to_lowercase();
    let acronym = entry.acronym.to_lowercase();
    let definition = entry.definition.to_lowercase();

    let mut score = 0;
    if acronym == query_lower {
        score += 100;
    } else if acronym.starts_with(&query_lower) {
        score += 80;
    } else if acronym.contains(&query_lower) {
        score += 60;
    }
    if definition.contains(&query_lower) {
        score += 40;
    }
    if fuzzy_matches(query, &entry.acronym) {
        score += 20;
    }
    if fuzzy_matches(query, &entry.definition) {
        score += 10;
    }
    score
}

/// Filter entries by optional category and fuzzy query; rank by relevance
/// while searching, alphabetically by acronym otherwise.
pub fn filter_entries<'a>(
    entries: &'a [AcronymEntry],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a AcronymEntry> {
    let query = query.trim();
    let mut filtered: Vec<&AcronymEntry> = entries
        .iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .filter(|e| {
            query.is_empty()
                || fuzzy_matches(query, &e.acronym)
                || fuzzy_matches(query, &e.definition)
        })
        .collect();

    if query.is_empty() {
        filtered.sort_by(|a, b| a.acronym.to_lowercase().cmp(&b.acronym.to_lowercase()));
    } else {
        filtered.sort_by(|a, b| relevance(query, b).cmp(&relevance(query, a)));
    }
    filtered
}
