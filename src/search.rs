//! Fuzzy search and ranking over table and column names.

use crate::model::{ColumnKey, ErdDocument, TableKey};
use serde::Serialize;
use std::collections::HashSet;

/// Minimum similarity score for a candidate to qualify as a match.
pub const MATCH_THRESHOLD: u32 = 80;

/// Result entries shown before the "more results" affordance.
pub const VISIBLE_RESULTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Table,
    Column,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: MatchKind,
    pub schema: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub similarity: u32,
    pub key: String,
}

impl SearchHit {
    pub fn table_key(&self) -> TableKey {
        TableKey::new(&self.schema, &self.table)
    }
}

/// 0-100 similarity between a candidate name and a query: exact match 100,
/// containment 90, otherwise Levenshtein distance as a percentage.
pub fn similarity(candidate: &str, query: &str) -> u32 {
    let s1 = candidate.trim().to_lowercase();
    let s2 = query.trim().to_lowercase();

    if s1 == s2 {
        return 100;
    }
    if s1.contains(&s2) || s2.contains(&s1) {
        return 90;
    }

    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let max_len = len1.max(len2);
    let distance = levenshtein(&s1, &s2);
    (((max_len - distance) as f64 / max_len as f64) * 100.0).round() as u32
}

/// Classic two-row edit distance over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut current = vec![0usize; a.len() + 1];

    for (i, bc) in b.iter().enumerate() {
        current[0] = i + 1;
        for (j, ac) in a.iter().enumerate() {
            let substitution = prev[j] + usize::from(ac != bc);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[a.len()]
}

/// Loose subsequence predicate: every query character appears in the
/// target in order, case-insensitively. Cheaper than the similarity
/// score; a substring match short-circuits.
pub fn fuzzy_matches(query: &str, text: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    let text = text.to_lowercase();

    if text.contains(&query) {
        return true;
    }

    let mut remaining = query.chars();
    let mut needle = remaining.next();
    for c in text.chars() {
        if Some(c) == needle {
            needle = remaining.next();
            if needle.is_none() {
                return true;
            }
        }
    }
    false
}

/// Rank the table and column names of visible schemas against a query.
/// Results are sorted descending by similarity; ties keep encounter order.
pub fn search(doc: &ErdDocument, visible_schemas: &HashSet<String>, query: &str) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for schema in &doc.schemas {
        if !visible_schemas.contains(&schema.name) {
            continue;
        }
        for table in &schema.tables {
            let table_similarity = similarity(&table.name, query);
            if table_similarity >= MATCH_THRESHOLD {
                hits.push(SearchHit {
                    kind: MatchKind::Table,
                    schema: schema.name.clone(),
                    table: table.name.clone(),
                    column: None,
                    similarity: table_similarity,
                    key: TableKey::new(&schema.name, &table.name).as_str().to_string(),
                });
            }

            for column in &table.columns {
                let column_similarity = similarity(&column.name, query);
                if column_similarity >= MATCH_THRESHOLD {
                    hits.push(SearchHit {
                        kind: MatchKind::Column,
                        schema: schema.name.clone(),
                        table: table.name.clone(),
                        column: Some(column.name.clone()),
                        similarity: column_similarity,
                        key: ColumnKey::new(&schema.name, &table.name, &column.name)
                            .as_str()
                            .to_string(),
                    });
                }
            }
        }
    }

    hits.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    hits
}
