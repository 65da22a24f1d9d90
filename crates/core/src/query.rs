//! Fuzzy lookup over the flat store.
//!
//! Scores are token-sort ratios: both strings are lower-cased, stripped of
//! punctuation, split into tokens, sorted and re-joined before a normalized
//! Levenshtein similarity is scaled to 0..=100.

use serde_json::Value;
use strsim::normalized_levenshtein;
use tracing::warn;

use crate::books::resolve_book;
use crate::model::FlatStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub key: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub name: String,
    pub book: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub rank: usize,
    pub key: String,
    pub score: u8,
    pub provenance: Option<Provenance>,
    pub entry: Value,
}

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = token_sort(a);
    let b = token_sort(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (normalized_levenshtein(&a, &b) * 100.0).round() as u8
}

/// Best `max_results` keys for `text`, highest score first. Equal scores keep
/// the order of `keys`. A query with nothing left after cleanup scores every
/// key 0, so the first `max_results` keys come back.
pub fn rank(text: &str, keys: &[String], max_results: usize) -> Vec<Match> {
    if token_sort(text).is_empty() {
        warn!(query = text, "query is empty after cleanup, every key scores 0");
    }
    let mut scored: Vec<Match> = keys
        .iter()
        .map(|key| Match {
            key: key.clone(),
            score: token_sort_ratio(text, key),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(max_results);
    scored
}

/// Name, book title and page of an entry carrying both `source` and `page`.
pub fn provenance(key: &str, entry: &Value) -> Option<Provenance> {
    let source = entry.get("source")?;
    let page = entry.get("page")?;
    Some(Provenance {
        name: key.to_string(),
        book: resolve_book(&scalar_text(source)).to_string(),
        page: scalar_text(page),
    })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn token_sort(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Query front end over a loaded flat store.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    keys: Vec<String>,
    store: FlatStore,
    max_results: usize,
}

impl QueryEngine {
    pub fn new(store: FlatStore, max_results: usize) -> Self {
        let keys = store.keys().cloned().collect();
        Self {
            keys,
            store,
            max_results,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn search(&self, text: &str) -> Vec<Match> {
        rank(text, &self.keys, self.max_results)
    }

    pub fn lookup(&self, text: &str) -> Vec<Hit> {
        self.search(text)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, found)| {
                let entry = self.store.get(&found.key)?.clone();
                Some(Hit {
                    rank: idx + 1,
                    provenance: provenance(&found.key, &entry),
                    key: found.key,
                    score: found.score,
                    entry,
                })
            })
            .collect()
    }
}
