use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One game-content record. Field order follows the source markup.
pub type Entry = Map<String, Value>;

/// Merged key -> entry namespace read by the query engine.
pub type FlatStore = Map<String, Value>;

/// One source file, identified by its file name stem.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: String,
    pub path: PathBuf,
    pub content: Entry,
}

/// Output container of one document, classified once from the first element
/// of the collection that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section {
    Map(Entry),
    List(Vec<Value>),
}

impl Default for Section {
    fn default() -> Self {
        Section::Map(Entry::new())
    }
}

impl Section {
    /// Empty container shaped after `first`: structured objects give a map,
    /// anything else a list.
    pub fn classify(first: &Value) -> Self {
        if first.is_object() {
            Section::Map(Entry::new())
        } else {
            Section::List(Vec::new())
        }
    }

    /// Files `item` into the container. Objects are keyed by `name`, then
    /// `category`; objects with neither are dropped. Scalars are appended to
    /// list containers only.
    pub fn absorb(&mut self, item: &Value) {
        match (self, item) {
            (Section::Map(entries), Value::Object(fields)) => {
                if let Some(key) = entry_key(fields) {
                    entries.insert(key, item.clone());
                }
            }
            (Section::List(items), value) if !value.is_object() => items.push(value.clone()),
            _ => {}
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Section::Map(entries) => entries.contains_key(key),
            Section::List(items) => items.iter().any(|item| item.as_str() == Some(key)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Section::Map(entries) => entries.len(),
            Section::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_map(&self) -> Option<&Entry> {
        match self {
            Section::Map(entries) => Some(entries),
            Section::List(_) => None,
        }
    }
}

/// Document id -> normalized container, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedStore {
    pub documents: IndexMap<String, Section>,
}

impl NormalizedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, section: Section) {
        self.documents.insert(id.into(), section);
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.documents.iter()
    }
}

fn entry_key(fields: &Entry) -> Option<String> {
    fields
        .get("name")
        .or_else(|| fields.get("category"))
        .map(key_text)
}

// Keys usually arrive as strings; anything else is keyed by its JSON text.
fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
