use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::markup;
use crate::model::{Entry, NormalizedStore, RawDocument, Section};
use crate::store;

/// Top-level keys that carry schema boilerplate rather than content.
pub const SKIP_KEYS: &[&str] = &[
    "@xmlns",
    "@xmlns:xsi",
    "@xsi:schemaLocation",
    "categories",
    "modcategories",
    "version",
];

/// Normalizes one document's content into a single container.
///
/// The container is reset whenever a content section is visited whose name
/// is not already a key of the container, and again for every array child
/// of a structured section. Only the last array processed in the document
/// survives.
pub fn normalize_document(content: &Entry) -> Section {
    let mut out = Section::default();
    for (key, value) in content {
        if SKIP_KEYS.contains(&key.as_str()) {
            continue;
        }
        if !out.contains_key(key) {
            out = Section::default();
        }
        let Value::Object(children) = value else {
            continue;
        };
        for (child_key, child) in children {
            let Value::Array(items) = child else {
                continue;
            };
            let Some(first) = items.first() else {
                continue;
            };
            if child_key.is_empty() {
                continue;
            }
            out = Section::classify(first);
            for item in items {
                out.absorb(item);
            }
        }
    }
    out
}

pub fn normalize(documents: &[RawDocument]) -> NormalizedStore {
    let mut normalized = NormalizedStore::new();
    for doc in documents {
        let section = normalize_document(&doc.content);
        debug!(
            document = %doc.id,
            path = %doc.path.display(),
            entries = section.len(),
            "normalized document"
        );
        normalized.insert(doc.id.clone(), section);
    }
    normalized
}

/// Reads every markup file in `data_dir`, normalizes and persists to `dst`.
pub fn process(data_dir: &Path, dst: &Path) -> Result<NormalizedStore> {
    let files = markup::discover(data_dir)?;
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        info!("processing file {}", path.display());
        documents.push(markup::read_document(path)?);
    }
    let normalized = normalize(&documents);
    store::save_json(dst, &normalized)?;
    info!(
        documents = normalized.len(),
        "wrote normalized store to {}",
        dst.display()
    );
    Ok(normalized)
}
