use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{FlatStore, NormalizedStore, Section};
use crate::store;

/// Merges every map-shaped document into one namespace. Later documents
/// overwrite earlier ones on key collisions; list-shaped documents are
/// dropped.
pub fn flatten(normalized: &NormalizedStore) -> FlatStore {
    let mut flat = FlatStore::new();
    for (id, section) in normalized.iter() {
        match section {
            Section::Map(entries) => {
                debug!(document = %id, entries = entries.len(), "flattening");
                for (key, entry) in entries {
                    flat.insert(key.clone(), entry.clone());
                }
            }
            Section::List(items) => {
                debug!(document = %id, items = items.len(), "skipping list section");
            }
        }
    }
    flat
}

pub fn flatten_file(src: &Path, dst: &Path) -> Result<FlatStore> {
    let normalized: NormalizedStore = store::load_json(src)?;
    for id in normalized.documents.keys() {
        info!("flattening {id}");
    }
    let flat = flatten(&normalized);
    store::save_json(dst, &flat)?;
    info!(entries = flat.len(), "wrote flat store to {}", dst.display());
    Ok(flat)
}
