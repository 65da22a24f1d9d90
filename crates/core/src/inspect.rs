use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::model::FlatStore;
use crate::store;

/// Draws `count` keys uniformly with replacement. Repeated draws collapse,
/// so the sample may hold fewer than `count` entries.
pub fn sample<R: Rng + ?Sized>(flat: &FlatStore, count: usize, rng: &mut R) -> FlatStore {
    let keys: Vec<&String> = flat.keys().collect();
    let mut out = FlatStore::new();
    if keys.is_empty() {
        return out;
    }
    for _ in 0..count {
        if let Some(key) = keys.choose(rng) {
            if let Some(entry) = flat.get(key.as_str()) {
                out.insert((*key).clone(), entry.clone());
            }
        }
    }
    out
}

pub fn sample_file<R: Rng + ?Sized>(path: &Path, count: usize, rng: &mut R) -> Result<FlatStore> {
    let flat: FlatStore = store::load_json(path)?;
    Ok(sample(&flat, count, rng))
}
