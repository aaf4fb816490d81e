//! Versioned, TTL-bounded assessment storage.
//!
//! Eviction is lazy: `load` filters expired records out of its result
//! without rewriting storage, and every `save` garbage-collects them while
//! it has the collection in hand. There is no background sweep.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::Clock;
use crate::config;
use crate::models::Assessment;
use crate::storage::KeyValueStore;

#[derive(Debug, Serialize, Deserialize)]
struct StoredAssessments {
    version: String,
    assessments: Vec<Assessment>,
}

fn is_live(assessment: &Assessment, now_ms: i64) -> bool {
    now_ms - assessment.timestamp < config::ESAS_TTL_MS
}

/// The full persisted collection, expired records included. Absent key,
/// stale version tag, unparseable document, and storage faults all read as
/// empty.
fn read_all<S: KeyValueStore>(store: &S) -> Vec<Assessment> {
    let raw = match store.get(config::ESAS_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("assessment read failed: {e}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<StoredAssessments>(&raw) {
        Ok(data) if data.version == config::ESAS_DATA_VERSION => data.assessments,
        Ok(data) => {
            warn!(
                stored_version = %data.version,
                "version mismatch, discarding stored assessments"
            );
            Vec::new()
        }
        Err(e) => {
            warn!("corrupt assessment document, discarding: {e}");
            Vec::new()
        }
    }
}

fn persist<S: KeyValueStore>(store: &S, assessments: Vec<Assessment>) -> bool {
    let data = StoredAssessments {
        version: config::ESAS_DATA_VERSION.to_string(),
        assessments,
    };
    let raw = match serde_json::to_string(&data) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("assessment serialization failed: {e}");
            return false;
        }
    };
    match store.set(config::ESAS_STORAGE_KEY, &raw) {
        Ok(()) => true,
        Err(e) => {
            warn!("assessment save failed: {e}");
            false
        }
    }
}

/// Append an already-validated assessment. The whole collection is
/// TTL-filtered before persisting, so expired records are purged here.
/// Either everything lands or nothing does.
pub fn save<S: KeyValueStore, C: Clock>(store: &S, clock: &C, assessment: &Assessment) -> bool {
    let mut all = read_all(store);
    all.push(assessment.clone());
    let now = clock.now_ms();
    all.retain(|a| is_live(a, now));
    persist(store, all)
}

/// TTL-filtered read. Non-destructive: an expired record stays in storage
/// until the next `save` rewrites the collection.
pub fn load<S: KeyValueStore, C: Clock>(store: &S, clock: &C) -> Vec<Assessment> {
    let now = clock.now_ms();
    read_all(store)
        .into_iter()
        .filter(|a| is_live(a, now))
        .collect()
}

/// Remove one record by id from the full persisted collection, expired or
/// not, and persist the remainder. Other expired entries are left in place;
/// only `save` garbage-collects.
pub fn delete_one<S: KeyValueStore>(store: &S, id: &str) -> bool {
    let mut all = read_all(store);
    all.retain(|a| a.id != id);
    persist(store, all)
}

/// Drop the whole collection key.
pub fn delete_all<S: KeyValueStore>(store: &S) -> bool {
    match store.remove(config::ESAS_STORAGE_KEY) {
        Ok(()) => true,
        Err(e) => {
            warn!("assessment clear failed: {e}");
            false
        }
    }
}
