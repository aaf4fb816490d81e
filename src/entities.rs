//! Versioned patient/professional storage with built-in defaults.
//!
//! Both collections share one shape and one set of operations,
//! parameterized by [`EntityKind`]. Defaults are seeded explicitly via
//! [`initialize`] at session start; `load` itself never writes, so a read
//! can never have a hidden write side effect.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config;
use crate::models::Entity;
use crate::storage::KeyValueStore;
use crate::validation;

/// Which entity collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patients,
    Professionals,
}

impl EntityKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            EntityKind::Patients => config::PATIENTS_STORAGE_KEY,
            EntityKind::Professionals => config::PROFESSIONALS_STORAGE_KEY,
        }
    }

    /// Built-in records so the UI is never empty on first use.
    pub fn defaults(&self) -> Vec<Entity> {
        match self {
            EntityKind::Patients => vec![
                Entity::new("default-patient-1", "Juan Perez", 0),
                Entity::new("default-patient-2", "Ana Gonzalez", 0),
            ],
            EntityKind::Professionals => {
                vec![Entity::new("default-professional-1", "Dr. Cito", 0)]
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EntityKind::Patients => "patients",
            EntityKind::Professionals => "professionals",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntities {
    version: String,
    items: Vec<Entity>,
}

/// The persisted collection, if present and current. Absent keys, stale
/// version tags, unparseable documents, and storage faults all read as
/// `None`.
fn read_current<S: KeyValueStore>(store: &S, kind: EntityKind) -> Option<Vec<Entity>> {
    let raw = match store.get(kind.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(kind = kind.label(), "entity read failed: {e}");
            return None;
        }
    };
    match serde_json::from_str::<StoredEntities>(&raw) {
        Ok(data) if data.version == config::ENTITIES_DATA_VERSION => Some(data.items),
        Ok(data) => {
            warn!(
                kind = kind.label(),
                stored_version = %data.version,
                "version mismatch, discarding stored collection"
            );
            None
        }
        Err(e) => {
            warn!(kind = kind.label(), "corrupt entity document, discarding: {e}");
            None
        }
    }
}

/// Seed the default set when the key is absent or carries a stale version
/// tag. Call once at session start.
pub fn initialize<S: KeyValueStore>(store: &S, kind: EntityKind) -> bool {
    match read_current(store, kind) {
        Some(_) => true,
        None => save(store, kind, &kind.defaults()),
    }
}

/// Read the collection. Falls back to the built-in defaults — without
/// persisting them — when the key is absent, stale, or unreadable.
pub fn load<S: KeyValueStore>(store: &S, kind: EntityKind) -> Vec<Entity> {
    read_current(store, kind).unwrap_or_else(|| kind.defaults())
}

/// Overwrite the whole collection under the current version tag.
pub fn save<S: KeyValueStore>(store: &S, kind: EntityKind, entities: &[Entity]) -> bool {
    let data = StoredEntities {
        version: config::ENTITIES_DATA_VERSION.to_string(),
        items: entities.to_vec(),
    };
    let raw = match serde_json::to_string(&data) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(kind = kind.label(), "entity serialization failed: {e}");
            return false;
        }
    };
    match store.set(kind.storage_key(), &raw) {
        Ok(()) => true,
        Err(e) => {
            warn!(kind = kind.label(), "entity save failed: {e}");
            false
        }
    }
}

/// Create and persist a new entity with a fresh id and creation timestamp.
/// Returns `None` when validation or the save fails; storage is untouched
/// on validation failure.
pub fn add<S: KeyValueStore, C: Clock>(
    store: &S,
    kind: EntityKind,
    clock: &C,
    name: &str,
) -> Option<Entity> {
    let candidate = Entity::new(Uuid::new_v4().to_string(), name.trim(), clock.now_ms());
    let entity = match validation::validate_entity(&candidate) {
        Ok(entity) => entity,
        Err(e) => {
            warn!(kind = kind.label(), "rejected entity: {e}");
            return None;
        }
    };
    let mut entities = load(store, kind);
    entities.push(entity.clone());
    if save(store, kind, &entities) {
        Some(entity)
    } else {
        None
    }
}

/// Remove by id and persist. Removing an id that is not present still
/// succeeds; the result reflects the save outcome.
pub fn remove<S: KeyValueStore>(store: &S, kind: EntityKind, id: &str) -> bool {
    let mut entities = load(store, kind);
    entities.retain(|e| e.id != id);
    save(store, kind, &entities)
}
