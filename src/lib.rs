//! Local-first core of an ESAS-r symptom assessment tool.
//!
//! Versioned, TTL-bounded collections over a synchronous key-value store,
//! with schema validation before every write. Storage faults never escape
//! the store layer: callers see boolean/`Option` results and the fault is
//! logged at the absorption point.

pub mod assessments;
pub mod clock;
pub mod config;
pub mod custom_symptoms;
pub mod draft;
pub mod entities;
pub mod models;
pub mod observable;
pub mod severity;
pub mod storage;
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialize tracing. Call once at session start.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Open the file-backed store under the application data directory and seed
/// the entity defaults. Session entry point for an embedding UI.
pub fn open_default_store() -> Result<storage::FileStore, storage::StorageError> {
    let store = storage::FileStore::open(&config::app_data_dir())?;
    entities::initialize(&store, entities::EntityKind::Patients);
    entities::initialize(&store, entities::EntityKind::Professionals);
    tracing::info!("ESASr store ready v{}", config::APP_VERSION);
    Ok(store)
}
