use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ESASr";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage keys — each maps to one JSON-encoded document.
pub const ESAS_STORAGE_KEY: &str = "esas_v1";
pub const PATIENTS_STORAGE_KEY: &str = "esas_patients_v1";
pub const PROFESSIONALS_STORAGE_KEY: &str = "esas_professionals_v1";

/// Version tags stamped into persisted collections. A stored document whose
/// tag differs is discarded wholesale (reset, not migrated).
pub const ESAS_DATA_VERSION: &str = "1.0";
pub const ENTITIES_DATA_VERSION: &str = "1.0";

/// Assessments older than this, measured from their save instant, are
/// evicted: filtered out on every load, physically purged on the next save.
pub const ESAS_TTL_MS: i64 = 1000 * 60 * 60 * 24 * 30; // 30 days

/// Form bounds
pub const MAX_CUSTOM_SYMPTOMS: usize = 3;
pub const MAX_CUSTOM_SYMPTOM_LABEL_LENGTH: usize = 50;
pub const MAX_NOTES_LENGTH: usize = 500;
pub const MIN_ENTITY_NAME_LENGTH: usize = 2;

/// Per-patient custom symptom list key.
pub fn custom_symptoms_key(patient_id: &str) -> String {
    format!("esas:custom_symptoms:{patient_id}")
}

/// Get the application data directory
/// ~/ESASr/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

pub fn default_log_filter() -> &'static str {
    "esasr=info"
}
