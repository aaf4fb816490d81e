//! Per-patient custom symptom persistence.
//!
//! Unlike the entity and assessment collections this one is a bare,
//! unversioned array under a per-patient key: schema drift cannot be
//! detected by tag, so elements are validated on read and malformed
//! entries are dropped instead of resetting the whole document.

use tracing::warn;

use crate::config;
use crate::models::CustomSymptom;
use crate::storage::KeyValueStore;
use crate::validation;

/// A patient's saved custom symptoms. Empty patient id, absent key,
/// unparseable document, and storage faults all read as empty; no defaults
/// are ever created.
pub fn load<S: KeyValueStore>(store: &S, patient_id: &str) -> Vec<CustomSymptom> {
    if patient_id.is_empty() {
        return Vec::new();
    }
    let key = config::custom_symptoms_key(patient_id);
    let raw = match store.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(patient_id, "custom symptom read failed: {e}");
            return Vec::new();
        }
    };
    let items: Vec<CustomSymptom> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(patient_id, "corrupt custom symptom document, treating as empty: {e}");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .filter_map(|symptom| match validation::validate_custom_symptom(&symptom) {
            Ok(valid) => Some(valid),
            Err(e) => {
                warn!(patient_id, symptom_id = %symptom.id, "dropping stored symptom: {e}");
                None
            }
        })
        .collect()
}

/// Full overwrite of the patient's list. No-op (`false`) without a patient.
pub fn save<S: KeyValueStore>(store: &S, patient_id: &str, symptoms: &[CustomSymptom]) -> bool {
    if patient_id.is_empty() {
        return false;
    }
    let raw = match serde_json::to_string(symptoms) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(patient_id, "custom symptom serialization failed: {e}");
            return false;
        }
    };
    match store.set(&config::custom_symptoms_key(patient_id), &raw) {
        Ok(()) => true,
        Err(e) => {
            warn!(patient_id, "custom symptom save failed: {e}");
            false
        }
    }
}

/// Remove one symptom from the patient's saved list and persist the rest.
pub fn remove<S: KeyValueStore>(store: &S, patient_id: &str, symptom_id: &str) -> bool {
    if patient_id.is_empty() {
        return false;
    }
    let mut symptoms = load(store, patient_id);
    symptoms.retain(|s| s.id != symptom_id);
    save(store, patient_id, &symptoms)
}
