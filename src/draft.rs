//! In-session assessment draft: the form model behind the questionnaire,
//! from first slider touch to a validated, persisted record.
//!
//! The draft is session-local. Custom symptom rows may additionally be
//! persisted on the selected patient's saved list; switching patients
//! replaces the session rows with that patient's list.

use thiserror::Error;
use uuid::Uuid;

use crate::assessments;
use crate::clock::Clock;
use crate::config;
use crate::custom_symptoms;
use crate::models::{Assessment, CustomSymptom, SymptomName, Symptoms};
use crate::storage::KeyValueStore;
use crate::validation::{self, ValidationError};

/// Why a submit was refused. Field-level messaging is the caller's job;
/// these name the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no patient selected")]
    MissingPatient,

    #[error("no professional selected")]
    MissingProfessional,

    #[error("missing assessment date/time")]
    MissingDateTime,

    #[error("unrecognized date/time: {0}")]
    UnparseableDateTime(String),

    #[error("assessment date/time is in the future")]
    FutureDateTime,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("could not persist the assessment")]
    SaveFailed,
}

/// The in-progress questionnaire. Fixed symptoms start at 0.
#[derive(Debug, Clone, Default)]
pub struct AssessmentDraft {
    symptoms: Symptoms,
    custom_symptoms: Vec<CustomSymptom>,
    notes: String,
}

impl AssessmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symptoms(&self) -> &Symptoms {
        &self.symptoms
    }

    pub fn custom_symptoms(&self) -> &[CustomSymptom] {
        &self.custom_symptoms
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_symptom(&mut self, name: SymptomName, value: u8) {
        self.symptoms.set(name, value);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Add a blank custom symptom row with a fresh id. Refused once the
    /// limit of three is reached.
    pub fn add_custom_symptom(&mut self) -> Option<&CustomSymptom> {
        if self.custom_symptoms.len() >= config::MAX_CUSTOM_SYMPTOMS {
            return None;
        }
        self.custom_symptoms
            .push(CustomSymptom::blank(Uuid::new_v4().to_string()));
        self.custom_symptoms.last()
    }

    /// Replace the row with the matching id (slider or label edit).
    pub fn update_custom_symptom(&mut self, id: &str, symptom: CustomSymptom) {
        for slot in &mut self.custom_symptoms {
            if slot.id == id {
                *slot = symptom;
                return;
            }
        }
    }

    pub fn remove_custom_symptom(&mut self, id: &str) {
        self.custom_symptoms.retain(|s| s.id != id);
    }

    /// Discard everything and start over.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the session rows with the patient's saved list (called on
    /// patient switch; an empty patient id clears the rows).
    pub fn load_custom_symptoms_for<S: KeyValueStore>(&mut self, store: &S, patient_id: &str) {
        self.custom_symptoms = custom_symptoms::load(store, patient_id);
    }

    /// Add a fully-formed symptom (from the creation dialog) to the draft,
    /// optionally persisting it on the patient's saved list. Refused at the
    /// limit.
    pub fn create_custom_symptom<S: KeyValueStore>(
        &mut self,
        store: &S,
        patient_id: Option<&str>,
        symptom: CustomSymptom,
    ) -> bool {
        if self.custom_symptoms.len() >= config::MAX_CUSTOM_SYMPTOMS {
            return false;
        }
        if let Some(patient_id) = patient_id {
            let mut saved = custom_symptoms::load(store, patient_id);
            saved.retain(|s| s.id != symptom.id);
            saved.push(symptom.clone());
            custom_symptoms::save(store, patient_id, &saved);
        }
        self.custom_symptoms.push(symptom);
        true
    }

    /// Remove a row from the draft and, when a patient is selected, from
    /// that patient's saved list.
    pub fn remove_custom_symptom_for<S: KeyValueStore>(
        &mut self,
        store: &S,
        patient_id: Option<&str>,
        id: &str,
    ) {
        if let Some(patient_id) = patient_id {
            custom_symptoms::remove(store, patient_id, id);
        }
        self.remove_custom_symptom(id);
    }

    /// Build, validate, and persist the assessment.
    ///
    /// `date_time` is the user-chosen observation instant
    /// (`YYYY-MM-DDTHH:MM`); it may be earlier than now but never later.
    /// Custom symptom rows whose label is still blank are dropped, not
    /// rejected. On success the draft is left untouched so the caller
    /// decides when to `reset`.
    pub fn submit<S: KeyValueStore, C: Clock>(
        &self,
        store: &S,
        clock: &C,
        patient: &str,
        professional: &str,
        date_time: &str,
    ) -> Result<Assessment, SubmitError> {
        if patient.trim().is_empty() {
            return Err(SubmitError::MissingPatient);
        }
        if professional.trim().is_empty() {
            return Err(SubmitError::MissingProfessional);
        }
        if date_time.is_empty() {
            return Err(SubmitError::MissingDateTime);
        }
        let chosen = parse_date_time(date_time)
            .ok_or_else(|| SubmitError::UnparseableDateTime(date_time.to_string()))?;
        if chosen > clock.now_local() {
            return Err(SubmitError::FutureDateTime);
        }

        let custom_symptoms: Vec<CustomSymptom> = self
            .custom_symptoms
            .iter()
            .filter(|s| !s.label.trim().is_empty())
            .cloned()
            .collect();

        let candidate = Assessment {
            id: Uuid::new_v4().to_string(),
            timestamp: clock.now_ms(),
            date_time: date_time.to_string(),
            symptoms: self.symptoms.clone(),
            custom_symptoms,
            notes: self.notes.clone(),
            patient: patient.to_string(),
            professional: professional.to_string(),
        };
        let assessment = validation::validate_assessment(&candidate)?;

        if assessments::save(store, clock, &assessment) {
            Ok(assessment)
        } else {
            Err(SubmitError::SaveFailed)
        }
    }
}

fn parse_date_time(value: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    // 2023-11-14T22:13:20 UTC
    const NOW: i64 = 1_700_000_000_000;
    const PAST: &str = "2023-11-14T15:30";

    fn filled_symptom(id: &str, label: &str) -> CustomSymptom {
        CustomSymptom {
            id: id.into(),
            label: label.into(),
            legend: None,
            value: 4,
            custom: true,
        }
    }

    #[test]
    fn fourth_custom_symptom_row_is_refused() {
        let mut draft = AssessmentDraft::new();
        assert!(draft.add_custom_symptom().is_some());
        assert!(draft.add_custom_symptom().is_some());
        assert!(draft.add_custom_symptom().is_some());
        assert!(draft.add_custom_symptom().is_none());
        assert_eq!(draft.custom_symptoms().len(), 3);
    }

    #[test]
    fn update_and_remove_rows_by_id() {
        let mut draft = AssessmentDraft::new();
        let id = draft.add_custom_symptom().unwrap().id.clone();
        draft.update_custom_symptom(&id, filled_symptom(&id, "Picazón"));
        assert_eq!(draft.custom_symptoms()[0].label, "Picazón");

        draft.remove_custom_symptom(&id);
        assert!(draft.custom_symptoms().is_empty());
    }

    #[test]
    fn submit_persists_a_valid_assessment() {
        let store = MemoryStore::new();
        let clock = FixedClock(NOW);
        let mut draft = AssessmentDraft::new();
        draft.set_symptom(SymptomName::Pain, 10);
        draft.set_notes("sin cambios");

        let saved = draft
            .submit(&store, &clock, "Juan Perez", "Dr. Cito", PAST)
            .unwrap();
        assert_eq!(saved.timestamp, NOW);
        assert_eq!(saved.symptoms.pain, 10);

        let loaded = assessments::load(&store, &clock);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].symptoms.pain, 10);
        assert_eq!(loaded[0].notes, "sin cambios");
    }

    #[test]
    fn submit_drops_blank_label_rows() {
        let store = MemoryStore::new();
        let clock = FixedClock(NOW);
        let mut draft = AssessmentDraft::new();
        draft.add_custom_symptom();
        let id = draft.add_custom_symptom().unwrap().id.clone();
        draft.update_custom_symptom(&id, filled_symptom(&id, "Mareo"));

        let saved = draft
            .submit(&store, &clock, "Juan Perez", "Dr. Cito", PAST)
            .unwrap();
        assert_eq!(saved.custom_symptoms.len(), 1);
        assert_eq!(saved.custom_symptoms[0].label, "Mareo");
    }

    #[test]
    fn submit_rejects_future_date_time() {
        let store = MemoryStore::new();
        let draft = AssessmentDraft::new();
        let err = draft
            .submit(&store, &FixedClock(NOW), "Juan Perez", "Dr. Cito", "2023-11-15T09:00")
            .unwrap_err();
        assert_eq!(err, SubmitError::FutureDateTime);
        assert!(assessments::load(&store, &FixedClock(NOW)).is_empty());
    }

    #[test]
    fn submit_rejects_missing_selections() {
        let store = MemoryStore::new();
        let draft = AssessmentDraft::new();
        let clock = FixedClock(NOW);
        assert_eq!(
            draft.submit(&store, &clock, "", "Dr. Cito", PAST).unwrap_err(),
            SubmitError::MissingPatient
        );
        assert_eq!(
            draft.submit(&store, &clock, "Juan Perez", " ", PAST).unwrap_err(),
            SubmitError::MissingProfessional
        );
        assert_eq!(
            draft.submit(&store, &clock, "Juan Perez", "Dr. Cito", "").unwrap_err(),
            SubmitError::MissingDateTime
        );
        assert!(matches!(
            draft
                .submit(&store, &clock, "Juan Perez", "Dr. Cito", "ayer")
                .unwrap_err(),
            SubmitError::UnparseableDateTime(_)
        ));
    }

    #[test]
    fn invalid_draft_leaves_storage_untouched() {
        let store = MemoryStore::new();
        let clock = FixedClock(NOW);
        let mut draft = AssessmentDraft::new();
        draft.set_notes("n".repeat(501));

        let err = draft
            .submit(&store, &clock, "Juan Perez", "Dr. Cito", PAST)
            .unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(store.raw(crate::config::ESAS_STORAGE_KEY).is_none());
    }

    #[test]
    fn submit_failure_surfaces_when_storage_is_down() {
        let store = MemoryStore::new();
        let draft = AssessmentDraft::new();
        store.set_fail(true);
        let err = draft
            .submit(&store, &FixedClock(NOW), "Juan Perez", "Dr. Cito", PAST)
            .unwrap_err();
        assert_eq!(err, SubmitError::SaveFailed);
    }

    #[test]
    fn patient_switch_replaces_session_rows() {
        let store = MemoryStore::new();
        custom_symptoms::save(&store, "p1", &[filled_symptom("s1", "Picazón")]);

        let mut draft = AssessmentDraft::new();
        draft.add_custom_symptom();
        draft.load_custom_symptoms_for(&store, "p1");
        assert_eq!(draft.custom_symptoms().len(), 1);
        assert_eq!(draft.custom_symptoms()[0].label, "Picazón");

        draft.load_custom_symptoms_for(&store, "");
        assert!(draft.custom_symptoms().is_empty());
    }

    #[test]
    fn create_custom_symptom_optionally_persists_for_patient() {
        let store = MemoryStore::new();
        let mut draft = AssessmentDraft::new();

        assert!(draft.create_custom_symptom(&store, Some("p1"), filled_symptom("s1", "Picazón")));
        assert!(draft.create_custom_symptom(&store, None, filled_symptom("s2", "Mareo")));

        assert_eq!(draft.custom_symptoms().len(), 2);
        let saved = custom_symptoms::load(&store, "p1");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, "s1");
    }

    #[test]
    fn remove_custom_symptom_for_patient_clears_both_sides() {
        let store = MemoryStore::new();
        let mut draft = AssessmentDraft::new();
        draft.create_custom_symptom(&store, Some("p1"), filled_symptom("s1", "Picazón"));

        draft.remove_custom_symptom_for(&store, Some("p1"), "s1");
        assert!(draft.custom_symptoms().is_empty());
        assert!(custom_symptoms::load(&store, "p1").is_empty());
    }

    #[test]
    fn reset_returns_to_a_blank_form() {
        let mut draft = AssessmentDraft::new();
        draft.set_symptom(SymptomName::Anxiety, 8);
        draft.set_notes("algo");
        draft.add_custom_symptom();

        draft.reset();
        assert_eq!(draft.symptoms().anxiety, 0);
        assert!(draft.notes().is_empty());
        assert!(draft.custom_symptoms().is_empty());
    }
}
