//! Schema validation applied before any record enters storage.
//!
//! Violations are rejection values, never panics: stores translate them to
//! `None`/`false` for their callers, which own the user-facing messaging.
//! Validators return a normalized copy (trimmed names and labels) so the
//! persisted record is canonical.

use thiserror::Error;

use crate::config;
use crate::models::{Assessment, CustomSymptom, Entity};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} out of range: {value} (expected 0..={max})")]
    OutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },

    #[error("{field} too short: {len} chars (minimum {min})")]
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("{field} too long: {len} chars (maximum {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("too many custom symptoms: {count} (maximum {max})")]
    TooManyCustomSymptoms { count: usize, max: usize },
}

const MAX_SYMPTOM_VALUE: u8 = 10;

/// Validate a patient or professional record. Names shorter than two
/// characters after trimming are rejected.
pub fn validate_entity(candidate: &Entity) -> Result<Entity, ValidationError> {
    if candidate.id.is_empty() {
        return Err(ValidationError::MissingField("id"));
    }
    let name = candidate.name.trim();
    let len = name.chars().count();
    if len < config::MIN_ENTITY_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "name",
            len,
            min: config::MIN_ENTITY_NAME_LENGTH,
        });
    }
    Ok(Entity {
        id: candidate.id.clone(),
        name: name.to_string(),
        created_at: candidate.created_at,
    })
}

/// Validate a user-defined symptom: non-empty label up to 50 chars, optional
/// legend up to 50 chars, value in 0..=10.
pub fn validate_custom_symptom(
    candidate: &CustomSymptom,
) -> Result<CustomSymptom, ValidationError> {
    if candidate.id.is_empty() {
        return Err(ValidationError::MissingField("id"));
    }
    let label = candidate.label.trim();
    if label.is_empty() {
        return Err(ValidationError::MissingField("label"));
    }
    let label_len = label.chars().count();
    if label_len > config::MAX_CUSTOM_SYMPTOM_LABEL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "label",
            len: label_len,
            max: config::MAX_CUSTOM_SYMPTOM_LABEL_LENGTH,
        });
    }
    let legend = match &candidate.legend {
        Some(legend) => {
            let legend = legend.trim();
            let legend_len = legend.chars().count();
            if legend_len > config::MAX_CUSTOM_SYMPTOM_LABEL_LENGTH {
                return Err(ValidationError::TooLong {
                    field: "legend",
                    len: legend_len,
                    max: config::MAX_CUSTOM_SYMPTOM_LABEL_LENGTH,
                });
            }
            if legend.is_empty() {
                None
            } else {
                Some(legend.to_string())
            }
        }
        None => None,
    };
    if candidate.value > MAX_SYMPTOM_VALUE {
        return Err(ValidationError::OutOfRange {
            field: "value",
            value: candidate.value,
            max: MAX_SYMPTOM_VALUE,
        });
    }
    Ok(CustomSymptom {
        id: candidate.id.clone(),
        label: label.to_string(),
        legend,
        value: candidate.value,
        custom: candidate.custom,
    })
}

/// Validate a complete assessment before it is handed to the store.
///
/// The `date_time`-not-in-the-future rule is deliberately not checked here;
/// that is the submitting caller's responsibility (it owns the clock
/// comparison against the submission instant).
pub fn validate_assessment(candidate: &Assessment) -> Result<Assessment, ValidationError> {
    if candidate.id.is_empty() {
        return Err(ValidationError::MissingField("id"));
    }
    if candidate.patient.trim().is_empty() {
        return Err(ValidationError::MissingField("patient"));
    }
    if candidate.professional.trim().is_empty() {
        return Err(ValidationError::MissingField("professional"));
    }

    for (field, value) in candidate.symptoms.fields() {
        if value > MAX_SYMPTOM_VALUE {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                max: MAX_SYMPTOM_VALUE,
            });
        }
    }

    let count = candidate.custom_symptoms.len();
    if count > config::MAX_CUSTOM_SYMPTOMS {
        return Err(ValidationError::TooManyCustomSymptoms {
            count,
            max: config::MAX_CUSTOM_SYMPTOMS,
        });
    }
    let mut custom_symptoms = Vec::with_capacity(count);
    for symptom in &candidate.custom_symptoms {
        custom_symptoms.push(validate_custom_symptom(symptom)?);
    }

    let notes_len = candidate.notes.chars().count();
    if notes_len > config::MAX_NOTES_LENGTH {
        return Err(ValidationError::TooLong {
            field: "notes",
            len: notes_len,
            max: config::MAX_NOTES_LENGTH,
        });
    }

    Ok(Assessment {
        id: candidate.id.clone(),
        timestamp: candidate.timestamp,
        date_time: candidate.date_time.clone(),
        symptoms: candidate.symptoms.clone(),
        custom_symptoms,
        notes: candidate.notes.clone(),
        patient: candidate.patient.clone(),
        professional: candidate.professional.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symptoms;

    fn entity(name: &str) -> Entity {
        Entity::new("e1", name, 0)
    }

    fn custom(label: &str, value: u8) -> CustomSymptom {
        CustomSymptom {
            id: "s1".into(),
            label: label.into(),
            legend: None,
            value,
            custom: true,
        }
    }

    fn assessment() -> Assessment {
        Assessment {
            id: "a1".into(),
            timestamp: 1_700_000_000_000,
            date_time: "2023-11-14T15:30".into(),
            symptoms: Symptoms::default(),
            custom_symptoms: vec![],
            notes: String::new(),
            patient: "Juan Perez".into(),
            professional: "Dr. Cito".into(),
        }
    }

    #[test]
    fn entity_name_of_two_chars_is_accepted() {
        let validated = validate_entity(&entity("Jo")).unwrap();
        assert_eq!(validated.name, "Jo");
    }

    #[test]
    fn entity_name_is_trimmed_before_length_check() {
        assert!(validate_entity(&entity("  J  ")).is_err());
        let validated = validate_entity(&entity("  Jo  ")).unwrap();
        assert_eq!(validated.name, "Jo");
    }

    #[test]
    fn entity_name_of_one_char_is_rejected() {
        let err = validate_entity(&entity("J")).unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { field: "name", .. }));
    }

    #[test]
    fn custom_symptom_boundaries() {
        assert!(validate_custom_symptom(&custom("Picazón", 0)).is_ok());
        assert!(validate_custom_symptom(&custom("Picazón", 10)).is_ok());
        assert!(validate_custom_symptom(&custom("Picazón", 11)).is_err());
        assert!(validate_custom_symptom(&custom(&"x".repeat(50), 5)).is_ok());
        assert!(validate_custom_symptom(&custom(&"x".repeat(51), 5)).is_err());
        assert!(validate_custom_symptom(&custom("", 5)).is_err());
        assert!(validate_custom_symptom(&custom("   ", 5)).is_err());
    }

    #[test]
    fn custom_symptom_blank_legend_normalizes_to_none() {
        let mut candidate = custom("Picazón", 3);
        candidate.legend = Some("   ".into());
        let validated = validate_custom_symptom(&candidate).unwrap();
        assert_eq!(validated.legend, None);
    }

    #[test]
    fn assessment_with_boundary_symptom_values_is_accepted() {
        let mut candidate = assessment();
        candidate.symptoms.pain = 10;
        candidate.symptoms.wellbeing = 0;
        assert!(validate_assessment(&candidate).is_ok());
    }

    #[test]
    fn assessment_with_symptom_out_of_range_is_rejected() {
        let mut candidate = assessment();
        candidate.symptoms.pain = 11;
        let err = validate_assessment(&candidate).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "dolor",
                value: 11,
                max: 10
            }
        );
    }

    #[test]
    fn exactly_three_custom_symptoms_accepted_four_rejected() {
        let mut candidate = assessment();
        candidate.custom_symptoms = (0..3).map(|i| custom(&format!("s{i}"), 1)).collect();
        assert!(validate_assessment(&candidate).is_ok());

        candidate.custom_symptoms.push(custom("s3", 1));
        let err = validate_assessment(&candidate).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyCustomSymptoms { count: 4, max: 3 }
        ));
    }

    #[test]
    fn custom_symptom_with_empty_label_rejects_the_assessment() {
        let mut candidate = assessment();
        candidate.custom_symptoms = vec![custom("", 1)];
        assert!(validate_assessment(&candidate).is_err());
    }

    #[test]
    fn notes_boundary_at_500_chars() {
        let mut candidate = assessment();
        candidate.notes = "n".repeat(500);
        assert!(validate_assessment(&candidate).is_ok());
        candidate.notes = "n".repeat(501);
        assert!(validate_assessment(&candidate).is_err());
    }

    #[test]
    fn assessment_requires_patient_and_professional() {
        let mut candidate = assessment();
        candidate.patient = "  ".into();
        assert_eq!(
            validate_assessment(&candidate).unwrap_err(),
            ValidationError::MissingField("patient")
        );

        let mut candidate = assessment();
        candidate.professional = String::new();
        assert_eq!(
            validate_assessment(&candidate).unwrap_err(),
            ValidationError::MissingField("professional")
        );
    }
}
