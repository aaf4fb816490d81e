use serde::{Deserialize, Serialize};

use super::{CustomSymptom, Symptoms};

/// A submitted ESAS-r questionnaire. Created atomically on submit, immutable
/// thereafter, evicted 30 days after `timestamp`.
///
/// `timestamp` is the save instant and drives eviction; `date_time` is the
/// clinically relevant instant chosen by the user, which may be earlier but
/// never later than submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub timestamp: i64,
    pub date_time: String,
    pub symptoms: Symptoms,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_symptoms: Vec<CustomSymptom>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub patient: String,
    pub professional: String,
}
