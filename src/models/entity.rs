use serde::{Deserialize, Serialize};

/// A patient or professional record. Immutable after creation; deleted by id.
///
/// Ids are opaque strings: built-in defaults use fixed ids like
/// `default-patient-1`, user-created records get a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
        }
    }
}
