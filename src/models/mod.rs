pub mod assessment;
pub mod entity;
pub mod symptom;

pub use assessment::Assessment;
pub use entity::Entity;
pub use symptom::{CustomSymptom, SymptomName, Symptoms};
