use serde::{Deserialize, Serialize};

/// The ten fixed ESAS-r symptoms, in standard questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomName {
    Pain,
    Fatigue,
    Drowsiness,
    Nausea,
    Appetite,
    Dyspnea,
    Depression,
    Anxiety,
    Sleep,
    Wellbeing,
}

impl SymptomName {
    pub const ALL: [SymptomName; 10] = [
        SymptomName::Pain,
        SymptomName::Fatigue,
        SymptomName::Drowsiness,
        SymptomName::Nausea,
        SymptomName::Appetite,
        SymptomName::Dyspnea,
        SymptomName::Depression,
        SymptomName::Anxiety,
        SymptomName::Sleep,
        SymptomName::Wellbeing,
    ];

    /// Wire name, matching the stored JSON keys (the tool originally shipped
    /// in Spanish and existing documents keep those keys).
    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomName::Pain => "dolor",
            SymptomName::Fatigue => "fatiga",
            SymptomName::Drowsiness => "somnolencia",
            SymptomName::Nausea => "náusea",
            SymptomName::Appetite => "apetito",
            SymptomName::Dyspnea => "disnea",
            SymptomName::Depression => "depresión",
            SymptomName::Anxiety => "ansiedad",
            SymptomName::Sleep => "sueño",
            SymptomName::Wellbeing => "bienestar",
        }
    }
}

/// The fixed ESAS-r symptom battery: ten 0–10 severity ratings. One instance
/// per assessment, fully overwritten on each edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptoms {
    #[serde(rename = "dolor")]
    pub pain: u8,
    #[serde(rename = "fatiga")]
    pub fatigue: u8,
    #[serde(rename = "somnolencia")]
    pub drowsiness: u8,
    #[serde(rename = "náusea")]
    pub nausea: u8,
    #[serde(rename = "apetito")]
    pub appetite: u8,
    #[serde(rename = "disnea")]
    pub dyspnea: u8,
    #[serde(rename = "depresión")]
    pub depression: u8,
    #[serde(rename = "ansiedad")]
    pub anxiety: u8,
    #[serde(rename = "sueño")]
    pub sleep: u8,
    #[serde(rename = "bienestar")]
    pub wellbeing: u8,
}

impl Symptoms {
    pub fn get(&self, name: SymptomName) -> u8 {
        match name {
            SymptomName::Pain => self.pain,
            SymptomName::Fatigue => self.fatigue,
            SymptomName::Drowsiness => self.drowsiness,
            SymptomName::Nausea => self.nausea,
            SymptomName::Appetite => self.appetite,
            SymptomName::Dyspnea => self.dyspnea,
            SymptomName::Depression => self.depression,
            SymptomName::Anxiety => self.anxiety,
            SymptomName::Sleep => self.sleep,
            SymptomName::Wellbeing => self.wellbeing,
        }
    }

    pub fn set(&mut self, name: SymptomName, value: u8) {
        match name {
            SymptomName::Pain => self.pain = value,
            SymptomName::Fatigue => self.fatigue = value,
            SymptomName::Drowsiness => self.drowsiness = value,
            SymptomName::Nausea => self.nausea = value,
            SymptomName::Appetite => self.appetite = value,
            SymptomName::Dyspnea => self.dyspnea = value,
            SymptomName::Depression => self.depression = value,
            SymptomName::Anxiety => self.anxiety = value,
            SymptomName::Sleep => self.sleep = value,
            SymptomName::Wellbeing => self.wellbeing = value,
        }
    }

    /// All ratings with their wire names, in questionnaire order.
    pub fn fields(&self) -> [(&'static str, u8); 10] {
        SymptomName::ALL.map(|name| (name.as_str(), self.get(name)))
    }
}

/// A user-defined symptom, unique within a patient scope. At most three per
/// assessment; optionally persisted on the patient's saved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSymptom {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    pub value: u8,
    /// Distinguishes user-defined rows from the fixed battery in mixed
    /// listings. Older stored records omit the flag.
    #[serde(default = "default_custom_flag")]
    pub custom: bool,
}

fn default_custom_flag() -> bool {
    true
}

impl CustomSymptom {
    /// A blank row as created by the form's inline "add" control.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            legend: None,
            value: 0,
            custom: true,
        }
    }
}
