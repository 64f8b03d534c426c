use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lab test names surfaced on the patient summary.
pub const HBA1C: &str = "HbA1c";
pub const EGFR: &str = "eGFR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub mrn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub systolic: u32,
    pub diastolic: u32,
    pub heart_rate: u32,
    pub weight_kg: f64,
    pub updated_at: NaiveDateTime,
}

/// A patient as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub demographics: Demographics,
    pub problems: Vec<String>,
    pub medications: Vec<String>,
    /// Readings in the order they were taken.
    #[serde(default)]
    pub vitals: Vec<VitalSigns>,
}

impl PatientRecord {
    pub fn latest_vitals(&self) -> Option<&VitalSigns> {
        self.vitals.iter().max_by_key(|v| v.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub collected_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub demographics: Demographics,
    pub problems: Vec<String>,
    pub medications: Vec<String>,
    pub vitals: Option<VitalSigns>,
    pub last_a1c: Option<f64>,
    pub last_egfr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabHistory {
    pub patient_id: String,
    pub labs: Vec<LabResult>,
}
