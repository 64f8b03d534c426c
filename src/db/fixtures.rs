use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{seed, RecordStore};
use crate::models::{EvidenceItem, LabResult, PatientRecord};

/// On-disk layout of a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub patients: Vec<PatientRecord>,
    /// Lab history keyed by patient id.
    #[serde(default)]
    pub labs: HashMap<String, Vec<LabResult>>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

/// Read-only, in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    patients: HashMap<String, PatientRecord>,
    labs: HashMap<String, Vec<LabResult>>,
    evidence: Vec<EvidenceItem>,
}

impl FixtureStore {
    /// Build a store from a dataset, rejecting duplicate patients and labs
    /// filed under unknown patients.
    pub fn new(dataset: Dataset) -> Result<Self> {
        let mut patients = HashMap::with_capacity(dataset.patients.len());
        for patient in dataset.patients {
            let id = patient.patient_id.clone();
            if patients.insert(id.clone(), patient).is_some() {
                bail!("duplicate patient id in dataset: {}", id);
            }
        }

        for patient_id in dataset.labs.keys() {
            if !patients.contains_key(patient_id) {
                bail!("lab history references unknown patient: {}", patient_id);
            }
        }

        Ok(Self {
            patients,
            labs: dataset.labs,
            evidence: dataset.evidence,
        })
    }

    /// The built-in demo dataset.
    pub fn seeded() -> Result<Self> {
        Self::new(seed::dataset()?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json).context("invalid fixture dataset")?;
        Self::new(dataset)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read fixture file {}", path.display()))?;
        let store = Self::from_json(&raw)
            .with_context(|| format!("failed to load fixture file {}", path.display()))?;
        info!(
            path = %path.display(),
            patients = store.patients.len(),
            evidence = store.evidence.len(),
            "loaded fixture dataset"
        );
        Ok(store)
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }
}

impl RecordStore for FixtureStore {
    fn patient(&self, patient_id: &str) -> Result<Option<PatientRecord>> {
        Ok(self.patients.get(patient_id).cloned())
    }

    fn lab_history(&self, patient_id: &str) -> Result<Option<Vec<LabResult>>> {
        if !self.patients.contains_key(patient_id) {
            return Ok(None);
        }
        Ok(Some(self.labs.get(patient_id).cloned().unwrap_or_default()))
    }

    fn evidence(&self) -> Result<Vec<EvidenceItem>> {
        Ok(self.evidence.clone())
    }
}
