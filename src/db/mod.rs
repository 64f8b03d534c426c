//! Record store for the EHR service.
//!
//! The dataset is an external collaborator: query and filter logic in
//! [`crate::query`] only ever sees it through [`RecordStore`].

use anyhow::Result;

use crate::models::{EvidenceItem, LabResult, PatientRecord};

pub mod fixtures;
pub mod seed;

pub use fixtures::{Dataset, FixtureStore};

/// Key-by-id lookups over patient and evidence data.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Look up a patient by id.
    fn patient(&self, patient_id: &str) -> Result<Option<PatientRecord>>;

    /// Full lab history of a patient, in insertion order.
    ///
    /// Returns `None` for an unknown patient and an empty vector for a known
    /// patient without labs.
    fn lab_history(&self, patient_id: &str) -> Result<Option<Vec<LabResult>>>;

    /// The evidence catalogue in its canonical order.
    fn evidence(&self) -> Result<Vec<EvidenceItem>>;
}
