use super::labs::latest;
use crate::models::patient::{EGFR, HBA1C};
use crate::models::{LabResult, PatientRecord, PatientSummary};

/// Assemble the summary view of one patient from their own record and labs.
pub fn build_summary(record: PatientRecord, labs: &[LabResult]) -> PatientSummary {
    let vitals = record.latest_vitals().cloned();

    PatientSummary {
        patient_id: record.patient_id,
        demographics: record.demographics,
        problems: record.problems,
        medications: record.medications,
        vitals,
        last_a1c: latest(labs, HBA1C).map(|lab| lab.value),
        last_egfr: latest(labs, EGFR).map(|lab| lab.value),
    }
}
