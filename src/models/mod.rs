//! Data types exchanged with the record store and over HTTP.

pub mod evidence;
pub mod order;
pub mod patient;

pub use evidence::{
    EvidenceItem, EvidenceKind, EvidenceSearchRequest, EvidenceSearchResponse, GeoFilter,
    NearbyTrial,
};
pub use order::{DraftAcknowledgement, MedicationOrder, OrderStatus};
pub use patient::{Demographics, LabHistory, LabResult, PatientRecord, PatientSummary, VitalSigns};
