use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::{evidence, labs, orders, summary};
use crate::config::Settings;
use crate::db::RecordStore;
use crate::error::ServiceError;
use crate::models::{
    DraftAcknowledgement, EvidenceSearchRequest, EvidenceSearchResponse, LabHistory,
    MedicationOrder, PatientSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Per-test cap applied when a lab query has no `last_n`. `None` returns everything.
    pub default_last_n: Option<usize>,
    pub max_nearby_trials: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            default_last_n: None,
            max_nearby_trials: 2,
        }
    }
}

impl From<&Settings> for QueryOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            default_last_n: settings.labs.default_last_n,
            max_nearby_trials: settings.evidence.max_nearby_trials,
        }
    }
}

/// Request-independent facade over the record store.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    options: QueryOptions,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, options: QueryOptions) -> Self {
        Self { store, options }
    }

    #[instrument(skip(self))]
    pub fn get_summary(&self, patient_id: &str) -> Result<PatientSummary, ServiceError> {
        let Some(record) = self.store.patient(patient_id)? else {
            info!("patient not found");
            return Err(ServiceError::not_found(patient_id));
        };
        let history = self.store.lab_history(patient_id)?.unwrap_or_default();

        let summary = summary::build_summary(record, &history);
        info!(problems = ?summary.problems, "returning summary");
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub fn get_labs(
        &self,
        patient_id: &str,
        names: Option<&str>,
        last_n: Option<i64>,
    ) -> Result<LabHistory, ServiceError> {
        let Some(history) = self.store.lab_history(patient_id)? else {
            info!("patient not found");
            return Err(ServiceError::not_found(patient_id));
        };

        let last_n = match last_n {
            Some(n) if n < 1 => {
                return Err(ServiceError::InvalidQuery(
                    "last_n must be greater than zero".to_string(),
                ))
            }
            Some(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            None => self.options.default_last_n,
        };

        let wanted = labs::parse_names(names);
        let labs = labs::select_labs(&history, wanted.as_ref(), last_n);
        info!(count = labs.len(), "returning labs");

        Ok(LabHistory {
            patient_id: patient_id.to_string(),
            labs,
        })
    }

    #[instrument(skip(self, order), fields(patient_id = ?order.patient_id, medication = ?order.medication))]
    pub fn submit_medication_order(
        &self,
        order: MedicationOrder,
    ) -> Result<DraftAcknowledgement, ServiceError> {
        let ack = orders::acknowledge_draft(order, Utc::now().naive_utc()).map_err(|err| {
            info!(error = %err, "medication order rejected");
            err
        })?;
        info!(order_id = %ack.order_id, "draft medication order created");
        Ok(ack)
    }

    #[instrument(skip(self, request), fields(query = %request.search_text(), geo = ?request.geo))]
    pub fn search_evidence(
        &self,
        request: &EvidenceSearchRequest,
    ) -> Result<EvidenceSearchResponse, ServiceError> {
        let catalogue = self.store.evidence()?;
        let response = evidence::search(&catalogue, request, self.options.max_nearby_trials)?;
        info!(matches = response.items.len(), "evidence search complete");
        Ok(response)
    }
}
