use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::extract::TypedJson;
use crate::error::ServiceError;
use crate::models::{EvidenceSearchRequest, MedicationOrder};
use crate::query::RecordService;

#[derive(Debug, Deserialize)]
pub struct LabQuery {
    /// Comma-separated test names.
    pub names: Option<String>,
    /// Parsed by the handler so a bad value is reported against `last_n`.
    pub last_n: Option<String>,
}

fn parse_last_n(raw: Option<&str>) -> Result<Option<i64>, ServiceError> {
    raw.map(|raw| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ServiceError::invalid_field("last_n", "must be an integer"))
    })
    .transpose()
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn patient_summary(
    service: web::Data<RecordService>,
    patient_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let summary = service.get_summary(&patient_id)?;
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn patient_labs(
    service: web::Data<RecordService>,
    patient_id: web::Path<String>,
    query: web::Query<LabQuery>,
) -> Result<HttpResponse, ServiceError> {
    let LabQuery { names, last_n } = query.into_inner();
    let last_n = parse_last_n(last_n.as_deref())?;
    let history = service.get_labs(&patient_id, names.as_deref(), last_n)?;
    Ok(HttpResponse::Ok().json(history))
}

pub async fn create_medication_order(
    service: web::Data<RecordService>,
    order: TypedJson<MedicationOrder>,
) -> Result<HttpResponse, ServiceError> {
    let ack = service.submit_medication_order(order.into_inner())?;
    Ok(HttpResponse::Created().json(ack))
}

pub async fn search_evidence(
    service: web::Data<RecordService>,
    request: TypedJson<EvidenceSearchRequest>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.search_evidence(&request)?;
    Ok(HttpResponse::Ok().json(response))
}
