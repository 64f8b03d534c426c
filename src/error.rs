//! Service errors and their HTTP mapping.

use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Patient not found")]
    NotFound { patient_id: String },

    /// Malformed request: missing or mistyped fields.
    #[error("{detail}")]
    Validation {
        detail: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Well-formed parameter with an unacceptable value.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(patient_id: impl Into<String>) -> Self {
        Self::NotFound {
            patient_id: patient_id.into(),
        }
    }

    /// Validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.clone()]);
        Self::Validation {
            detail: format!("Invalid {}: {}", field, message),
            fields,
        }
    }

    /// Validation failure that cannot be pinned to a field, e.g. unparseable JSON.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
            fields: BTreeMap::new(),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ServiceError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let message = err.into_inner().to_string();
        if path == "." {
            Self::malformed(format!("Invalid JSON body: {}", message))
        } else {
            Self::invalid_field(&path, message)
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut missing = Vec::new();
        let mut invalid = Vec::new();
        let mut fields = BTreeMap::new();
        for (field, errs) in &field_errors {
            if errs.iter().any(|e| e.code == "required") {
                missing.push(*field);
            } else {
                invalid.push(*field);
            }
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        missing.sort_unstable();
        invalid.sort_unstable();

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!("Missing required fields: {}", missing.join(", ")));
        }
        if !invalid.is_empty() {
            parts.push(format!("Invalid fields: {}", invalid.join(", ")));
        }

        Self::Validation {
            detail: parts.join("; "),
            fields,
        }
    }
}

/// JSON error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let fields = match self {
            Self::Validation { fields, .. } => fields.clone(),
            Self::Internal(cause) => {
                tracing::error!(error = ?cause, "request failed");
                BTreeMap::new()
            }
            _ => BTreeMap::new(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
            fields,
        })
    }
}
