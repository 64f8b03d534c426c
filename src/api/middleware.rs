//! CORS policy and extractor error handlers.

use actix_cors::Cors;
use actix_web::{error, web};

use crate::error::ServiceError;

/// CORS policy for the configured origins. An empty list or `*` allows any origin.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let any = allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*");

    let cors = if any {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = match &err {
            error::JsonPayloadError::ContentType => {
                "Request body must be application/json".to_string()
            }
            other => format!("Invalid JSON body: {other}"),
        };
        ServiceError::malformed(detail).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::malformed(format!("Invalid query parameters: {err}")).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ServiceError::malformed(format!("Invalid path: {err}")).into()
    })
}
