use actix_web::web;

use super::{handlers, middleware};

/// Register every route together with the extractor error mapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(middleware::json_config())
        .app_data(middleware::query_config())
        .app_data(middleware::path_config())
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/patients/{patient_id}")
                .route("/summary", web::get().to(handlers::patient_summary))
                .route("/labs", web::get().to(handlers::patient_labs)),
        )
        .route("/orders/medication", web::post().to(handlers::create_medication_order))
        .route("/evidence/search", web::post().to(handlers::search_evidence));
}
