//! EHR record query service
//!
//! Main entry point for the service binary.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use ehr_service::query::{QueryOptions, RecordService};
use ehr_service::db::{FixtureStore, RecordStore};
use ehr_service::{api, config, telemetry};
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = config::load_config().context("failed to load configuration")?;
    telemetry::init(settings.log_format)?;

    let store: Arc<dyn RecordStore> = match &settings.fixture_path {
        Some(path) => Arc::new(FixtureStore::load(path).await?),
        None => Arc::new(FixtureStore::seeded().context("failed to build demo dataset")?),
    };

    let service = web::Data::new(RecordService::new(store, QueryOptions::from(&settings)));
    let origins = settings.allowed_origins();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(api::middleware::cors(&origins))
            .wrap(TracingLogger::default())
            .configure(api::configure)
    });
    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    let addr = (settings.server.host.as_str(), settings.server.port);
    info!(host = addr.0, port = addr.1, "starting ehr service");

    server
        .bind(addr)
        .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?
        .run()
        .await?;

    Ok(())
}
