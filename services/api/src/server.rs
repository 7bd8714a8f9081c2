use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use schoolatlas::config::AppConfig;
use schoolatlas::directory::import::SchoolCsvImporter;
use schoolatlas::directory::schools::ratings::SchoolRatingService;
use schoolatlas::error::AppError;
use schoolatlas::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySchoolDirectory};
use crate::routes::with_rating_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = match args.schools.take() {
        Some(path) => {
            let roll = SchoolCsvImporter::from_path(&path)?;
            let directory = InMemorySchoolDirectory::seeded(roll);
            info!(schools = directory.len(), roll = %path.display(), "school roll loaded");
            Arc::new(directory)
        }
        None => Arc::new(InMemorySchoolDirectory::default()),
    };

    let rating_service = Arc::new(SchoolRatingService::new(directory));

    let app = with_rating_routes(rating_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "school directory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
