use crate::cli::ServeArgs;
use crate::infra::{load_snapshot, AppState, InMemoryFleetRepository};
use crate::routes::with_fleet_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_ops::config::AppConfig;
use fleet_ops::error::AppError;
use fleet_ops::fleet::utilization::FleetUtilizationService;
use fleet_ops::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.trucks_csv.take() {
        config.fleet.trucks_csv = Some(path);
    }
    if let Some(path) = args.loads_csv.take() {
        config.fleet.loads_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let snapshot = load_snapshot(config.fleet.trucks_csv.clone(), config.fleet.loads_csv.clone())?;
    let companies = snapshot.companies().len();
    let repository = Arc::new(InMemoryFleetRepository::from_snapshot(snapshot));
    let fleet_service = Arc::new(FleetUtilizationService::new(repository));

    let app = with_fleet_routes(fleet_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, companies, "fleet utilization service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
