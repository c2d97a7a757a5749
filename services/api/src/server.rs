use crate::cli::ServeArgs;
use crate::infra::{bootstrap, AppState, SiteBackend};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use internship_portal::error::AppError;
use internship_portal::internship::{InternshipService, LoadOutcome};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = bootstrap()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let backend = Arc::new(SiteBackend::from_config(&config)?);
    let internship_service = Arc::new(InternshipService::new(backend.clone()));

    let loader = {
        let service = internship_service.clone();
        tokio::spawn(async move {
            match service.load_catalog().await {
                LoadOutcome::Replaced { count } => info!(count, "serving remote catalog"),
                outcome => info!(?outcome, "serving fallback catalog"),
            }
        })
    };

    let app = with_site_routes(internship_service.clone(), backend.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, backend = backend.label(), "internship portal ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    internship_service.shutdown();
    if let Err(err) = loader.await {
        warn!(error = %err, "catalog loader task failed");
    }
    info!("internship portal stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
