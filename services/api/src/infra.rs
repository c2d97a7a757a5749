use internship_portal::backend::{
    ApplicationStore, BackendError, ContactMailer, InMemoryBackend, PositionSource, RestBackend,
};
use internship_portal::config::AppConfig;
use internship_portal::contact::ContactMessage;
use internship_portal::error::AppError;
use internship_portal::internship::{ApplicationRow, PositionCategory};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Collaborator chosen at startup: the managed backend when configured, otherwise an
/// in-memory stand-in.
#[derive(Debug, Clone)]
pub(crate) enum SiteBackend {
    Rest(RestBackend),
    Memory(InMemoryBackend),
}

impl SiteBackend {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        match &config.backend {
            Some(backend) => Ok(Self::Rest(RestBackend::new(backend)?)),
            None => {
                warn!("BACKEND_URL not set; using in-memory backend");
                Ok(Self::Memory(InMemoryBackend::default()))
            }
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            SiteBackend::Rest(_) => "remote",
            SiteBackend::Memory(_) => "in-memory",
        }
    }
}

impl PositionSource for SiteBackend {
    async fn fetch_positions(&self) -> Result<Vec<PositionCategory>, BackendError> {
        match self {
            SiteBackend::Rest(backend) => backend.fetch_positions().await,
            SiteBackend::Memory(backend) => backend.fetch_positions().await,
        }
    }
}

impl ApplicationStore for SiteBackend {
    async fn insert_application(&self, row: ApplicationRow) -> Result<(), BackendError> {
        match self {
            SiteBackend::Rest(backend) => backend.insert_application(row).await,
            SiteBackend::Memory(backend) => backend.insert_application(row).await,
        }
    }
}

impl ContactMailer for SiteBackend {
    async fn send_contact_email(&self, message: ContactMessage) -> Result<(), BackendError> {
        match self {
            SiteBackend::Rest(backend) => backend.send_contact_email(message).await,
            SiteBackend::Memory(backend) => backend.send_contact_email(message).await,
        }
    }
}

/// Loads configuration and installs the tracing subscriber.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    internship_portal::telemetry::init(&config.telemetry, config.environment)?;
    Ok(config)
}
