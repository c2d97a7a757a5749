use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use super::application::{ApplicationDraft, DraftField};
use super::catalog::{CatalogSnapshot, CatalogState, LoadOutcome};
use crate::backend::{ApplicationStore, BackendError, PositionSource};
use crate::lifecycle::ViewLifecycle;

/// Server-side counterpart of the internship page, shared by every request.
///
/// The catalog is mounted for the lifetime of the service: it serves the fallback until the
/// startup load lands and stops accepting results once [`shutdown`](Self::shutdown) runs.
pub struct InternshipService<B> {
    backend: Arc<B>,
    catalog: CatalogState,
    lifecycle: ViewLifecycle,
    catalog_requested: AtomicBool,
}

impl<B> InternshipService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            catalog: CatalogState::new(),
            lifecycle: ViewLifecycle::mounted(),
            catalog_requested: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> CatalogSnapshot {
        self.catalog.snapshot()
    }

    pub fn shutdown(&self) {
        self.lifecycle.unmount();
    }
}

impl<B> InternshipService<B>
where
    B: PositionSource,
{
    /// Single catalog load for the service's lifetime.
    pub async fn load_catalog(&self) -> LoadOutcome {
        if self.catalog_requested.swap(true, Ordering::AcqRel) {
            return LoadOutcome::Skipped;
        }
        self.catalog
            .load_from(self.backend.as_ref(), &self.lifecycle)
            .await
    }
}

impl<B> InternshipService<B>
where
    B: ApplicationStore,
{
    /// Forwards a complete draft as one application row. Retries are independent inserts.
    pub async fn submit(&self, draft: ApplicationDraft) -> Result<(), ApplicationServiceError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(ApplicationServiceError::Incomplete { missing });
        }

        match self.backend.insert_application(draft.to_row()).await {
            Ok(()) => {
                info!(position = %draft.position, "internship application forwarded");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "error submitting application");
                Err(ApplicationServiceError::Backend(err))
            }
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("required fields missing: {}", field_list(.missing))]
    Incomplete { missing: Vec<DraftField> },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn field_list(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|field| field.column())
        .collect::<Vec<_>>()
        .join(", ")
}
