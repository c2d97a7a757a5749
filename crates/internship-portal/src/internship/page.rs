use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info};

use super::application::{ApplicationDraft, DraftField, SubmitOutcome};
use super::catalog::{
    CatalogOrigin, CatalogSnapshot, CatalogState, LoadOutcome, PositionCategory,
};
use crate::backend::{ApplicationStore, PositionSource};
use crate::interaction::{Notification, SubmitGuard, SubmitState};
use crate::lifecycle::ViewLifecycle;

pub const CONFIRMATION_TITLE: &str = "Application Submit";
pub const CONFIRMATION_MESSAGE: &str =
    "Your application has been submitted successfully. Good luck !";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";

#[derive(Debug, Default)]
struct FormState {
    draft: ApplicationDraft,
    confirmation_open: bool,
    notifications: Vec<Notification>,
}

/// Everything the internship page renders at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct InternshipView {
    pub positions: Vec<PositionCategory>,
    pub catalog_source: CatalogOrigin,
    pub draft: ApplicationDraft,
    pub submit_state: SubmitState,
    pub submit_label: &'static str,
    pub confirmation_open: bool,
}

/// Per-visitor state of the internship page: the position catalog and the application form.
///
/// The two halves share nothing but the backend handle. The catalog is loaded once per mount;
/// the form allows one submission in flight at a time.
pub struct InternshipPage<B> {
    backend: Arc<B>,
    lifecycle: ViewLifecycle,
    catalog: CatalogState,
    catalog_requested: AtomicBool,
    form: Mutex<FormState>,
    submit: SubmitGuard,
}

impl<B> InternshipPage<B> {
    /// Mounts the page with the fallback catalog and an empty form.
    pub fn mount(backend: Arc<B>) -> Self {
        Self {
            backend,
            lifecycle: ViewLifecycle::mounted(),
            catalog: CatalogState::new(),
            catalog_requested: AtomicBool::new(false),
            form: Mutex::new(FormState::default()),
            submit: SubmitGuard::default(),
        }
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    pub fn positions(&self) -> Vec<PositionCategory> {
        self.catalog.positions()
    }

    pub fn catalog(&self) -> CatalogSnapshot {
        self.catalog.snapshot()
    }

    pub fn draft(&self) -> ApplicationDraft {
        self.form_state().draft.clone()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit.state()
    }

    pub fn confirmation_open(&self) -> bool {
        self.form_state().confirmation_open
    }

    pub fn dismiss_confirmation(&self) {
        self.form_state().confirmation_open = false;
    }

    /// Drains notifications raised since the last call.
    pub fn take_notifications(&self) -> Vec<Notification> {
        mem::take(&mut self.form_state().notifications)
    }

    /// Applies a keystroke or selection. Inputs are disabled while submitting.
    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> bool {
        if self.submit.state() == SubmitState::Submitting {
            return false;
        }
        self.form_state().draft.set(field, value);
        true
    }

    pub fn view(&self) -> InternshipView {
        let catalog = self.catalog.snapshot();
        let form = self.form_state();
        let submit_state = self.submit.state();
        InternshipView {
            positions: catalog.positions,
            catalog_source: catalog.source,
            draft: form.draft.clone(),
            submit_state,
            submit_label: match submit_state {
                SubmitState::Idle => "Submit",
                SubmitState::Submitting => "Submitting...",
            },
            confirmation_open: form.confirmation_open,
        }
    }

    fn form_state(&self) -> std::sync::MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B> InternshipPage<B>
where
    B: PositionSource,
{
    /// Issues the page's single catalog read. Later calls on the same mount are skipped.
    pub async fn load_positions(&self) -> LoadOutcome {
        if self.catalog_requested.swap(true, Ordering::AcqRel) {
            return LoadOutcome::Skipped;
        }
        self.catalog
            .load_from(self.backend.as_ref(), &self.lifecycle)
            .await
    }
}

impl<B> InternshipPage<B>
where
    B: ApplicationStore,
{
    /// Sends the current draft as one application row.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = self.submit.try_begin() else {
            return SubmitOutcome::Busy;
        };

        let draft = {
            let form = self.form_state();
            let missing = form.draft.missing_fields();
            if !missing.is_empty() {
                return SubmitOutcome::Incomplete(missing);
            }
            form.draft.clone()
        };

        let result = self.backend.insert_application(draft.to_row()).await;
        let mounted = self.lifecycle.is_mounted();

        match result {
            Ok(()) => {
                info!(position = %draft.position, "internship application submitted");
                if mounted {
                    let mut form = self.form_state();
                    form.confirmation_open = true;
                    form.draft.clear();
                }
                SubmitOutcome::Submitted
            }
            Err(err) => {
                error!(error = %err, "error submitting application");
                if mounted {
                    self.form_state()
                        .notifications
                        .push(Notification::error(SUBMIT_FAILED_MESSAGE));
                }
                SubmitOutcome::Failed
            }
        }
    }
}
