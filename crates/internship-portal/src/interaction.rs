//! Pieces shared by the forms on the site: the submit control guard and the transient
//! notifications shown after a submission resolves.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// State of a form's submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Keeps at most one submission in flight per form.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    /// Disables the control, or returns `None` when a submission is already running.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { guard: self })
    }

    pub fn state(&self) -> SubmitState {
        if self.in_flight.load(Ordering::Acquire) {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }
}

/// Re-enables the submit control when dropped, including when the submitting future is
/// cancelled.
#[derive(Debug)]
pub struct InFlight<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast-style message. Drained by the view once displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
