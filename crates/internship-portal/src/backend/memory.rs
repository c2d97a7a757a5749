use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ApplicationStore, BackendError, ContactMailer, PositionSource};
use crate::contact::ContactMessage;
use crate::internship::{ApplicationRow, PositionCategory};

/// Application row as recorded by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredApplication {
    pub row: ApplicationRow,
    pub received_at: DateTime<Utc>,
}

/// Contact message as recorded by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContactMessage {
    pub message: ContactMessage,
    pub received_at: DateTime<Utc>,
}

/// Process-local stand-in for the managed backend, used for demos and when no backend URL is
/// configured. Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    positions: Arc<Mutex<Vec<PositionCategory>>>,
    applications: Arc<Mutex<Vec<StoredApplication>>>,
    contact_messages: Arc<Mutex<Vec<StoredContactMessage>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryBackend {
    pub fn with_positions(positions: Vec<PositionCategory>) -> Self {
        let backend = Self::default();
        if let Ok(mut guard) = backend.positions.lock() {
            *guard = positions;
        }
        backend
    }

    /// Simulates an outage: every call fails until toggled back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    pub fn applications(&self) -> Vec<StoredApplication> {
        self.applications
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn contact_messages(&self) -> Vec<StoredContactMessage> {
        self.contact_messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::Acquire) {
            Err(BackendError::Unavailable("in-memory backend offline".into()))
        } else {
            Ok(())
        }
    }
}

fn poisoned<T>(_: T) -> BackendError {
    BackendError::Unavailable("in-memory table lock poisoned".into())
}

impl PositionSource for InMemoryBackend {
    async fn fetch_positions(&self) -> Result<Vec<PositionCategory>, BackendError> {
        self.ensure_online()?;
        let mut positions = self.positions.lock().map_err(poisoned)?.clone();
        positions.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(positions)
    }
}

impl ApplicationStore for InMemoryBackend {
    async fn insert_application(&self, row: ApplicationRow) -> Result<(), BackendError> {
        self.ensure_online()?;
        self.applications
            .lock()
            .map_err(poisoned)?
            .push(StoredApplication {
                row,
                received_at: Utc::now(),
            });
        Ok(())
    }
}

impl ContactMailer for InMemoryBackend {
    async fn send_contact_email(&self, message: ContactMessage) -> Result<(), BackendError> {
        self.ensure_online()?;
        self.contact_messages
            .lock()
            .map_err(poisoned)?
            .push(StoredContactMessage {
                message,
                received_at: Utc::now(),
            });
        Ok(())
    }
}
