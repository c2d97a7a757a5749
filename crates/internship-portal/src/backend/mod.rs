//! Remote collaborator boundary.
//!
//! The site never owns persistence: positions, applications and contact messages all live in a
//! managed backend. The traits here are the only seam the page flows depend on, so the REST
//! client, the in-memory backend and the CSV catalog can be swapped freely.

use std::future::Future;

use crate::contact::ContactMessage;
use crate::internship::{ApplicationRow, PositionCategory};

pub mod csv_source;
pub mod memory;
pub mod rest;

pub use csv_source::{parse_catalog, CatalogCsvError, CsvPositionSource};
pub use memory::{InMemoryBackend, StoredApplication, StoredContactMessage};
pub use rest::RestBackend;

/// Remote table holding the authoritative position catalog.
pub const POSITIONS_TABLE: &str = "internship_positions";
/// Remote table receiving one row per application.
pub const APPLICATIONS_TABLE: &str = "internship_applications";
/// Remote function relaying contact-form messages by e-mail.
pub const CONTACT_FUNCTION: &str = "send-contact-email";

/// Read side of the catalog. Implementations return categories ordered by title.
pub trait PositionSource: Send + Sync {
    fn fetch_positions(
        &self,
    ) -> impl Future<Output = Result<Vec<PositionCategory>, BackendError>> + Send;
}

/// Write side for internship applications. Each call inserts exactly one row.
pub trait ApplicationStore: Send + Sync {
    fn insert_application(
        &self,
        row: ApplicationRow,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

/// Relay for contact-form messages.
pub trait ContactMailer: Send + Sync {
    fn send_contact_email(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

/// Failures surfaced by a remote collaborator.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The caller went away before the request resolved. Never reported as a failure.
    #[error("request aborted")]
    Aborted,
    #[error("backend transport failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, BackendError::Aborted)
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value)
        }
    }
}
