//! Internship page: position catalog with fallback and the application form.

pub mod application;
pub mod catalog;
pub mod page;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use application::{ApplicationDraft, ApplicationRow, DraftField, SubmitOutcome};
pub use catalog::{
    fallback_catalog, CatalogOrigin, CatalogSnapshot, CatalogState, LoadOutcome, PositionCategory,
};
pub use page::{InternshipPage, InternshipView};
pub use router::internship_router;
pub use service::{ApplicationServiceError, InternshipService};
