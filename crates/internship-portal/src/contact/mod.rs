//! Contact section: validated visitor messages relayed by e-mail.

pub mod form;
pub mod message;
pub mod router;

pub use form::{ContactForm, ContactOutcome};
pub use message::{ContactField, ContactInput, ContactMessage, FieldError};
pub use router::contact_router;
