//! Behavioral core of the academy recruitment site: the internship position catalog, the
//! application submitter and the contact form, plus the HTTP collaborator they talk to.

pub mod backend;
pub mod config;
pub mod contact;
pub mod error;
pub mod interaction;
pub mod internship;
pub mod lifecycle;
pub mod telemetry;
