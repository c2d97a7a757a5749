use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use super::message::{ContactField, ContactInput, FieldError};
use crate::backend::ContactMailer;
use crate::interaction::{Notification, SubmitGuard, SubmitState};

pub const SENT_TITLE: &str = "ส่งข้อความสำเร็จ!";
pub const SENT_DESCRIPTION: &str = "เราจะติดต่อกลับโดยเร็วที่สุด";
pub const FAILED_TITLE: &str = "เกิดข้อผิดพลาด";
pub const FAILED_DESCRIPTION: &str = "กรุณาลองใหม่อีกครั้ง";

pub fn sent_notification() -> Notification {
    Notification::success(SENT_TITLE, SENT_DESCRIPTION)
}

pub fn failed_notification() -> Notification {
    Notification::error(FAILED_TITLE).with_description(FAILED_DESCRIPTION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    Failed,
    Busy,
    Invalid(Vec<FieldError>),
}

#[derive(Debug, Default)]
struct ContactFormState {
    input: ContactInput,
    field_errors: Vec<FieldError>,
    notifications: Vec<Notification>,
}

/// Contact section form: validated input relayed through the contact e-mail function.
pub struct ContactForm<M> {
    mailer: Arc<M>,
    state: Mutex<ContactFormState>,
    submit: SubmitGuard,
}

impl<M> ContactForm<M> {
    pub fn new(mailer: Arc<M>) -> Self {
        Self {
            mailer,
            state: Mutex::new(ContactFormState::default()),
            submit: SubmitGuard::default(),
        }
    }

    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        self.lock().input.set(field, value);
    }

    pub fn input(&self) -> ContactInput {
        self.lock().input.clone()
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.lock().field_errors.clone()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit.state()
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        mem::take(&mut self.lock().notifications)
    }

    fn lock(&self) -> MutexGuard<'_, ContactFormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M> ContactForm<M>
where
    M: ContactMailer,
{
    pub async fn submit(&self) -> ContactOutcome {
        let Some(_in_flight) = self.submit.try_begin() else {
            return ContactOutcome::Busy;
        };

        let message = {
            let mut state = self.lock();
            match state.input.validate() {
                Ok(message) => {
                    state.field_errors.clear();
                    message
                }
                Err(errors) => {
                    state.field_errors = errors.clone();
                    return ContactOutcome::Invalid(errors);
                }
            }
        };

        match self.mailer.send_contact_email(message).await {
            Ok(()) => {
                info!("contact message relayed");
                let mut state = self.lock();
                state.input = ContactInput::default();
                state.notifications.push(sent_notification());
                ContactOutcome::Sent
            }
            Err(err) => {
                error!(error = %err, "contact form error");
                self.lock().notifications.push(failed_notification());
                ContactOutcome::Failed
            }
        }
    }
}
