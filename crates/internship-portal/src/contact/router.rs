use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::error;

use super::form::{failed_notification, sent_notification};
use super::message::ContactInput;
use crate::backend::ContactMailer;

pub fn contact_router<M>(mailer: Arc<M>) -> Router
where
    M: ContactMailer + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(contact_handler::<M>))
        .with_state(mailer)
}

pub(crate) async fn contact_handler<M>(
    State(mailer): State<Arc<M>>,
    axum::Json(input): axum::Json<ContactInput>,
) -> Response
where
    M: ContactMailer + 'static,
{
    let message = match input.validate() {
        Ok(message) => message,
        Err(errors) => {
            let payload = json!({ "errors": errors });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match mailer.send_contact_email(message).await {
        Ok(()) => (StatusCode::OK, axum::Json(sent_notification())).into_response(),
        Err(err) => {
            error!(error = %err, "contact form error");
            (StatusCode::BAD_GATEWAY, axum::Json(failed_notification())).into_response()
        }
    }
}
