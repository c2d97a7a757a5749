use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::application::ApplicationDraft;
use super::page::SUBMIT_FAILED_MESSAGE;
use super::service::{ApplicationServiceError, InternshipService};
use crate::backend::{ApplicationStore, PositionSource};

/// Router exposing the catalog and application intake to the site.
pub fn internship_router<B>(service: Arc<InternshipService<B>>) -> Router
where
    B: PositionSource + ApplicationStore + 'static,
{
    Router::new()
        .route("/api/v1/internship/positions", get(positions_handler::<B>))
        .route(
            "/api/v1/internship/applications",
            post(submit_handler::<B>),
        )
        .with_state(service)
}

pub(crate) async fn positions_handler<B>(
    State(service): State<Arc<InternshipService<B>>>,
) -> Response
where
    B: PositionSource + ApplicationStore + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog())).into_response()
}

pub(crate) async fn submit_handler<B>(
    State(service): State<Arc<InternshipService<B>>>,
    axum::Json(draft): axum::Json<ApplicationDraft>,
) -> Response
where
    B: PositionSource + ApplicationStore + 'static,
{
    match service.submit(draft).await {
        Ok(()) => {
            let payload = json!({ "status": "submitted" });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Incomplete { missing }) => {
            let payload = json!({
                "error": "required fields missing",
                "missing_fields": missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Backend(_)) => {
            let payload = json!({ "error": SUBMIT_FAILED_MESSAGE });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
