use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/notifications", post(send_notification))
}

// =========================================================================
// POST /api/notifications — Broadcast a system notification
// =========================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotifyRequest {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyResponse {
    /// Connections the notification was handed to.
    pub delivered: usize,
}

/// `POST /api/notifications` — Push a notification to every connected client.
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notifications",
    request_body = NotifyRequest,
    responses(
        (status = 202, description = "Notification fanned out", body = NotifyResponse),
        (status = 400, description = "Validation error", body = ApiErrorBody),
    ),
)]
pub async fn send_notification(
    State(state): State<AppState>,
    body: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotifyResponse>), ApiError> {
    let Json(body) = body?;

    let mut errors: Vec<FieldError> = Vec::new();
    if body.message.trim().is_empty() {
        errors.push(FieldError {
            field: "message".into(),
            message: "Message must not be empty".into(),
        });
    } else if body.message.len() > state.config.max_notification_bytes {
        errors.push(FieldError {
            field: "message".into(),
            message: format!(
                "Message must be at most {} bytes",
                state.config.max_notification_bytes
            ),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let report = state.hub.notify(&body.message);
    tracing::info!(
        delivered = report.delivered,
        skipped = report.skipped,
        failed = report.failed,
        "system notification broadcast"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(NotifyResponse {
            delivered: report.delivered,
        }),
    ))
}
