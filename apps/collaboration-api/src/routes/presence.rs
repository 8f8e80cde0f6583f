use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/collaboration/active/{document_id}", get(active_collaborators))
        // Same count under the `/api` prefix.
        .route(
            "/api/collaboration/active/{document_id}",
            get(active_collaborators),
        )
        .route(
            "/api/collaboration/presence/{document_id}",
            get(presence_detail),
        )
}

// =========================================================================
// GET /collaboration/active/{document_id} — live editor count
// =========================================================================

/// `GET /collaboration/active/{document_id}` — Number of live connections
/// on a document, as a bare integer.
#[utoipa::path(
    get,
    path = "/collaboration/active/{document_id}",
    tag = "Collaboration",
    params(
        ("document_id" = String, Path, description = "Document ID"),
    ),
    responses(
        (status = 200, description = "Live connection count", body = usize),
    ),
)]
pub async fn active_collaborators(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Json<usize> {
    Json(state.presence.active_count(&document_id))
}

// =========================================================================
// GET /api/collaboration/presence/{document_id} — count plus connection ids
// =========================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceResponse {
    pub document_id: String,
    pub active: usize,
    pub connection_ids: Vec<String>,
}

/// `GET /api/collaboration/presence/{document_id}` — Live connections on a
/// document.
#[utoipa::path(
    get,
    path = "/api/collaboration/presence/{document_id}",
    tag = "Collaboration",
    params(
        ("document_id" = String, Path, description = "Document ID"),
    ),
    responses(
        (status = 200, description = "Presence for the document", body = PresenceResponse),
    ),
)]
pub async fn presence_detail(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Json<PresenceResponse> {
    let connection_ids: Vec<String> = state
        .presence
        .active_connection_ids(&document_id)
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    Json(PresenceResponse {
        active: connection_ids.len(),
        document_id,
        connection_ids,
    })
}
