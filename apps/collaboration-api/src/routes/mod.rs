pub mod health;
pub mod presence;

use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(presence::router())
        .merge(crate::gateway::server::router())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        presence::active_collaborators,
        presence::presence_detail,
    ),
    components(
        schemas(
            health::HealthResponse,
            presence::PresenceResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Collaboration", description = "Document presence"),
    )
)]
pub struct ApiDoc;
