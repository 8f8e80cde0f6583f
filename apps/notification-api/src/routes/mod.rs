pub mod health;
pub mod notifications;

use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(crate::gateway::server::router())
        .nest("/api", notifications::router())
}

#[derive(OpenApi)]
#[openapi(
    paths(health::health, notifications::send_notification),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            health::HealthResponse,
            notifications::NotifyRequest,
            notifications::NotifyResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Notifications", description = "System-wide notifications"),
    )
)]
pub struct ApiDoc;
