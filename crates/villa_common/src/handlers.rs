// --- File: crates/villa_common/src/handlers.rs ---
use axum::Json;

use crate::models::HealthResponse;

pub const HEALTH_MESSAGE: &str = "Server is running";

/// Liveness probe, answered on both GET and POST.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is up", body = HealthResponse)),
    tag = "Health"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}
