// --- File: crates/villa_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::error::{HttpStatusCode, VillaError};
use crate::models::ErrorBody;

// Include the client module
pub mod client;
pub mod extract;

/// Extension trait for VillaError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for VillaError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        } else {
            warn!("Request rejected with {}: {}", status_code, self);
        }

        // The static checkout page reads `error` as a plain string.
        let body = Json(ErrorBody {
            error: self.client_message(),
        });

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for VillaError to make it easier to use in Axum handlers.
impl IntoResponse for VillaError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
