// --- File: crates/villa_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::health_handler;

/// Creates a router containing the routes shared by every deployment.
pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler).post(health_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_answers_get_and_post() {
        for method in ["GET", "POST"] {
            let response = routes()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, serde_json::json!({ "message": "Server is running" }));
        }
    }
}
