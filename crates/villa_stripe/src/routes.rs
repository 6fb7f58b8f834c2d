// --- File: crates/villa_stripe/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{create_checkout_session_handler, reserve_handler, StripeState};

/// Creates a router containing all checkout routes.
pub fn routes(stripe_state: Arc<StripeState>) -> Router {
    Router::new()
        .route("/reserve", post(reserve_handler))
        .route(
            "/create-checkout-session",
            post(create_checkout_session_handler),
        )
        .with_state(stripe_state)
}
