// --- File: crates/villa_pricing/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;
use villa_config::AppConfig;

use crate::handlers::{calculate_price_handler, PricingState};

/// Creates a router containing all routes for price quotes.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let pricing_state = Arc::new(PricingState { config });

    Router::new()
        .route("/calculate-price", post(calculate_price_handler))
        .with_state(pricing_state)
}
