// --- File: crates/services/villa_backend/src/app.rs ---
//! Router assembly for the booking server.

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use villa_config::AppConfig;
use villa_stripe::{StripeError, StripeState};

/// Builds the full application backed by the real Stripe API.
pub fn build_app(config: Arc<AppConfig>) -> Result<Router, StripeError> {
    let stripe_state = Arc::new(StripeState::from_config(config.clone())?);
    Ok(build_router(config, stripe_state))
}

/// Merges every crate's routes, the optional API docs and the static site.
///
/// Unmatched paths fall through to `static_dir`, so `/` serves its `index.html`.
pub fn build_router(config: Arc<AppConfig>, stripe_state: Arc<StripeState>) -> Router {
    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .merge(villa_common::routes())
        .merge(villa_pricing::routes(config.clone()))
        .merge(villa_stripe::routes(stripe_state));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        use villa_common::doc::CommonApiDoc;
        use villa_pricing::doc::PricingApiDoc;
        use villa_stripe::doc::StripeApiDoc;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Villa Checkout API",
                version = "0.1.0",
                description = "Booking quotes and Stripe hosted checkout",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "Villa", description = "Core service endpoints"))
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CommonApiDoc::openapi());
        openapi_doc.merge(PricingApiDoc::openapi());
        openapi_doc.merge(StripeApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    info!("Serving static files from {}", config.static_dir);
    app.fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
