// File: services/villa_backend/src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use villa_backend::build_app;
use villa_common::{logging, Context, VillaError};
use villa_config::load_config;

#[tokio::main]
async fn main() -> Result<(), VillaError> {
    logging::init();

    let config = Arc::new(load_config().context("Failed to load config")?);
    if config.stripe.secret_key.is_none() {
        tracing::warn!("Stripe secret key not set; checkout requests will fail (set STRIPE_SECRET_KEY)");
    }

    let app = build_app(config.clone())?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
