// --- File: crates/villa_common/src/lib.rs ---

// Declare modules within this crate
pub mod doc; // OpenAPI fragment (feature "openapi")
pub mod error; // Error handling
pub mod handlers; // Shared HTTP handlers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared request/response bodies
pub mod routes; // Shared route definitions
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, missing_field, upstream_error, validation_error, Context,
    HttpStatusCode, VillaError,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, extract::JsonOrForm, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{
    BoxFuture, CheckoutLineItem, CheckoutService, CheckoutSessionRequest, CheckoutSessionResult,
};
