// --- File: crates/villa_stripe/src/error.rs ---
use thiserror::Error;
use villa_common::{config_error, upstream_error, HttpStatusCode, VillaError};

pub const STRIPE_SERVICE_NAME: &str = "Stripe";

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// No secret key configured
    #[error("Stripe secret key is not configured")]
    ConfigError,

    /// Stripe accepted the request but returned no hosted page
    #[error("Stripe response missing checkout URL")]
    MissingCheckoutUrl,
}

/// Convert StripeError to VillaError.
///
/// Provider failures surface to the guest with the provider's own message.
impl From<StripeError> for VillaError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::RequestError(e) => upstream_error(STRIPE_SERVICE_NAME, e),
            StripeError::ApiError { message, .. } => upstream_error(STRIPE_SERVICE_NAME, message),
            err @ StripeError::ParseError(_) => upstream_error(STRIPE_SERVICE_NAME, err),
            err @ StripeError::ConfigError => config_error(err),
            err @ StripeError::MissingCheckoutUrl => upstream_error(STRIPE_SERVICE_NAME, err),
        }
    }
}

/// Every checkout failure is terminal for the request and reported as a 500.
impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        500
    }
}
