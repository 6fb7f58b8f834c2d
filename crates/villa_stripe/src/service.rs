use reqwest::Client;
use villa_common::{create_client, BoxFuture, CheckoutService, CheckoutSessionRequest, CheckoutSessionResult};
use villa_config::StripeConfig;

use crate::error::StripeError;
use crate::logic::create_checkout_session;

/// Stripe Checkout implementation of [`CheckoutService`].
pub struct StripeCheckoutService {
    client: Client,
    config: StripeConfig,
}

impl StripeCheckoutService {
    /// Builds the HTTP client once, with the configured timeout.
    pub fn new(config: StripeConfig) -> Result<Self, StripeError> {
        let client = create_client(config.timeout_secs, true)?;
        Ok(Self { client, config })
    }
}

impl CheckoutService for StripeCheckoutService {
    type Error = StripeError;

    fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CheckoutSessionResult, Self::Error> {
        Box::pin(async move { create_checkout_session(&self.client, &self.config, &request).await })
    }
}
