// --- File: crates/villa_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers talk to the payment provider through [`CheckoutService`], so routers can be
//! exercised in tests with an in-memory implementation.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// One line on the hosted checkout page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutLineItem {
    /// Product name shown to the guest
    pub name: String,
    /// Price per unit in minor currency units (cents)
    pub unit_amount: i64,
    pub quantity: i64,
}

/// Everything needed to open a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CheckoutSessionRequest {
    /// Rendered in this order on the checkout page
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
    /// Description attached to the resulting payment
    pub description: Option<String>,
    /// Key/value metadata attached to the resulting payment
    pub metadata: Vec<(String, String)>,
    /// Text shown next to the pay button
    pub submit_message: Option<String>,
}

/// A created checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSessionResult {
    pub id: String,
    /// Hosted page the guest is redirected to
    pub url: String,
}

/// A trait for hosted checkout providers.
pub trait CheckoutService: Send + Sync {
    /// Error type returned by checkout operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a checkout session and return its hosted URL.
    fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CheckoutSessionResult, Self::Error>;
}
