// --- File: crates/villa_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{CheckoutItem, CheckoutUrlResponse, CreateCheckoutSessionRequest, ReserveRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::reserve_handler,
        crate::handlers::create_checkout_session_handler
    ),
    components(schemas(
        ReserveRequest,
        CreateCheckoutSessionRequest,
        CheckoutItem,
        CheckoutUrlResponse
    )),
    tags((name = "Checkout", description = "Stripe hosted checkout for villa bookings"))
)]
pub struct StripeApiDoc;
