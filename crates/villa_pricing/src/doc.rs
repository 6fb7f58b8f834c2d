// --- File: crates/villa_pricing/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{Amount, BookingQuote, LineItem, PriceQuoteRequest, PriceQuoteResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::calculate_price_handler),
    components(schemas(Amount, PriceQuoteRequest, PriceQuoteResponse, BookingQuote, LineItem)),
    tags((name = "Pricing", description = "Nightly price quotes"))
)]
pub struct PricingApiDoc;
