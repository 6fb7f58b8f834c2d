// --- File: crates/villa_pricing/src/handlers.rs ---
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;
use villa_common::{missing_field, JsonOrForm, VillaError};
use villa_config::AppConfig;

use crate::logic::{calculate_booking_price, cents_to_units};
use crate::models::{non_empty, Amount, PriceQuoteRequest, PriceQuoteResponse};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

// --- State for Pricing Handlers ---
#[derive(Clone)]
pub struct PricingState {
    pub config: Arc<AppConfig>,
}

/// Quotes a stay without opening a checkout session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calculate-price",
    request_body = PriceQuoteRequest,
    responses(
        (status = 200, description = "Price quote", body = PriceQuoteResponse),
        (status = 400, description = "Missing fields, invalid dates or invalid amounts", body = villa_common::models::ErrorBody)
    ),
    tag = "Pricing"
))]
pub async fn calculate_price_handler(
    State(state): State<Arc<PricingState>>,
    JsonOrForm(payload): JsonOrForm<PriceQuoteRequest>,
) -> Result<Json<PriceQuoteResponse>, VillaError> {

    // cleaningFee only has to be present; a zero fee is a valid quote
    let (
        Some(villa_name),
        Some(villa_slug),
        Some(base_rate),
        Some(cleaning_fee),
        Some(check_in),
        Some(check_out),
    ) = (
        non_empty(payload.villa_name),
        non_empty(payload.villa_slug),
        payload.base_rate.filter(Amount::is_truthy),
        payload.cleaning_fee,
        non_empty(payload.check_in),
        non_empty(payload.check_out),
    )
    else {
        return Err(missing_field(MISSING_FIELDS_MESSAGE));
    };

    let quote = calculate_booking_price(
        &base_rate,
        &cleaning_fee,
        &check_in,
        &check_out,
        &state.config.pricing,
    )?;

    info!(
        "[Pricing] Quote for {} ({}): {} nights, total {} cents",
        villa_name, villa_slug, quote.nights, quote.total_price_cents
    );

    Ok(Json(PriceQuoteResponse {
        villa_name,
        villa_slug,
        ical_feed: payload.ical_feed,
        nights: quote.nights,
        base_rate: cents_to_units(quote.base_rate_cents),
        cleaning_fee: cents_to_units(quote.cleaning_fee_cents),
        total_price: cents_to_units(quote.total_price_cents),
        total_price_cents: quote.total_price_cents,
        check_in,
        check_out,
    }))
}
