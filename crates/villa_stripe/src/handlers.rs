// --- File: crates/villa_stripe/src/handlers.rs ---
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use tracing::info;
use villa_common::{log_result, missing_field, CheckoutService, JsonOrForm, VillaError};
use villa_config::AppConfig;
use villa_pricing::{calculate_booking_price, non_empty, Amount};

use crate::error::StripeError;
use crate::logic::{
    items_session_request, reserve_session_request, resolve_redirect_urls, CheckoutUrlResponse,
    CreateCheckoutSessionRequest, RequestOrigin, ReserveRequest,
};
use crate::service::StripeCheckoutService;

pub const MISSING_BOOKING_DATA_MESSAGE: &str = "Missing required booking data";
pub const MISSING_ITEMS_MESSAGE: &str = "Missing or empty items array";

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub checkout: Arc<dyn CheckoutService<Error = StripeError>>,
}

impl StripeState {
    /// State backed by the real Stripe API.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, StripeError> {
        let checkout = Arc::new(StripeCheckoutService::new(config.stripe.clone())?);
        Ok(Self { config, checkout })
    }
}

/// Prices a stay and opens a Stripe Checkout Session for it.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/reserve",
    request_body = ReserveRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutUrlResponse),
        (status = 400, description = "Missing booking data, invalid dates or invalid amounts", body = villa_common::models::ErrorBody),
        (status = 500, description = "Stripe API error", body = villa_common::models::ErrorBody)
    ),
    tag = "Checkout"
))]
pub async fn reserve_handler(
    State(state): State<Arc<StripeState>>,
    headers: HeaderMap,
    JsonOrForm(payload): JsonOrForm<ReserveRequest>,
) -> Result<Json<CheckoutUrlResponse>, VillaError> {

    let (Some(villa_name), Some(base_rate), Some(cleaning_fee), Some(check_in), Some(check_out)) = (
        non_empty(payload.villa_name),
        payload.base_rate.filter(Amount::is_truthy),
        payload.cleaning_fee.filter(Amount::is_truthy),
        non_empty(payload.check_in),
        non_empty(payload.check_out),
    ) else {
        return Err(missing_field(MISSING_BOOKING_DATA_MESSAGE));
    };
    let villa_slug = non_empty(payload.villa_slug);

    let quote = calculate_booking_price(
        &base_rate,
        &cleaning_fee,
        &check_in,
        &check_out,
        &state.config.pricing,
    )?;

    let urls = resolve_redirect_urls(
        &state.config.checkout,
        &RequestOrigin::from_headers(&headers),
        villa_slug.as_deref(),
    );
    info!(
        "[Stripe] Reserving {} for {} nights ({} cents), success -> {}",
        villa_name, quote.nights, quote.total_price_cents, urls.success_url
    );

    let request = reserve_session_request(
        &quote,
        &villa_name,
        villa_slug.as_deref(),
        &check_in,
        &check_out,
        urls,
    );
    let session = log_result(
        state.checkout.create_checkout_session(request).await,
        "[Stripe] Reservation checkout session created",
        "[Stripe] Error creating reservation checkout session",
    )?;

    Ok(Json(CheckoutUrlResponse { url: session.url }))
}

/// Opens a Stripe Checkout Session for a list of pre-priced items.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create-checkout-session",
    request_body = CreateCheckoutSessionRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutUrlResponse),
        (status = 400, description = "Missing or empty items array", body = villa_common::models::ErrorBody),
        (status = 500, description = "Stripe API error", body = villa_common::models::ErrorBody)
    ),
    tag = "Checkout"
))]
pub async fn create_checkout_session_handler(
    State(state): State<Arc<StripeState>>,
    headers: HeaderMap,
    JsonOrForm(payload): JsonOrForm<CreateCheckoutSessionRequest>,
) -> Result<Json<CheckoutUrlResponse>, VillaError> {

    let items = payload.items.unwrap_or_default();
    if items.is_empty() {
        return Err(missing_field(MISSING_ITEMS_MESSAGE));
    }
    let villa_name = payload.villa_name.unwrap_or_default();

    let urls = resolve_redirect_urls(
        &state.config.checkout,
        &RequestOrigin::from_headers(&headers),
        None,
    );
    let request = items_session_request(&items, &villa_name, urls);
    let session = log_result(
        state.checkout.create_checkout_session(request).await,
        "[Stripe] Checkout session created",
        "[Stripe] Error creating checkout session",
    )?;

    Ok(Json(CheckoutUrlResponse { url: session.url }))
}
