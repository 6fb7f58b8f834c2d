// --- File: crates/villa_stripe/src/logic.rs ---
use axum::http::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use villa_common::{CheckoutLineItem, CheckoutSessionRequest, CheckoutSessionResult};
use villa_config::{CheckoutConfig, StripeConfig};
use villa_pricing::BookingQuote;

use crate::error::StripeError;

/// Bookings are charged in US dollars only.
pub const CURRENCY: &str = "usd";
const DEFAULT_HOST: &str = "localhost:3000";
const DEFAULT_PROTO: &str = "http";
const SESSIONS_PATH: &str = "/v1/checkout/sessions";

// --- Data Structures ---

/// Request from the booking page to reserve a stay.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    #[cfg_attr(feature = "openapi", schema(example = "5BR Paramount Haven"))]
    pub villa_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "tfv-c5-br-bf"))]
    pub villa_slug: Option<String>,
    pub base_rate: Option<villa_pricing::Amount>,
    pub cleaning_fee: Option<villa_pricing::Amount>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-08-12"))]
    pub check_in: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-08-14"))]
    pub check_out: Option<String>,
}

/// A pre-priced item for the generic checkout endpoint.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    #[cfg_attr(feature = "openapi", schema(example = "Airport transfer"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 7500))]
    pub amount_in_cents: i64,
    /// Missing or zero means 1
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Request to check out a list of pre-priced items.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    #[serde(default)]
    pub items: Option<Vec<CheckoutItem>>,
    #[serde(default)]
    pub villa_name: Option<String>,
}

/// Hosted checkout page the browser should be sent to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CheckoutUrlResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1...")
    )]
    pub url: String,
}

// Response FROM Stripe API on session creation
#[derive(Deserialize, Debug)]
struct StripeCheckoutSessionApiResponse {
    pub id: String,
    pub url: Option<String>,
}

// --- Redirect URLs ---

/// Where the request came from, as seen through a proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub host: Option<String>,
    pub proto: Option<String>,
}

impl RequestOrigin {
    /// Reads `Host` and the first `X-Forwarded-Proto` value.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_value = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            host: header_value("host"),
            proto: header_value("x-forwarded-proto"),
        }
    }

    fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.proto.as_deref().unwrap_or(DEFAULT_PROTO),
            self.host.as_deref().unwrap_or(DEFAULT_HOST)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

fn strip_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Resolves the success and cancel redirects for one checkout.
///
/// Explicit `success_url` / `cancel_url` win. Otherwise, when a villa slug is given and
/// a details base URL is configured, both point back at the villa page. Otherwise they
/// fall back to `success.html` / `cancel.html` under the site base URL.
pub fn resolve_redirect_urls(
    checkout: &CheckoutConfig,
    origin: &RequestOrigin,
    villa_slug: Option<&str>,
) -> RedirectUrls {
    let base = checkout
        .client_url
        .as_deref()
        .map(strip_trailing_slash)
        .unwrap_or_else(|| strip_trailing_slash(&origin.base_url()));

    let villa_page = match (checkout.villas_details_base_url.as_deref(), villa_slug) {
        (Some(details_base), Some(slug)) if !details_base.is_empty() && !slug.is_empty() => {
            Some(format!("{}/{}", strip_trailing_slash(details_base), slug))
        }
        _ => None,
    };

    let pick = |explicit: Option<&String>, page: &str| {
        let url = explicit
            .cloned()
            .or_else(|| villa_page.clone())
            .unwrap_or_else(|| format!("{}/{}", base, page));
        strip_trailing_slash(&url)
    };

    RedirectUrls {
        success_url: pick(checkout.success_url.as_ref(), "success.html"),
        cancel_url: pick(checkout.cancel_url.as_ref(), "cancel.html"),
    }
}

// --- Session Requests ---

fn product_name(villa_name: &str, item_name: &str) -> String {
    if villa_name.is_empty() {
        item_name.to_string()
    } else {
        format!("{} – {}", villa_name, item_name)
    }
}

fn booking_label(villa_name: &str) -> String {
    format!("Booking: {}", villa_name)
}

/// Builds the checkout for a priced stay; line items keep the quote's order.
pub fn reserve_session_request(
    quote: &BookingQuote,
    villa_name: &str,
    villa_slug: Option<&str>,
    check_in: &str,
    check_out: &str,
    urls: RedirectUrls,
) -> CheckoutSessionRequest {
    let line_items = quote
        .line_items
        .iter()
        .map(|item| CheckoutLineItem {
            name: product_name(villa_name, &item.name),
            unit_amount: item.amount_cents,
            quantity: item.quantity,
        })
        .collect();

    CheckoutSessionRequest {
        line_items,
        success_url: urls.success_url,
        cancel_url: urls.cancel_url,
        description: Some(booking_label(villa_name)),
        metadata: vec![
            ("villaName".to_string(), villa_name.to_string()),
            ("villaSlug".to_string(), villa_slug.unwrap_or_default().to_string()),
            ("checkIn".to_string(), check_in.to_string()),
            ("checkOut".to_string(), check_out.to_string()),
            ("nights".to_string(), quote.nights.to_string()),
        ],
        submit_message: Some(booking_label(villa_name)),
    }
}

/// Builds the checkout for pre-priced items. Booking labels and metadata are only
/// attached when a villa name is known.
pub fn items_session_request(
    items: &[CheckoutItem],
    villa_name: &str,
    urls: RedirectUrls,
) -> CheckoutSessionRequest {
    let line_items = items
        .iter()
        .map(|item| CheckoutLineItem {
            name: product_name(villa_name, &item.name),
            unit_amount: item.amount_in_cents,
            quantity: item.quantity.filter(|q| *q != 0).unwrap_or(1),
        })
        .collect();

    let labelled = !villa_name.is_empty();
    CheckoutSessionRequest {
        line_items,
        success_url: urls.success_url,
        cancel_url: urls.cancel_url,
        description: labelled.then(|| booking_label(villa_name)),
        metadata: if labelled {
            vec![("villaName".to_string(), villa_name.to_string())]
        } else {
            Vec::new()
        },
        submit_message: labelled.then(|| booking_label(villa_name)),
    }
}

/// Encodes a session request as Stripe's bracketed form fields.
pub fn build_checkout_form(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let mut form_body: Vec<(String, String)> = vec![
        ("payment_method_types[]".to_string(), "card".to_string()),
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (i, item) in request.line_items.iter().enumerate() {
        form_body.push((
            format!("line_items[{}][price_data][currency]", i),
            CURRENCY.to_string(),
        ));
        form_body.push((
            format!("line_items[{}][price_data][product_data][name]", i),
            item.name.clone(),
        ));
        form_body.push((
            format!("line_items[{}][price_data][unit_amount]", i),
            item.unit_amount.to_string(),
        ));
        form_body.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }

    if let Some(description) = &request.description {
        form_body.push((
            "payment_intent_data[description]".to_string(),
            description.clone(),
        ));
    }
    for (key, value) in &request.metadata {
        form_body.push((
            format!("payment_intent_data[metadata][{}]", key),
            value.clone(),
        ));
    }
    if let Some(message) = &request.submit_message {
        form_body.push(("custom_text[submit][message]".to_string(), message.clone()));
    }

    form_body
}

fn extract_error_message(body_text: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(body_text),
        Err(_) => body_text,
    }
}

// --- Core Logic Function ---

/// Creates a Stripe Checkout Session.
pub async fn create_checkout_session(
    client: &Client,
    stripe_config: &StripeConfig,
    request: &CheckoutSessionRequest,
) -> Result<CheckoutSessionResult, StripeError> {
    let stripe_secret_key = stripe_config
        .secret_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(StripeError::ConfigError)?;

    let form_body = build_checkout_form(request);
    let api_url = format!(
        "{}{}",
        stripe_config.api_base.trim_end_matches('/'),
        SESSIONS_PATH
    );

    info!(
        "[Stripe Logic] Creating Checkout Session with {} line items at {}",
        request.line_items.len(),
        api_url
    );

    let response = client
        .post(&api_url)
        .basic_auth(stripe_secret_key, None::<&str>)
        .form(&form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Stripe Logic] Stripe API response status: {}", status);

    if status.is_success() {
        let stripe_response: StripeCheckoutSessionApiResponse = serde_json::from_str(&body_text)?;
        let url = stripe_response.url.ok_or_else(|| {
            error!(
                "[Stripe Logic] Stripe response missing checkout session URL: {}",
                body_text
            );
            StripeError::MissingCheckoutUrl
        })?;
        info!(
            "[Stripe Logic] Stripe Checkout Session {} created",
            stripe_response.id
        );
        Ok(CheckoutSessionResult {
            id: stripe_response.id,
            url,
        })
    } else {
        let error_message = extract_error_message(body_text);
        error!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}. Message: {}",
            status, error_message
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message: error_message,
        })
    }
}
