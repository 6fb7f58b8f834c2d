// --- File: crates/villa_pricing/src/models.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;

/// A money input in currency units, as sent by the booking page.
///
/// The page posts strings (`"898"`), other callers post numbers (`898`). The caller's
/// text is kept because it is echoed into the nightly line item name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// `false` for an empty string or a zero number, mirroring how the booking page
    /// decides a field was left blank.
    pub fn is_truthy(&self) -> bool {
        match self {
            Amount::Number(n) => *n != 0.0,
            Amount::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

/// Keeps a string field only when it is present and non-empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// One priced line, in the order it appears on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[cfg_attr(feature = "openapi", schema(example = "3 nights × $100"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 30000))]
    pub amount_cents: i64,
    pub quantity: i64,
}

/// Price breakdown for one stay. Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub nights: i64,
    pub base_rate_cents: i64,
    pub cleaning_fee_cents: i64,
    /// `base_rate_cents * nights`
    pub total_base_cents: i64,
    /// `total_base_cents + cleaning_fee_cents`
    pub total_price_cents: i64,
    /// Always `[nights line, cleaning fee line]`
    pub line_items: Vec<LineItem>,
}

/// Body of `POST /calculate-price`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteRequest {
    #[cfg_attr(feature = "openapi", schema(example = "5BR Paramount Haven"))]
    pub villa_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "tfv-c5-br-bf"))]
    pub villa_slug: Option<String>,
    pub base_rate: Option<Amount>,
    pub cleaning_fee: Option<Amount>,
    pub ical_feed: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-08-12"))]
    pub check_in: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-08-14"))]
    pub check_out: Option<String>,
}

/// Response of `POST /calculate-price`. Money fields are in currency units.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteResponse {
    pub villa_name: String,
    pub villa_slug: String,
    /// Echoed only when the request carried it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ical_feed: Option<String>,
    pub nights: i64,
    pub base_rate: f64,
    pub cleaning_fee: f64,
    pub total_price: f64,
    pub total_price_cents: i64,
    pub check_in: String,
    pub check_out: String,
}
