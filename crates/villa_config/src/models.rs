// --- File: crates/villa_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_STRIPE_TIMEOUT_SECS: u64 = 30;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Checkout Redirect Config ---
// Every field may also come from the plain CLIENT_URL / SUCCESS_URL / CANCEL_URL /
// VILLAS_DETAILS_BASE_URL environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Public base URL of the site. Falls back to the request's Host header.
    #[serde(default)]
    pub client_url: Option<String>,
    /// Fixed success redirect; wins over every derived URL.
    #[serde(default)]
    pub success_url: Option<String>,
    /// Fixed cancel redirect; wins over every derived URL.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Base of the villa detail pages, joined with the villa slug on reservations.
    #[serde(default)]
    pub villas_details_base_url: Option<String>,
}

/// Which money inputs the booking price calculator accepts.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Accept negative nightly rates and cleaning fees.
    #[serde(default)]
    pub allow_negative_amounts: bool,
    /// Accept a nightly rate of zero (free stays).
    #[serde(default = "default_true")]
    pub allow_zero_base_rate: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            allow_negative_amounts: false,
            allow_zero_base_rate: true,
        }
    }
}

// --- Stripe Config ---
// The secret key is usually set to "secret_from_env" and resolved from STRIPE_SECRET_KEY.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StripeConfig {
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_stripe_api_base")]
    pub api_base: String,
    #[serde(default = "default_stripe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base: default_stripe_api_base(),
            timeout_secs: default_stripe_timeout_secs(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub pricing: PricingPolicy,
    #[serde(default)]
    pub stripe: StripeConfig,

    /// Directory holding index.html, the checkout script and the redirect pages.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_true() -> bool {
    true
}

fn default_stripe_api_base() -> String {
    DEFAULT_STRIPE_API_BASE.to_string()
}

fn default_stripe_timeout_secs() -> u64 {
    DEFAULT_STRIPE_TIMEOUT_SECS
}

fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}
