// --- File: crates/villa_pricing/src/error.rs ---
use thiserror::Error;
use villa_common::{validation_error, HttpStatusCode, VillaError};

/// Reasons a booking cannot be priced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Check-out is not after check-in, or a date did not parse
    #[error("Invalid date range")]
    InvalidDateRange,

    /// A money field is not a decimal number
    #[error("Invalid amount for {field}: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    /// A money field is negative and the pricing policy forbids it
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    /// The nightly rate is zero and the pricing policy forbids free stays
    #[error("baseRate must be greater than zero")]
    ZeroBaseRate,

    /// A cent amount does not fit in 64 bits
    #[error("Amount out of range")]
    AmountOutOfRange,
}

/// Every pricing failure is the client's input, so it becomes a 400.
impl From<PricingError> for VillaError {
    fn from(err: PricingError) -> Self {
        validation_error(err)
    }
}

impl HttpStatusCode for PricingError {
    fn status_code(&self) -> u16 {
        400
    }
}
