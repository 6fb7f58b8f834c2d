// --- File: crates/villa_pricing/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod routes;

// Re-export for the backend and the checkout crate
pub use error::PricingError;
pub use logic::calculate_booking_price;
pub use models::{non_empty, Amount, BookingQuote, LineItem};
pub use routes::routes;
