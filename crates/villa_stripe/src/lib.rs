// --- File: crates/villa_stripe/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

// Re-export for main backend
pub use error::StripeError;
pub use handlers::StripeState;
pub use logic::{CheckoutUrlResponse, CreateCheckoutSessionRequest, ReserveRequest};
pub use routes::routes;
pub use service::StripeCheckoutService;
