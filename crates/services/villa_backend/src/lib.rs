// --- File: crates/services/villa_backend/src/lib.rs ---

pub mod app;

pub use app::{build_app, build_router};
