// --- File: crates/villa_common/src/error.rs ---
use axum::extract::rejection::{FormRejection, JsonRejection};
use std::fmt;
use thiserror::Error;

/// The base error type shared by every villa crate.
///
/// Feature crates keep their own error enums and implement `From<TheirError> for VillaError`,
/// so handlers can return `Result<_, VillaError>` and propagate with `?`.
#[derive(Error, Debug)]
pub enum VillaError {
    /// A required request field was absent or empty
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Input was present but invalid (dates, amounts)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The request body could not be parsed
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An external service (the payment provider) rejected or failed the call
    #[error("External service error: {service_name} - {message}")]
    UpstreamError {
        service_name: String,
        message: String,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl VillaError {
    /// The message returned to API clients, without the category prefix used in logs.
    pub fn client_message(&self) -> String {
        match self {
            VillaError::MissingField(msg)
            | VillaError::ValidationError(msg)
            | VillaError::ParseError(msg)
            | VillaError::ConfigError(msg)
            | VillaError::InternalError(msg) => msg.clone(),
            VillaError::UpstreamError { message, .. } => message.clone(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for VillaError {
    fn status_code(&self) -> u16 {
        match self {
            VillaError::MissingField(_) => 400,
            VillaError::ValidationError(_) => 400,
            VillaError::ParseError(_) => 400,
            VillaError::ConfigError(_) => 500,
            // Provider failures are reported as plain server errors, never retried.
            VillaError::UpstreamError { .. } => 500,
            VillaError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, VillaError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, VillaError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, VillaError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| VillaError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, VillaError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| VillaError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Request body rejections from the extractor
impl From<JsonRejection> for VillaError {
    fn from(rejection: JsonRejection) -> Self {
        VillaError::ParseError(rejection.body_text())
    }
}

impl From<FormRejection> for VillaError {
    fn from(rejection: FormRejection) -> Self {
        VillaError::ParseError(rejection.body_text())
    }
}

// Utility functions for error handling
pub fn missing_field<T: fmt::Display>(message: T) -> VillaError {
    VillaError::MissingField(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> VillaError {
    VillaError::ValidationError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> VillaError {
    VillaError::ConfigError(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(service_name: &str, message: T) -> VillaError {
    VillaError::UpstreamError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
