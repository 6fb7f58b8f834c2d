// --- File: crates/villa_common/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{ErrorBody, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::health_handler),
    components(schemas(HealthResponse, ErrorBody)),
    tags((name = "Health", description = "Service liveness"))
)]
pub struct CommonApiDoc;
