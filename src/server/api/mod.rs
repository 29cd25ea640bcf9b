// HTTP API module - exposes the captured component tree via REST endpoints
//
// Lets a native frontend:
// - fetch the layout grouped by extension
// - read and write live component values
// - check which extensions it can render
//
// All endpoints return JSON and are mounted under /translation-layer.

mod components;
mod extensions;
mod lifecycle;
mod tree;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::interceptor::RegistryError;

// Re-export endpoint handlers
pub use components::{get_component, get_component_value, set_component_value, trigger_event};
pub use extensions::{get_extension_compatibility, get_extensions};
pub use lifecycle::{clear_component_tree, get_status, get_supported_types};
pub use tree::{get_component_tree, get_extension_tree, get_extension_values};

/// API error responses
/// Converted to HTTP status codes via IntoResponse
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => {
                tracing::error!("API error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        tracing::debug!("API response: {} - {}", status, message);

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ComponentNotFound(_) | RegistryError::ExtensionNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            RegistryError::ValueRejected { .. } => ApiError::BadRequest(err.to_string()),
            RegistryError::OriginResolutionFailure(_)
            | RegistryError::ContextStackMismatch { .. } => ApiError::Internal(err.to_string()),
        }
    }
}
