// Lifecycle endpoints - status, reset and type coverage

use axum::{extract::State, Json};
use serde::Serialize;

use crate::interceptor::registry::RegistryStatus;
use crate::interceptor::TypeReport;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /translation-layer/clear - Drop every tracked component
pub async fn clear_component_tree(State(state): State<AppState>) -> Json<ClearResponse> {
    state.registry().clear();
    tracing::info!("Component tree cleared via API");

    Json(ClearResponse {
        success: true,
        message: "Component tree cleared",
    })
}

/// GET /translation-layer/status - Registry counters
pub async fn get_status(State(state): State<AppState>) -> Json<RegistryStatus> {
    Json(state.registry().status())
}

/// GET /translation-layer/supported-types - Renderer coverage
pub async fn get_supported_types(State(state): State<AppState>) -> Json<TypeReport> {
    Json(state.registry().type_report())
}
