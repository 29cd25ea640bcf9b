// Extension endpoints - installed extensions and compatibility verdicts

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiError;
use crate::extensions::ExtensionEntry;
use crate::interceptor::{ExtensionCompatibility, RegistryError};
use crate::server::AppState;

/// GET /translation-layer/extensions - Installed extensions with compatibility
///
/// The directory scan runs on the blocking pool without the registry lock;
/// the lock is only taken to attach verdicts.
pub async fn get_extensions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExtensionEntry>>, ApiError> {
    let catalog = state.catalog.clone();
    let installed = tokio::task::spawn_blocking(move || catalog.scan())
        .await
        .map_err(|e| ApiError::Internal(format!("Extension scan task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Failed to get extensions: {:#}", e)))?;

    let registry = state.registry();
    Ok(Json(state.catalog.join(installed, &registry)))
}

/// GET /translation-layer/extensions/:name/compatibility - One verdict
///
/// 404 when the extension has no tracked components.
pub async fn get_extension_compatibility(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ExtensionCompatibility>, ApiError> {
    let compat = state.registry().extension_compatibility(&name);
    if compat.component_count == 0 {
        return Err(RegistryError::ExtensionNotFound(name).into());
    }
    Ok(Json(compat))
}
