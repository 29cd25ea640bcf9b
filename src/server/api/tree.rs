// Tree endpoints - component tree snapshots and alwayson-script values

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::interceptor::tree::ExtensionTree;
use crate::interceptor::{ComponentTree, ExtensionArgs, RegistryError};
use crate::server::AppState;

const TREE_INACTIVE: &str = "Translation layer not active. Component tree may be empty.";
const VALUES_INACTIVE: &str = "Translation layer not active.";

#[derive(Debug, Serialize)]
pub struct ComponentTreeResponse {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub tree: ComponentTree,
}

#[derive(Debug, Serialize)]
pub struct ExtensionValuesResponse {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub values: BTreeMap<String, ExtensionArgs>,
}

/// GET /translation-layer/component-tree - Full tree grouped by extension
///
/// Served even while inactive, with a hint that it may be empty.
pub async fn get_component_tree(
    State(state): State<AppState>,
) -> Json<ComponentTreeResponse> {
    let registry = state.registry();
    let active = registry.is_active();

    Json(ComponentTreeResponse {
        active,
        message: (!active).then_some(TREE_INACTIVE),
        tree: registry.component_tree(),
    })
}

/// GET /translation-layer/extension-values - Component values per extension
pub async fn get_extension_values(
    State(state): State<AppState>,
) -> Json<ExtensionValuesResponse> {
    let registry = state.registry();

    let response = if registry.is_active() {
        ExtensionValuesResponse {
            active: true,
            message: None,
            values: registry.all_extension_values(),
        }
    } else {
        ExtensionValuesResponse {
            active: false,
            message: Some(VALUES_INACTIVE),
            values: BTreeMap::new(),
        }
    };

    Json(response)
}

/// GET /translation-layer/extensions/:name/tree - One extension's slice
pub async fn get_extension_tree(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ExtensionTree>, ApiError> {
    let registry = state.registry();
    registry
        .extension_tree(&name)
        .map(Json)
        .ok_or_else(|| RegistryError::ExtensionNotFound(name).into())
}
