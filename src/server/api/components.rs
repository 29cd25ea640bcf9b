// Component endpoints - node lookup, value access and events

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;
use crate::interceptor::registry::EventAck;
use crate::interceptor::{NodeId, NodeView, RegistryError};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct ComponentResponse {
    pub node: NodeView,
    pub value: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ComponentValueResponse {
    pub node_id: NodeId,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct SetValueResponse {
    pub success: bool,
    pub node_id: NodeId,
    pub value: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

/// GET /translation-layer/component/:id - Node snapshot and live value
pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ComponentResponse>, ApiError> {
    let id = NodeId::new(id);
    let registry = state.registry();

    Ok(Json(ComponentResponse {
        node: registry.component(&id)?,
        value: registry.component_value(&id)?,
    }))
}

/// GET /translation-layer/component/:id/value - Live value
///
/// 404 when the node is unknown or carries no value.
pub async fn get_component_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ComponentValueResponse>, ApiError> {
    let id = NodeId::new(id);
    let registry = state.registry();

    match registry.component_value(&id)? {
        Some(value) => Ok(Json(ComponentValueResponse { node_id: id, value })),
        None => Err(ApiError::NotFound(format!(
            "Component {} not found or has no value",
            id
        ))),
    }
}

/// POST /translation-layer/component/:id/value - Write a value
///
/// Body: `{"value": ...}`. 404 for an unknown node, 400 when the component
/// rejects the value.
pub async fn set_component_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetValueRequest>,
) -> Result<Json<SetValueResponse>, ApiError> {
    let id = NodeId::new(id);
    let mut registry = state.registry();

    registry.set_component_value(&id, request.value)?;
    let value = registry.component_value(&id)?;

    Ok(Json(SetValueResponse {
        success: true,
        node_id: id,
        value,
    }))
}

/// POST /translation-layer/component/:id/event/:name - Acknowledge an event
///
/// Body (optional): `{"data": {...}}`. No handler is dispatched; the
/// acknowledgement says so.
pub async fn trigger_event(
    State(state): State<AppState>,
    Path((id, event)): Path<(String, String)>,
    body: Option<Json<EventRequest>>,
) -> Result<Json<EventAck>, ApiError> {
    let id = NodeId::new(id);
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let registry = state.registry();

    registry
        .trigger_event(&id, &event, request.data.as_ref())
        .map(Json)
        .map_err(|err| match err {
            RegistryError::ComponentNotFound(_) => ApiError::BadRequest(err.to_string()),
            other => other.into(),
        })
}
