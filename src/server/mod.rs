// Server module - HTTP facade over the interception registry
//
// A small axum app: every route lives under /translation-layer and reads or
// mutates the shared registry through AppState. The server runs until the
// shutdown channel fires, then finishes in-flight requests.

pub mod api;
mod state;


use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub use state::AppState;

/// Path prefix for every endpoint
pub const API_PREFIX: &str = "/translation-layer";

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/component-tree", get(api::get_component_tree))
        .route("/extension-values", get(api::get_extension_values))
        .route("/component/:id", get(api::get_component))
        .route(
            "/component/:id/value",
            get(api::get_component_value).post(api::set_component_value),
        )
        .route("/component/:id/event/:name", post(api::trigger_event))
        .route("/clear", post(api::clear_component_tree))
        .route("/status", get(api::get_status))
        .route("/supported-types", get(api::get_supported_types))
        .route("/extensions", get(api::get_extensions))
        .route(
            "/extensions/:name/compatibility",
            get(api::get_extension_compatibility),
        )
        .route("/extensions/:name/tree", get(api::get_extension_tree));

    Router::new().nest(API_PREFIX, api).with_state(state)
}

/// Bind and serve until `shutdown_rx` fires
pub async fn start_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let app = router(state);

    tracing::info!("Starting API server on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("API listening on http://{}{}", bind_addr, API_PREFIX);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("API server shut down gracefully");
    Ok(())
}
