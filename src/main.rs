// translayer - Component tree capture for extension UIs
//
// The host web UI builds its layout from toolkit components; extensions add
// their own controls into that layout. This service records every component
// as it is constructed, attributes it to the extension that created it, and
// serves the resulting tree over HTTP so a native frontend can re-render
// extension UIs and drive their values.
//
// Architecture:
// - Interceptor: registry, construction hooks, tree and compatibility views
// - Extensions: installed-extension discovery on disk
// - Server (axum): REST facade under /translation-layer
// - Demo: scripted host layout replayed through the hooks
//
// The modules live in the library target so a host adapter can link the
// interceptor directly; this binary only wires them together.

use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};
use translayer::config::Config;
use translayer::extensions::ExtensionCatalog;
use translayer::interceptor::{InterceptionRegistry, Instrumentation, SharedRegistry};
use translayer::server::{self, AppState};
use translayer::startup::{self, StartupReport};
use translayer::{cli, demo, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // The guard must be kept alive for the duration of the program to flush file logs
    let _file_guard = logging::init(&config.logging);

    // Build the registry from config; hooks and handlers share it
    let mut registry = InterceptionRegistry::new(config.interceptor.registry_options());
    if config.interceptor.enabled {
        registry.activate();
    } else {
        tracing::info!("Interceptor disabled in config; registrations will be ignored");
    }
    let registry: SharedRegistry = Arc::new(Mutex::new(registry));

    let mut report = StartupReport {
        interceptor_active: config.interceptor.enabled,
        ..Default::default()
    };

    let catalog = ExtensionCatalog::new(&config.extensions);
    match catalog.scan() {
        Ok(installed) => {
            tracing::debug!(
                "Found {} installed extension(s) in {:?}",
                installed.len(),
                catalog.dirs()
            );
            report.installed_extensions = Some(installed.len());
        }
        Err(e) => tracing::error!("Extension scan failed: {:#}", e),
    }

    if config.demo_mode {
        let hooks = Instrumentation::new(registry.clone());
        let created = demo::run_demo(&hooks);
        let captured = registry.lock().unwrap_or_else(PoisonError::into_inner).len();
        tracing::info!("Demo layout: {} components built, {} captured", created, captured);
        report.demo_components = Some(captured);
    }

    // Create shutdown channel for graceful server shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let state = AppState::new(registry.clone(), catalog);
    let bind_addr = config.bind_addr;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(bind_addr, state, shutdown_rx).await {
            tracing::error!("API server failed: {:#}", e);
        }
    });

    // Print startup banner AFTER initialization (shows actual status)
    startup::print_startup(&config, &report);
    startup::log_startup(&config, &report);

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");

    registry
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .deactivate();

    // If the send fails, the server has already stopped (bind failure)
    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
