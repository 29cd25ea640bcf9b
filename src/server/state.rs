//! Shared state handed to every API handler

use std::sync::{Arc, MutexGuard, PoisonError};

use crate::extensions::ExtensionCatalog;
use crate::interceptor::{InterceptionRegistry, SharedRegistry};

/// State for the HTTP facade
#[derive(Clone)]
pub struct AppState {
    /// Registry shared with the construction hooks
    pub registry: SharedRegistry,
    /// Installed-extension discovery
    pub catalog: Arc<ExtensionCatalog>,
}

impl AppState {
    pub fn new(registry: SharedRegistry, catalog: ExtensionCatalog) -> Self {
        Self {
            registry,
            catalog: Arc::new(catalog),
        }
    }

    /// Lock the registry for one request
    ///
    /// A poisoned lock is recovered the same way the construction hooks
    /// recover it; every mutation completes before the guard is released.
    pub(super) fn registry(&self) -> MutexGuard<'_, InterceptionRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
