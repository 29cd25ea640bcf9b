//! Instrumentation points for the host integration
//!
//! The host adapter calls these at the boundary where the toolkit is
//! embedded: once after constructing a leaf component, and once after
//! constructing a container. Containers hand back a `BlockScope` guard whose
//! drop closes the scope, so the stack pop and depth decrement run on every
//! exit path.

use std::sync::{MutexGuard, PoisonError};

use super::node::NodeId;
use super::origin::CallContext;
use super::registry::InterceptionRegistry;
use super::widget::ComponentHandle;
use super::SharedRegistry;

/// Lock the registry, recovering from poisoning
///
/// Registration runs inside the host's construction path and must not
/// panic; a poisoned registry is still structurally valid because every
/// mutation completes before the lock is released.
fn lock(registry: &SharedRegistry) -> MutexGuard<'_, InterceptionRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Construction hooks bound to a shared registry
#[derive(Clone)]
pub struct Instrumentation {
    registry: SharedRegistry,
}

impl Instrumentation {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// A leaf component finished construction
    pub fn component_created(&self, component: &ComponentHandle, ctx: &CallContext) -> Option<NodeId> {
        lock(&self.registry).register_component(component, ctx)
    }

    /// A container finished construction and its scope is now open
    pub fn context_created(&self, component: &ComponentHandle, ctx: &CallContext) -> BlockScope {
        let opened = lock(&self.registry).register_context(component, ctx);
        BlockScope {
            registry: self.registry.clone(),
            opened,
        }
    }
}

/// Open container scope; closing it pops the registry's context stack
#[must_use = "dropping the scope immediately closes the container"]
pub struct BlockScope {
    registry: SharedRegistry,
    /// `None` when the container was skipped
    opened: Option<(NodeId, Option<String>)>,
}

impl BlockScope {
    /// Node id of the container, `None` if registration skipped it
    pub fn node_id(&self) -> Option<&NodeId> {
        self.opened.as_ref().map(|(id, _)| id)
    }

    /// Close the scope explicitly
    pub fn exit(self) {
        drop(self);
    }
}

impl Drop for BlockScope {
    fn drop(&mut self) {
        if let Some((id, extension)) = self.opened.take() {
            lock(&self.registry).exit_context(&id, extension.as_deref());
        }
    }
}
