//! Interception registry
//!
//! Owns every intercepted node and the indices built over them. The host's
//! construction hooks call `register_context` / `register_component` as its
//! layout is defined, and `exit_context` when a container's scope closes.
//! Registration never fails outward: anything the registry cannot place is
//! skipped and logged, since it runs inside the host's own construction path.
//!
//! Invariants:
//! - every id in a `children` list, in `root_nodes` or in
//!   `extension_components` is a key of `components`
//! - a node with a parent appears exactly once in that parent's `children`
//! - `context_stack` only holds ids of open containers, innermost last

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::error::RegistryError;
use super::node::{ComponentNode, NodeId, NodeView};
use super::origin::{CacheStats, CallContext, OriginResolver, DEFAULT_PLUGIN_ROOTS};
use super::widget::{ComponentHandle, HostComponent, ObjectKey};

/// Maximum open-container nesting per extension
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// `elem_id` fragments that mark help and documentation panels
pub const DEFAULT_ELEM_ID_BLACKLIST: &[&str] = &[
    "help",
    "info",
    "tooltip",
    "documentation",
    "readme",
    "accordion_help",
    "help_accordion",
    "info_accordion",
];

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for skip policy, attribution and compatibility
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    pub max_depth: usize,
    pub elem_id_blacklist: Vec<String>,
    pub plugin_roots: Vec<String>,
    pub extra_supported_types: Vec<String>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            elem_id_blacklist: DEFAULT_ELEM_ID_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            plugin_roots: DEFAULT_PLUGIN_ROOTS.iter().map(|s| s.to_string()).collect(),
            extra_supported_types: Vec::new(),
        }
    }
}

/// Why a registration was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
enum SkipReason {
    AlreadyMapped,
    AlreadyRegistered,
    Blacklisted(String),
    TooDeep { extension: String, depth: usize },
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot returned by the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStatus {
    pub active: bool,
    pub component_count: usize,
    pub root_nodes: usize,
    pub open_contexts: usize,
    pub extensions: usize,
    pub origin_cache: CacheStats,
}

/// Acknowledgment for a triggered event
#[derive(Debug, Clone, Serialize)]
pub struct EventAck {
    pub success: bool,
    pub node_id: NodeId,
    pub event: String,
    /// Always false: bound handlers are not dispatched
    pub implemented: bool,
    pub message: String,
}

/// Component values in the downstream script-args shape
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ExtensionArgs {
    pub args: Vec<Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Component tree built from host construction notifications
#[derive(Debug)]
pub struct InterceptionRegistry {
    pub(super) components: HashMap<NodeId, ComponentNode>,
    /// Host object identity -> node id (duplicate detection)
    component_map: HashMap<ObjectKey, NodeId>,
    /// Open containers, innermost last
    context_stack: Vec<NodeId>,
    /// Containers whose scope exited while not on top of the stack
    pending_exits: HashSet<NodeId>,
    pub(super) root_nodes: Vec<NodeId>,
    /// Node ids in registration order
    pub(super) registration_order: Vec<NodeId>,
    pub(super) extension_components: BTreeMap<String, Vec<NodeId>>,
    context_depth: HashMap<String, usize>,
    pub(super) encountered_types: BTreeSet<String>,
    pub(super) supported_types: BTreeSet<String>,
    resolver: OriginResolver,
    max_depth: usize,
    elem_id_blacklist: Vec<String>,
    active: bool,
}

impl Default for InterceptionRegistry {
    fn default() -> Self {
        Self::new(RegistryOptions::default())
    }
}

impl InterceptionRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        let supported_types = super::compat::SUPPORTED_COMPONENT_TYPES
            .iter()
            .map(|s| s.to_string())
            .chain(
                options
                    .extra_supported_types
                    .iter()
                    .map(|s| s.to_lowercase()),
            )
            .collect();

        Self {
            components: HashMap::new(),
            component_map: HashMap::new(),
            context_stack: Vec::new(),
            pending_exits: HashSet::new(),
            root_nodes: Vec::new(),
            registration_order: Vec::new(),
            extension_components: BTreeMap::new(),
            context_depth: HashMap::new(),
            encountered_types: BTreeSet::new(),
            supported_types,
            resolver: OriginResolver::new(options.plugin_roots),
            max_depth: options.max_depth,
            elem_id_blacklist: options
                .elem_id_blacklist
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            active: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Start accepting registrations
    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            tracing::info!("Translation layer activated");
        }
    }

    /// Stop accepting registrations (existing nodes are kept)
    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            tracing::info!("Translation layer deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Drop every node and index
    ///
    /// The attribution cache survives: call sites do not change between
    /// layout rebuilds.
    pub fn clear(&mut self) {
        self.components.clear();
        self.component_map.clear();
        self.context_stack.clear();
        self.pending_exits.clear();
        self.root_nodes.clear();
        self.registration_order.clear();
        self.extension_components.clear();
        self.context_depth.clear();
        self.encountered_types.clear();
        tracing::info!("Component tree cleared");
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            active: self.active,
            component_count: self.components.len(),
            root_nodes: self.root_nodes.len(),
            open_contexts: self.context_stack.len(),
            extensions: self.extension_components.len(),
            origin_cache: self.resolver.stats(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a container and open its scope
    ///
    /// Returns the new node id, or `None` when skipped. The caller must
    /// report the scope's end through `exit_context` with the same id.
    pub fn register_context(
        &mut self,
        component: &ComponentHandle,
        ctx: &CallContext,
    ) -> Option<(NodeId, Option<String>)> {
        let (id, extension) = self.register(component, ctx, true)?;

        if let Some(ext) = &extension {
            *self.context_depth.entry(ext.clone()).or_insert(0) += 1;
        }
        if !self.context_stack.contains(&id) {
            self.context_stack.push(id.clone());
        }

        Some((id, extension))
    }

    /// Register a leaf component under the innermost open container
    pub fn register_component(
        &mut self,
        component: &ComponentHandle,
        ctx: &CallContext,
    ) -> Option<NodeId> {
        self.register(component, ctx, false).map(|(id, _)| id)
    }

    /// Close a container's scope
    ///
    /// Only the top of the stack is popped. A scope that closes while a
    /// nested one is still open is remembered and discarded once it
    /// surfaces, so the stack neither underflows nor keeps stale entries.
    ///
    /// The extension's depth only drops for scopes still on the stack: a
    /// scope opened before `clear()` must not shorten one opened after it.
    pub fn exit_context(&mut self, id: &NodeId, extension: Option<&str>) {
        let was_open = match self.context_stack.last().cloned() {
            Some(top) if &top == id => {
                self.context_stack.pop();
                while let Some(top) = self.context_stack.last() {
                    if !self.pending_exits.remove(top) {
                        break;
                    }
                    self.context_stack.pop();
                }
                true
            }
            Some(top) if self.context_stack.contains(id) => {
                if !self.pending_exits.insert(id.clone()) {
                    return;
                }
                let err = RegistryError::ContextStackMismatch {
                    exiting: id.clone(),
                    top,
                };
                tracing::warn!("{}", err);
                true
            }
            _ => {
                tracing::debug!(node = %id, "Exit for context no longer on the stack");
                false
            }
        };

        if !was_open {
            return;
        }
        if let Some(depth) = extension.and_then(|ext| self.context_depth.get_mut(ext)) {
            *depth = depth.saturating_sub(1);
        }
    }

    /// Shared resolve/skip/build/link path for both entry points
    fn register(
        &mut self,
        component: &ComponentHandle,
        ctx: &CallContext,
        opens_scope: bool,
    ) -> Option<(NodeId, Option<String>)> {
        if !self.active {
            return None;
        }

        let extension = self.resolver.resolve(ctx);

        if let Some(reason) = self.should_skip(component, extension.as_deref(), opens_scope) {
            tracing::debug!(?reason, "Skipping component");
            return None;
        }

        let id = NodeId::generate();
        let mut node = ComponentNode::new(id.clone(), component.clone(), extension.clone());
        component.mark_registered();

        self.encountered_types.insert(node.kind.clone());

        if let Some(ext) = &extension {
            self.extension_components
                .entry(ext.clone())
                .or_default()
                .push(id.clone());
        }

        match self.context_stack.last().cloned() {
            Some(parent_id) => {
                if let Some(parent) = self.components.get_mut(&parent_id) {
                    parent.adopt(&id);
                    node.parent_id = Some(parent_id);
                } else if !self.root_nodes.contains(&id) {
                    self.root_nodes.push(id.clone());
                }
            }
            None => {
                if !self.root_nodes.contains(&id) {
                    self.root_nodes.push(id.clone());
                }
            }
        }

        tracing::debug!(
            node = %id,
            kind = %node.kind,
            extension = ?extension,
            parent = ?node.parent_id,
            "Registered component"
        );

        self.component_map.insert(HostComponent::key(component), id.clone());
        self.registration_order.push(id.clone());
        self.components.insert(id.clone(), node);

        Some((id, extension))
    }

    /// Skip policy, checked before any state changes
    fn should_skip(
        &self,
        component: &ComponentHandle,
        extension: Option<&str>,
        opens_scope: bool,
    ) -> Option<SkipReason> {
        if self.component_map.contains_key(&HostComponent::key(component)) {
            return Some(SkipReason::AlreadyMapped);
        }

        if component.is_registered() {
            return Some(SkipReason::AlreadyRegistered);
        }

        let elem_id = component.widget().elem_id.clone();
        if let Some(elem_id) = elem_id.filter(|id| !id.is_empty()) {
            let lowered = elem_id.to_lowercase();
            if self
                .elem_id_blacklist
                .iter()
                .any(|fragment| lowered.contains(fragment.as_str()))
            {
                tracing::debug!("Skipping blacklisted component with elem_id: {}", elem_id);
                return Some(SkipReason::Blacklisted(elem_id));
            }
        }

        if let Some(ext) = extension {
            let depth = self.context_depth.get(ext).copied().unwrap_or(0);
            // A new container adds one level; leaves sit inside the current one
            if depth + usize::from(opens_scope) > self.max_depth {
                tracing::debug!(
                    "Skipping component in '{}' - depth {} exceeds max {}",
                    ext,
                    depth,
                    self.max_depth
                );
                return Some(SkipReason::TooDeep {
                    extension: ext.to_string(),
                    depth,
                });
            }
        }

        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn component(&self, id: &NodeId) -> Result<NodeView, RegistryError> {
        self.components
            .get(id)
            .map(ComponentNode::view)
            .ok_or_else(|| RegistryError::ComponentNotFound(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.components.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn root_nodes(&self) -> &[NodeId] {
        &self.root_nodes
    }

    pub fn context_stack(&self) -> &[NodeId] {
        &self.context_stack
    }

    /// Current open-container depth for an extension
    pub fn context_depth(&self, extension: &str) -> usize {
        self.context_depth.get(extension).copied().unwrap_or(0)
    }

    /// Live value of a component (`None` if it has no value property)
    pub fn component_value(&self, id: &NodeId) -> Result<Option<Value>, RegistryError> {
        let node = self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::ComponentNotFound(id.clone()))?;
        Ok(node.component().widget().current_value())
    }

    /// Write a value to the live object and refresh the node's props
    pub fn set_component_value(&mut self, id: &NodeId, value: Value) -> Result<Value, RegistryError> {
        let node = self
            .components
            .get_mut(id)
            .ok_or_else(|| RegistryError::ComponentNotFound(id.clone()))?;

        node.component()
            .widget()
            .assign(value.clone())
            .map_err(|source| RegistryError::ValueRejected {
                id: id.clone(),
                source,
            })?;
        node.refresh_props();

        tracing::debug!(node = %id, "Component value updated");
        Ok(value)
    }

    /// Acknowledge an event without running any bound handler
    pub fn trigger_event(
        &self,
        id: &NodeId,
        event: &str,
        _data: Option<&Value>,
    ) -> Result<EventAck, RegistryError> {
        if !self.components.contains_key(id) {
            return Err(RegistryError::ComponentNotFound(id.clone()));
        }

        tracing::debug!(node = %id, event, "Event acknowledged without dispatch");
        Ok(EventAck {
            success: true,
            node_id: id.clone(),
            event: event.to_string(),
            implemented: false,
            message: "Event handler dispatch is not implemented; no handler was run".to_string(),
        })
    }

    /// Values of an extension's components, in registration order
    pub fn extension_values(&self, extension: &str) -> ExtensionArgs {
        let args = self
            .extension_components
            .get(extension)
            .into_iter()
            .flatten()
            .filter_map(|id| self.components.get(id))
            .filter_map(|node| node.component().widget().current_value())
            .filter(|v| !v.is_null())
            .collect();

        ExtensionArgs { args }
    }

    pub fn all_extension_values(&self) -> BTreeMap<String, ExtensionArgs> {
        self.extension_components
            .keys()
            .map(|ext| (ext.clone(), self.extension_values(ext)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::interceptor::widget::{Widget, WidgetKind};
    use serde_json::json;

    pub(crate) fn ext_ctx(name: &str) -> CallContext {
        CallContext::frames([format!("/webui/extensions/{name}/scripts/main.py")])
    }

    pub(crate) fn active_registry() -> InterceptionRegistry {
        let mut registry = InterceptionRegistry::default();
        registry.activate();
        registry
    }

    pub(crate) fn row() -> ComponentHandle {
        HostComponent::new(Widget::new(WidgetKind::Row))
    }

    pub(crate) fn slider() -> ComponentHandle {
        HostComponent::new(
            Widget::new(WidgetKind::Slider {
                minimum: 0.0,
                maximum: 100.0,
                step: 1.0,
            })
            .value(json!(50)),
        )
    }

    /// Check the forward/backward link invariants over the whole registry
    pub(crate) fn assert_consistent(registry: &InterceptionRegistry) {
        for (id, node) in &registry.components {
            let unique: HashSet<_> = node.children.iter().collect();
            assert_eq!(unique.len(), node.children.len(), "duplicate children");
            for child in &node.children {
                let child_node = registry.components.get(child).expect("dangling child");
                assert_eq!(child_node.parent_id.as_ref(), Some(id));
            }
            if let Some(parent) = &node.parent_id {
                let parent_node = registry.components.get(parent).expect("dangling parent");
                assert_eq!(parent_node.children.iter().filter(|c| *c == id).count(), 1);
            }
        }
        for id in registry
            .root_nodes
            .iter()
            .chain(registry.extension_components.values().flatten())
        {
            assert!(registry.components.contains_key(id));
        }
    }

    #[test]
    fn test_inactive_registry_ignores_registrations() {
        let mut registry = InterceptionRegistry::default();
        assert!(registry.register_component(&slider(), &CallContext::host()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registering_twice_is_a_noop() {
        let mut registry = active_registry();
        let handle = slider();

        let first = registry.register_component(&handle, &CallContext::host());
        assert!(first.is_some());
        handle.widget().value = Some(json!(99));
        assert!(registry.register_component(&handle, &CallContext::host()).is_none());

        assert_eq!(registry.len(), 1);
        let node = registry.component(&first.unwrap()).unwrap();
        assert_eq!(node.props["value"], json!(50));
    }

    #[test]
    fn test_registered_flag_survives_clear() {
        let mut registry = active_registry();
        let handle = slider();
        registry.register_component(&handle, &CallContext::host());
        registry.clear();
        assert!(registry.register_component(&handle, &CallContext::host()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_blacklisted_elem_id_is_never_registered() {
        let mut registry = active_registry();
        let help = HostComponent::new(
            Widget::new(WidgetKind::Accordion { open: false }).elem_id("help_accordion"),
        );
        assert!(registry.register_context(&help, &ext_ctx("myext")).is_none());
        let upper = HostComponent::new(Widget::new(WidgetKind::Button {
            variant: "secondary".into(),
        })
        .elem_id("Controlnet_README_btn"));
        assert!(registry.register_component(&upper, &CallContext::host()).is_none());
        assert!(registry.is_empty());
        assert!(registry.context_stack().is_empty());
        assert_eq!(registry.context_depth("myext"), 0);
    }

    #[test]
    fn test_nested_contexts_link_parent_and_children() {
        let mut registry = active_registry();
        let (a, _) = registry.register_context(&row(), &CallContext::host()).unwrap();
        let (b, _) = registry.register_context(&row(), &CallContext::host()).unwrap();
        let leaf = registry.register_component(&slider(), &CallContext::host()).unwrap();

        assert_eq!(registry.component(&b).unwrap().parent_id, Some(a.clone()));
        assert_eq!(registry.component(&leaf).unwrap().parent_id, Some(b.clone()));
        assert_eq!(registry.root_nodes(), &[a.clone()]);

        registry.exit_context(&b, None);
        registry.exit_context(&a, None);
        assert!(registry.context_stack().is_empty());
        assert_consistent(&registry);
    }

    #[test]
    fn test_out_of_order_exit_leaves_no_stale_entry() {
        let mut registry = active_registry();
        let (a, _) = registry.register_context(&row(), &CallContext::host()).unwrap();
        let (b, _) = registry.register_context(&row(), &CallContext::host()).unwrap();

        registry.exit_context(&a, None);
        assert_eq!(registry.context_stack(), &[a.clone(), b.clone()]);

        registry.exit_context(&b, None);
        assert!(registry.context_stack().is_empty());

        // Late exits for ids already gone are ignored
        registry.exit_context(&a, None);
        assert!(registry.context_stack().is_empty());
        assert_consistent(&registry);
    }

    #[test]
    fn test_depth_guard_skips_seventh_nested_context() {
        let mut registry = active_registry();
        let ctx = ext_ctx("deep");

        let opened: Vec<_> = (0..8)
            .filter_map(|_| registry.register_context(&row(), &ctx))
            .collect();
        assert_eq!(opened.len(), DEFAULT_MAX_DEPTH);
        assert_eq!(registry.len(), DEFAULT_MAX_DEPTH);
        assert_eq!(registry.context_depth("deep"), DEFAULT_MAX_DEPTH);

        // Leaves still fit inside the sixth level
        let leaf = registry.register_component(&slider(), &ctx).unwrap();
        let innermost = &opened.last().unwrap().0;
        assert_eq!(registry.component(&leaf).unwrap().parent_id.as_ref(), Some(innermost));

        for (id, ext) in opened.iter().rev() {
            registry.exit_context(id, ext.as_deref());
        }
        assert_eq!(registry.context_depth("deep"), 0);
        assert!(registry.register_context(&row(), &ctx).is_some());
    }

    #[test]
    fn test_depth_is_tracked_per_extension() {
        let mut registry = active_registry();
        for _ in 0..DEFAULT_MAX_DEPTH {
            registry.register_context(&row(), &ext_ctx("a")).unwrap();
        }
        assert!(registry.register_context(&row(), &ext_ctx("a")).is_none());
        assert!(registry.register_context(&row(), &ext_ctx("b")).is_some());
        assert!(registry.register_context(&row(), &CallContext::host()).is_some());
    }

    #[test]
    fn test_depth_decrement_floors_at_zero() {
        let mut registry = active_registry();
        let (id, ext) = registry.register_context(&row(), &ext_ctx("x")).unwrap();
        registry.exit_context(&id, ext.as_deref());
        registry.exit_context(&id, ext.as_deref());
        assert_eq!(registry.context_depth("x"), 0);
    }

    #[test]
    fn test_exit_after_clear_keeps_new_scope_depth() {
        let mut registry = active_registry();
        let (stale, ext) = registry.register_context(&row(), &ext_ctx("e")).unwrap();
        registry.clear();

        let (fresh, _) = registry.register_context(&row(), &ext_ctx("e")).unwrap();
        registry.exit_context(&stale, ext.as_deref());
        assert_eq!(registry.context_depth("e"), 1);
        assert_eq!(registry.context_stack(), &[fresh.clone()]);

        registry.exit_context(&fresh, ext.as_deref());
        assert_eq!(registry.context_depth("e"), 0);
    }

    #[test]
    fn test_repeated_out_of_order_exit_counts_once() {
        let mut registry = active_registry();
        let (outer, ext) = registry.register_context(&row(), &ext_ctx("e")).unwrap();
        let (inner, _) = registry.register_context(&row(), &ext_ctx("e")).unwrap();

        registry.exit_context(&outer, ext.as_deref());
        registry.exit_context(&outer, ext.as_deref());
        assert_eq!(registry.context_depth("e"), 1);

        registry.exit_context(&inner, ext.as_deref());
        assert_eq!(registry.context_depth("e"), 0);
        assert!(registry.context_stack().is_empty());
    }

    #[test]
    fn test_set_value_refreshes_props() {
        let mut registry = active_registry();
        let handle = slider();
        let id = registry.register_component(&handle, &CallContext::host()).unwrap();

        assert_eq!(registry.set_component_value(&id, json!(80)).unwrap(), json!(80));
        assert_eq!(registry.component_value(&id).unwrap(), Some(json!(80)));
        assert_eq!(registry.component(&id).unwrap().props["value"], json!(80));
        assert_eq!(handle.widget().value, Some(json!(80)));
    }

    #[test]
    fn test_set_value_failures() {
        let mut registry = active_registry();
        let id = registry.register_component(&slider(), &CallContext::host()).unwrap();
        let (row_id, _) = registry.register_context(&row(), &CallContext::host()).unwrap();

        assert!(matches!(
            registry.set_component_value(&id, json!(500)),
            Err(RegistryError::ValueRejected { .. })
        ));
        assert!(matches!(
            registry.set_component_value(&row_id, json!(1)),
            Err(RegistryError::ValueRejected { .. })
        ));
        assert!(matches!(
            registry.set_component_value(&NodeId::new("missing"), json!(1)),
            Err(RegistryError::ComponentNotFound(_))
        ));
        assert_eq!(registry.component_value(&id).unwrap(), Some(json!(50)));
    }

    #[test]
    fn test_trigger_event_is_flagged_unimplemented() {
        let mut registry = active_registry();
        let id = registry.register_component(&slider(), &CallContext::host()).unwrap();

        let ack = registry.trigger_event(&id, "change", None).unwrap();
        assert!(ack.success);
        assert!(!ack.implemented);
        assert_eq!(ack.event, "change");
        assert!(registry
            .trigger_event(&NodeId::new("nope"), "click", None)
            .is_err());
    }

    #[test]
    fn test_extension_values_in_registration_order() {
        let mut registry = active_registry();
        let ctx = ext_ctx("myext");
        let (row_id, ext) = registry.register_context(&row(), &ctx).unwrap();
        registry.register_component(&slider(), &ctx);
        let cb = HostComponent::new(Widget::new(WidgetKind::Checkbox).value(json!(true)));
        registry.register_component(&cb, &ctx);
        registry.exit_context(&row_id, ext.as_deref());

        assert_eq!(
            registry.extension_values("myext").args,
            vec![json!(50), json!(true)]
        );
        assert!(registry.extension_values("unknown").args.is_empty());
        assert_eq!(registry.all_extension_values().len(), 1);
    }

    #[test]
    fn test_clear_resets_everything_but_cache() {
        let mut registry = active_registry();
        registry.register_context(&row(), &ext_ctx("e")).unwrap();
        registry.register_component(&slider(), &ext_ctx("e"));
        registry.clear();

        let status = registry.status();
        assert!(status.active);
        assert_eq!(status.component_count, 0);
        assert_eq!(status.root_nodes, 0);
        assert_eq!(status.open_contexts, 0);
        assert_eq!(registry.context_depth("e"), 0);
        assert_eq!(status.origin_cache.entries, 1);
        assert!(registry.encountered_types.is_empty());
    }
}
