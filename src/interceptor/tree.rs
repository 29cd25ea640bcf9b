//! Tree materialization
//!
//! Builds a read-only snapshot grouped by extension. Each extension's slice
//! is rooted at its components whose parent it does not own, so extension
//! components nested in host containers still surface at the top of their
//! slice. Everything unattributed lands in the `_base_app` bucket.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::node::{NodeId, NodeView};
use super::registry::InterceptionRegistry;

/// Bucket name for components no extension created
pub const BASE_APP: &str = "_base_app";

/// One extension's slice of the component tree
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionTree {
    pub root_nodes: Vec<NodeId>,
    pub components: BTreeMap<NodeId, NodeView>,
    pub supported: Option<bool>,
    pub component_count: usize,
    pub component_types: Vec<String>,
    pub unsupported_types: Vec<String>,
}

/// Full snapshot grouped by extension
#[derive(Debug, Clone, Serialize)]
pub struct ComponentTree {
    pub extensions: BTreeMap<String, ExtensionTree>,
    pub supported_types: Vec<String>,
    pub total_extensions: usize,
}

impl InterceptionRegistry {
    /// Snapshot view of a node, tagged with renderer support
    fn tree_view(&self, id: &NodeId) -> Option<NodeView> {
        self.components.get(id).map(|node| {
            let mut view = node.view();
            view.supported = Some(self.is_supported_type(&node.kind));
            view
        })
    }

    fn extension_slice(&self, extension: &str, ids: &[NodeId]) -> ExtensionTree {
        let owned: HashSet<&NodeId> = ids.iter().collect();
        let mut root_nodes = Vec::new();
        let mut components = BTreeMap::new();

        for id in ids {
            let Some(view) = self.tree_view(id) else {
                continue;
            };
            let is_root = view
                .parent_id
                .as_ref()
                .map_or(true, |parent| !owned.contains(parent));
            if is_root {
                root_nodes.push(id.clone());
            }
            components.insert(id.clone(), view);
        }

        let compat = self.extension_compatibility(extension);
        ExtensionTree {
            root_nodes,
            components,
            supported: compat.supported,
            component_count: compat.component_count,
            component_types: compat.component_types,
            unsupported_types: compat.unsupported_types,
        }
    }

    fn base_app_slice(&self) -> Option<ExtensionTree> {
        // An extension directory named like the bucket merges into it
        let tracked: HashSet<&NodeId> = self
            .extension_components
            .iter()
            .filter(|(ext, _)| ext.as_str() != BASE_APP)
            .flat_map(|(_, ids)| ids)
            .collect();
        let mut root_nodes = Vec::new();
        let mut components = BTreeMap::new();
        let mut types = BTreeSet::new();

        for id in self.registration_order.iter().filter(|id| !tracked.contains(id)) {
            let Some(view) = self.tree_view(id) else {
                continue;
            };
            let is_root = view.parent_id.as_ref().map_or(true, |parent| {
                !self.components.contains_key(parent) || tracked.contains(parent)
            });
            if is_root {
                root_nodes.push(id.clone());
            }
            types.insert(view.kind.clone());
            components.insert(id.clone(), view);
        }

        if components.is_empty() {
            return None;
        }

        let unsupported_types = types
            .iter()
            .filter(|kind| !self.is_supported_type(kind))
            .cloned()
            .collect();

        Some(ExtensionTree {
            root_nodes,
            component_count: components.len(),
            components,
            supported: None,
            component_types: types.into_iter().collect(),
            unsupported_types,
        })
    }

    /// Snapshot of every tracked component, grouped by extension
    pub fn component_tree(&self) -> ComponentTree {
        let mut extensions: BTreeMap<String, ExtensionTree> = self
            .extension_components
            .iter()
            .filter(|(ext, _)| ext.as_str() != BASE_APP)
            .map(|(ext, ids)| (ext.clone(), self.extension_slice(ext, ids)))
            .collect();

        if let Some(base) = self.base_app_slice() {
            extensions.insert(BASE_APP.to_string(), base);
        }

        ComponentTree {
            total_extensions: extensions.len(),
            extensions,
            supported_types: self.supported_types(),
        }
    }

    /// One extension's slice, `None` when it has no tracked components
    pub fn extension_tree(&self, extension: &str) -> Option<ExtensionTree> {
        if extension == BASE_APP {
            return self.base_app_slice();
        }
        self.extension_components
            .get(extension)
            .filter(|ids| !ids.is_empty())
            .map(|ids| self.extension_slice(extension, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::origin::CallContext;
    use crate::interceptor::registry::tests::{
        active_registry, assert_consistent, ext_ctx, row, slider,
    };
    use serde_json::json;

    #[test]
    fn test_row_with_slider_end_to_end() {
        let mut registry = active_registry();
        let ctx = ext_ctx("myext");

        let (row_id, ext) = registry.register_context(&row(), &ctx).unwrap();
        let slider_id = registry.register_component(&slider(), &ctx).unwrap();
        registry.exit_context(&row_id, ext.as_deref());

        let tree = registry.component_tree();
        let myext = &tree.extensions["myext"];
        assert_eq!(myext.root_nodes, vec![row_id.clone()]);
        assert_eq!(myext.components[&row_id].children, vec![slider_id.clone()]);
        assert_eq!(myext.supported, Some(true));
        assert_eq!(registry.extension_compatibility("myext").supported, Some(true));

        let props = &myext.components[&slider_id].props;
        assert_eq!(props["minimum"], json!(0.0));
        assert_eq!(props["maximum"], json!(100.0));
        assert_eq!(props["step"], json!(1.0));
        assert_eq!(props["value"], json!(50));

        assert!(!tree.extensions.contains_key(BASE_APP));
        assert_eq!(tree.total_extensions, 1);
    }

    #[test]
    fn test_extension_nested_in_host_container() {
        let mut registry = active_registry();
        let host = CallContext::host();

        let (host_row, _) = registry.register_context(&row(), &host).unwrap();
        let (ext_row, ext) = registry.register_context(&row(), &ext_ctx("cn")).unwrap();
        let ext_leaf = registry.register_component(&slider(), &ext_ctx("cn")).unwrap();
        registry.exit_context(&ext_row, ext.as_deref());
        let host_leaf = registry.register_component(&slider(), &host).unwrap();
        registry.exit_context(&host_row, None);

        let tree = registry.component_tree();
        let cn = &tree.extensions["cn"];
        assert_eq!(cn.root_nodes, vec![ext_row.clone()]);
        assert!(cn.components.contains_key(&ext_leaf));
        assert_eq!(cn.components[&ext_row].parent_id, Some(host_row.clone()));

        let base = &tree.extensions[BASE_APP];
        assert_eq!(base.root_nodes, vec![host_row.clone()]);
        assert_eq!(base.component_count, 2);
        assert!(base.components.contains_key(&host_leaf));
        assert_eq!(base.supported, None);
        assert_eq!(tree.total_extensions, 2);
        assert_consistent(&registry);
    }

    #[test]
    fn test_host_component_inside_extension_container_is_base_root() {
        let mut registry = active_registry();
        let (ext_row, ext) = registry.register_context(&row(), &ext_ctx("e")).unwrap();
        let host_leaf = registry
            .register_component(&slider(), &CallContext::host())
            .unwrap();
        registry.exit_context(&ext_row, ext.as_deref());

        let tree = registry.component_tree();
        assert_eq!(tree.extensions[BASE_APP].root_nodes, vec![host_leaf]);
    }

    #[test]
    fn test_extension_named_like_base_bucket_is_merged() {
        let mut registry = active_registry();
        let host_row = registry.register_component(&row(), &CallContext::host()).unwrap();
        let ext_slider = registry
            .register_component(&slider(), &ext_ctx(BASE_APP))
            .unwrap();

        let tree = registry.component_tree();
        let base = &tree.extensions[BASE_APP];
        assert_eq!(base.component_count, 2);
        assert_eq!(base.component_types, vec!["row".to_string(), "slider".to_string()]);
        assert_eq!(base.root_nodes, vec![host_row, ext_slider.clone()]);
        assert_eq!(tree.total_extensions, 1);

        let single = registry.extension_tree(BASE_APP).unwrap();
        assert!(single.components.contains_key(&ext_slider));
    }

    #[test]
    fn test_unsupported_nodes_are_tagged() {
        use crate::interceptor::widget::{HostComponent, Widget, WidgetKind};

        let mut registry = active_registry();
        let image = HostComponent::new(Widget::new(WidgetKind::Other {
            class_name: "Image".to_string(),
        }));
        let id = registry.register_component(&image, &CallContext::host()).unwrap();

        let tree = registry.component_tree();
        let base = &tree.extensions[BASE_APP];
        assert_eq!(base.components[&id].supported, Some(false));
        assert_eq!(base.unsupported_types, vec!["image".to_string()]);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut registry = active_registry();
        registry.register_context(&row(), &ext_ctx("e")).unwrap();
        let before = registry.status();
        let _ = registry.component_tree();
        let _ = registry.extension_tree("e");
        let after = registry.status();
        assert_eq!(before.component_count, after.component_count);
        assert_eq!(before.open_contexts, after.open_contexts);
        assert_eq!(registry.context_depth("e"), 1);
    }

    #[test]
    fn test_extension_tree_lookup() {
        let mut registry = active_registry();
        registry.register_component(&slider(), &ext_ctx("e"));
        assert!(registry.extension_tree("e").is_some());
        assert!(registry.extension_tree("missing").is_none());
        assert!(registry.extension_tree(BASE_APP).is_none());
    }
}
