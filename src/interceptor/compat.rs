//! Compatibility reporting
//!
//! An extension is supported when the frontend has a renderer for every
//! component type it produced. Extensions with no tracked components have an
//! unknown verdict (`supported: null`), not a negative one.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::registry::InterceptionRegistry;

/// Component types the native frontend can render
pub const SUPPORTED_COMPONENT_TYPES: &[&str] = &[
    "blocks",
    "row",
    "column",
    "group",
    "accordion",
    "button",
    "textbox",
    "slider",
    "checkbox",
    "dropdown",
    "number",
    "inputaccordionimpl",
    "formrow",
    "formcolumn",
];

/// Renderability verdict for one extension
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtensionCompatibility {
    pub extension_name: String,
    pub supported: Option<bool>,
    pub component_types: Vec<String>,
    pub unsupported_types: Vec<String>,
    pub component_count: usize,
}

/// Supported vs. encountered type sets
#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    pub supported_types: Vec<String>,
    pub encountered_types: Vec<String>,
    pub unsupported_types: Vec<String>,
}

impl InterceptionRegistry {
    pub fn is_supported_type(&self, kind: &str) -> bool {
        self.supported_types.contains(kind)
    }

    pub fn extension_compatibility(&self, extension: &str) -> ExtensionCompatibility {
        let ids = self
            .extension_components
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if ids.is_empty() {
            return ExtensionCompatibility {
                extension_name: extension.to_string(),
                supported: None,
                component_types: Vec::new(),
                unsupported_types: Vec::new(),
                component_count: 0,
            };
        }

        let component_types: BTreeSet<&str> = ids
            .iter()
            .filter_map(|id| self.components.get(id))
            .map(|node| node.kind.as_str())
            .collect();
        let unsupported_types: Vec<String> = component_types
            .iter()
            .filter(|kind| !self.is_supported_type(kind))
            .map(|kind| kind.to_string())
            .collect();

        ExtensionCompatibility {
            extension_name: extension.to_string(),
            supported: Some(unsupported_types.is_empty() && !component_types.is_empty()),
            component_types: component_types.iter().map(|s| s.to_string()).collect(),
            unsupported_types,
            component_count: ids.len(),
        }
    }

    /// Verdicts for every extension that has created components
    pub fn all_extensions_compatibility(&self) -> BTreeMap<String, ExtensionCompatibility> {
        self.extension_components
            .keys()
            .map(|ext| (ext.clone(), self.extension_compatibility(ext)))
            .collect()
    }

    pub fn supported_types(&self) -> Vec<String> {
        self.supported_types.iter().cloned().collect()
    }

    pub fn encountered_types(&self) -> Vec<String> {
        self.encountered_types.iter().cloned().collect()
    }

    /// Types seen during interception that no renderer handles
    pub fn unsupported_types(&self) -> Vec<String> {
        self.encountered_types
            .difference(&self.supported_types)
            .cloned()
            .collect()
    }

    pub fn type_report(&self) -> TypeReport {
        TypeReport {
            supported_types: self.supported_types(),
            encountered_types: self.encountered_types(),
            unsupported_types: self.unsupported_types(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::origin::CallContext;
    use crate::interceptor::registry::tests::{active_registry, ext_ctx, row, slider};
    use crate::interceptor::registry::RegistryOptions;
    use crate::interceptor::widget::{HostComponent, Widget, WidgetKind};

    fn gallery() -> crate::interceptor::widget::ComponentHandle {
        HostComponent::new(Widget::new(WidgetKind::Other {
            class_name: "Gallery".to_string(),
        }))
    }

    #[test]
    fn test_unknown_extension_has_null_verdict() {
        let registry = active_registry();
        let compat = registry.extension_compatibility("ghost");
        assert_eq!(compat.supported, None);
        assert_eq!(compat.component_count, 0);
        assert!(compat.component_types.is_empty());
        assert!(compat.unsupported_types.is_empty());
    }

    #[test]
    fn test_unsupported_type_flips_verdict() {
        let mut registry = active_registry();
        let ctx = ext_ctx("myext");

        registry.register_component(&slider(), &ctx);
        assert_eq!(registry.extension_compatibility("myext").supported, Some(true));

        registry.register_component(&gallery(), &ctx);
        let compat = registry.extension_compatibility("myext");
        assert_eq!(compat.supported, Some(false));
        assert_eq!(compat.unsupported_types, vec!["gallery".to_string()]);
        assert_eq!(compat.component_types, vec!["gallery", "slider"]);
        assert_eq!(compat.component_count, 2);

        // Adding supported components never flips it back
        registry.register_component(&slider(), &ctx);
        assert_eq!(registry.extension_compatibility("myext").supported, Some(false));
    }

    #[test]
    fn test_all_extensions_compatibility_covers_each_extension() {
        let mut registry = active_registry();
        registry.register_context(&row(), &ext_ctx("a"));
        registry.register_component(&gallery(), &ext_ctx("b"));
        registry.register_component(&slider(), &CallContext::host());

        let all = registry.all_extensions_compatibility();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a"].supported, Some(true));
        assert_eq!(all["b"].supported, Some(false));
    }

    #[test]
    fn test_type_report() {
        let mut registry = active_registry();
        registry.register_component(&gallery(), &CallContext::host());
        registry.register_component(&slider(), &CallContext::host());

        let report = registry.type_report();
        assert_eq!(report.encountered_types, vec!["gallery", "slider"]);
        assert_eq!(report.unsupported_types, vec!["gallery"]);
        assert_eq!(report.supported_types.len(), SUPPORTED_COMPONENT_TYPES.len());
    }

    #[test]
    fn test_extra_supported_types_from_options() {
        let mut registry = InterceptionRegistry::new(RegistryOptions {
            extra_supported_types: vec!["Gallery".to_string()],
            ..Default::default()
        });
        registry.activate();
        registry.register_component(&gallery(), &ext_ctx("viewer"));
        assert_eq!(registry.extension_compatibility("viewer").supported, Some(true));
        assert!(registry.unsupported_types().is_empty());
    }
}
