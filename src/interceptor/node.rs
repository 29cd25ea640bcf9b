//! Component nodes - the registry's record of one intercepted GUI object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::widget::ComponentHandle;

/// Opaque node identifier (random UUID v4)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One intercepted GUI object and its place in the tree
#[derive(Debug, Clone)]
pub struct ComponentNode {
    pub id: NodeId,
    /// Lower-cased class name of the host object
    pub kind: String,
    pub props: Map<String, Value>,
    /// Enclosing container (lookup only; the registry owns every node)
    pub parent_id: Option<NodeId>,
    /// Child ids in registration order, never duplicated
    pub children: Vec<NodeId>,
    /// Plugin that created the node, `None` for host components
    pub extension_name: Option<String>,
    component: ComponentHandle,
}

impl ComponentNode {
    /// Build a node from a host object, extracting its properties
    pub fn new(id: NodeId, component: ComponentHandle, extension_name: Option<String>) -> Self {
        let (kind, props) = {
            let widget = component.widget();
            (widget.kind.type_tag(), widget.extract_props())
        };

        Self {
            id,
            kind,
            props,
            parent_id: None,
            children: Vec::new(),
            extension_name,
            component,
        }
    }

    /// Handle to the live host object
    pub fn component(&self) -> &ComponentHandle {
        &self.component
    }

    /// Re-read properties from the live object
    pub fn refresh_props(&mut self) {
        self.props = self.component.widget().extract_props();
    }

    /// Append a child id unless it is already present
    pub(super) fn adopt(&mut self, child: &NodeId) {
        if !self.children.contains(child) {
            self.children.push(child.clone());
        }
    }

    /// Serializable snapshot of this node
    pub fn view(&self) -> NodeView {
        NodeView {
            id: self.id.clone(),
            kind: self.kind.clone(),
            props: self.props.clone(),
            parent_id: self.parent_id.clone(),
            children: self.children.clone(),
            extension_name: self.extension_name.clone(),
            supported: None,
        }
    }
}

/// JSON form of a node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
    pub props: Map<String, Value>,
    pub parent_id: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub extension_name: Option<String>,
    /// Whether the frontend has a renderer for this type (tree snapshots only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub supported: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::widget::{HostComponent, Widget, WidgetKind};
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(NodeId::generate(), NodeId::generate());
    }

    #[test]
    fn test_adopt_ignores_duplicates() {
        let handle = HostComponent::new(Widget::new(WidgetKind::Row));
        let mut node = ComponentNode::new(NodeId::new("row"), handle, None);
        let child = NodeId::new("child");
        node.adopt(&child);
        node.adopt(&child);
        assert_eq!(node.children, vec![child]);
    }

    #[test]
    fn test_view_serializes_type_field() {
        let handle = HostComponent::new(Widget::new(WidgetKind::Checkbox).value(json!(true)));
        let node = ComponentNode::new(NodeId::new("cb"), handle, Some("ext".to_string()));
        let json = serde_json::to_value(node.view()).unwrap();
        assert_eq!(json["type"], "checkbox");
        assert_eq!(json["id"], "cb");
        assert_eq!(json["props"]["value"], true);
        assert_eq!(json["extension_name"], "ext");
        assert!(json.get("supported").is_none());
    }

    #[test]
    fn test_refresh_props_reads_live_value() {
        let handle = HostComponent::new(Widget::new(WidgetKind::Number).value(json!(1)));
        let mut node = ComponentNode::new(NodeId::new("n"), handle.clone(), None);
        handle.widget().value = Some(json!(7));
        assert_eq!(node.props["value"], json!(1));
        node.refresh_props();
        assert_eq!(node.props["value"], json!(7));
    }
}
