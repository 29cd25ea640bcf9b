//! Error types for registry operations

use super::node::NodeId;
use super::widget::ValueError;

/// Errors raised by registry queries and recovered registration conditions
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Component {0} not found")]
    ComponentNotFound(NodeId),

    #[error("Extension '{0}' not found or has no tracked components")]
    ExtensionNotFound(String),

    #[error("Failed to set value for component {id}: {source}")]
    ValueRejected {
        id: NodeId,
        #[source]
        source: ValueError,
    },

    /// Call context could not be inspected; attribution falls back to the host
    #[error("Failed to detect extension: {0}")]
    OriginResolutionFailure(String),

    /// A scope exited while another context was on top of the stack
    #[error("Context {exiting} exited while {top} is still open")]
    ContextStackMismatch { exiting: NodeId, top: NodeId },
}
