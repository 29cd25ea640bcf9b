// Interceptor module - component tree capture for the host GUI toolkit
//
// The host application defines its layout by constructing toolkit objects
// inside nested container scopes. Its adapter reports every construction and
// scope exit to this module, which rebuilds the layout as a serializable tree
// and attributes each component to the extension that created it.
//
// Architecture:
// - widget: tagged-union model of host objects (props, value checks)
// - origin: extension attribution from call contexts, memoized
// - registry: node store, context stack, skip policy, value access
// - tree / compat: read-only snapshots and renderability verdicts
// - hooks: instrumentation points with RAII scope guards
//
// All state lives behind one coarse lock (SharedRegistry) shared by the hooks
// and the HTTP API.

pub mod compat;
pub mod error;
pub mod hooks;
pub mod node;
pub mod origin;
pub mod registry;
pub mod tree;
pub mod widget;

use std::sync::{Arc, Mutex};

pub use compat::{ExtensionCompatibility, TypeReport};
pub use error::RegistryError;
pub use hooks::{BlockScope, Instrumentation};
pub use node::{NodeId, NodeView};
pub use origin::CallContext;
pub use registry::{ExtensionArgs, InterceptionRegistry, RegistryOptions};
pub use tree::ComponentTree;
pub use widget::{ComponentHandle, HostComponent, Widget, WidgetKind};

/// Registry shared between the construction hooks and the HTTP API
pub type SharedRegistry = Arc<Mutex<InterceptionRegistry>>;
