//! translayer - component tree capture for extension UIs
//!
//! The host adapter links this crate and reports construction events through
//! [`interceptor::Instrumentation`]; the binary serves the resulting registry
//! over HTTP.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use translayer::interceptor::{
//!     CallContext, HostComponent, InterceptionRegistry, Instrumentation, Widget, WidgetKind,
//! };
//!
//! let mut registry = InterceptionRegistry::default();
//! registry.activate();
//! let registry = Arc::new(Mutex::new(registry));
//! let hooks = Instrumentation::new(registry.clone());
//!
//! let ctx = CallContext::frames(["/opt/webui/extensions/my-ext/scripts/main.py"]);
//! let scope = hooks.context_created(&HostComponent::new(Widget::new(WidgetKind::Row)), &ctx);
//! hooks.component_created(&HostComponent::new(Widget::new(WidgetKind::Checkbox)), &ctx);
//! scope.exit();
//!
//! let tree = registry.lock().unwrap().component_tree();
//! assert_eq!(tree.extensions["my-ext"].component_count, 2);
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod extensions;
pub mod interceptor;
pub mod logging;
pub mod server;
pub mod startup;
