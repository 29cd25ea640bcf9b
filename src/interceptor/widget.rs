//! Host object model
//!
//! The host toolkit's GUI objects are mirrored as a tagged union instead of
//! probing attributes at runtime. Each variant declares which properties it
//! exposes and which values it accepts, so property extraction and value
//! assignment are plain `match` dispatch on the variant.

use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// ─────────────────────────────────────────────────────────────────────────────
// Widget Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Structural variant of a host GUI object, with its type-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Blocks,
    Row,
    Column,
    Group,
    Tabs,
    TabItem,
    Accordion {
        open: bool,
    },
    /// Accordion with a checkbox in its header (value = checkbox state)
    InputAccordion {
        open: bool,
    },
    FormRow,
    FormColumn,
    Button {
        variant: String,
    },
    Textbox {
        placeholder: Option<String>,
        lines: u32,
    },
    Slider {
        minimum: f64,
        maximum: f64,
        step: f64,
    },
    Checkbox,
    Dropdown {
        choices: Vec<String>,
        multiselect: bool,
    },
    Number,
    /// Any component class the frontend has no dedicated variant for
    Other {
        class_name: String,
    },
}

impl WidgetKind {
    /// Lower-cased class name of the host object
    pub fn type_tag(&self) -> String {
        let tag = match self {
            Self::Blocks => "blocks",
            Self::Row => "row",
            Self::Column => "column",
            Self::Group => "group",
            Self::Tabs => "tabs",
            Self::TabItem => "tabitem",
            Self::Accordion { .. } => "accordion",
            Self::InputAccordion { .. } => "inputaccordionimpl",
            Self::FormRow => "formrow",
            Self::FormColumn => "formcolumn",
            Self::Button { .. } => "button",
            Self::Textbox { .. } => "textbox",
            Self::Slider { .. } => "slider",
            Self::Checkbox => "checkbox",
            Self::Dropdown { .. } => "dropdown",
            Self::Number => "number",
            Self::Other { class_name } => return class_name.to_lowercase(),
        };
        tag.to_string()
    }

    /// Whether the object opens a scope that nests other components
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Blocks
                | Self::Row
                | Self::Column
                | Self::Group
                | Self::Tabs
                | Self::TabItem
                | Self::Accordion { .. }
                | Self::InputAccordion { .. }
                | Self::FormRow
                | Self::FormColumn
        )
    }

    /// Whether the object carries a live `value`
    pub fn holds_value(&self) -> bool {
        !self.is_container() || matches!(self, Self::InputAccordion { .. })
    }

    /// Check a candidate value against what this variant accepts
    fn validate(&self, value: &Value) -> Result<(), ValueError> {
        match self {
            _ if !self.holds_value() => Err(ValueError::NoValue),
            Self::Slider {
                minimum, maximum, ..
            } => {
                let n = value.as_f64().ok_or(ValueError::WrongType("number"))?;
                if n < *minimum || n > *maximum {
                    return Err(ValueError::OutOfRange {
                        value: n,
                        minimum: *minimum,
                        maximum: *maximum,
                    });
                }
                Ok(())
            }
            Self::Number => value
                .is_number()
                .then_some(())
                .ok_or(ValueError::WrongType("number")),
            Self::Checkbox | Self::InputAccordion { .. } => value
                .is_boolean()
                .then_some(())
                .ok_or(ValueError::WrongType("boolean")),
            Self::Textbox { .. } | Self::Button { .. } => value
                .is_string()
                .then_some(())
                .ok_or(ValueError::WrongType("string")),
            Self::Dropdown {
                choices,
                multiselect,
            } => {
                let check = |v: &Value| -> Result<(), ValueError> {
                    let s = v.as_str().ok_or(ValueError::WrongType("string"))?;
                    if choices.is_empty() || choices.iter().any(|c| c == s) {
                        Ok(())
                    } else {
                        Err(ValueError::NotAChoice(s.to_string()))
                    }
                };
                if *multiselect {
                    let items = value.as_array().ok_or(ValueError::WrongType("array"))?;
                    items.iter().try_for_each(check)
                } else {
                    check(value)
                }
            }
            _ => Ok(()),
        }
    }
}

/// Reasons a widget refuses a value assignment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("component has no value property")]
    NoValue,

    #[error("expected a {0}")]
    WrongType(&'static str),

    #[error("{value} is outside [{minimum}, {maximum}]")]
    OutOfRange {
        value: f64,
        minimum: f64,
        maximum: f64,
    },

    #[error("'{0}' is not one of the available choices")]
    NotAChoice(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget State
// ─────────────────────────────────────────────────────────────────────────────

/// Live state of one host GUI object
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub kind: WidgetKind,
    pub label: Option<String>,
    pub value: Option<Value>,
    pub visible: bool,
    pub interactive: Option<bool>,
    pub elem_id: Option<String>,
    pub elem_classes: Vec<String>,
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            label: None,
            value: None,
            visible: true,
            interactive: None,
            elem_id: None,
            elem_classes: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn elem_id(mut self, elem_id: impl Into<String>) -> Self {
        self.elem_id = Some(elem_id.into());
        self
    }

    pub fn elem_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elem_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// Current value, `None` for objects without a value property
    pub fn current_value(&self) -> Option<Value> {
        if self.kind.holds_value() {
            self.value.clone()
        } else {
            None
        }
    }

    /// Assign a value after checking the variant accepts it
    pub fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        self.kind.validate(&value)?;
        self.value = Some(value);
        Ok(())
    }

    /// Serializable property map: shared subset first, then type-specific
    pub fn extract_props(&self) -> Map<String, Value> {
        let mut props = Map::new();

        if let Some(label) = &self.label {
            props.insert("label".into(), json!(label));
        }
        if self.kind.holds_value() {
            props.insert(
                "value".into(),
                self.value.clone().unwrap_or(Value::Null),
            );
            props.insert("interactive".into(), json!(self.interactive.unwrap_or(true)));
        }
        props.insert("visible".into(), json!(self.visible));
        props.insert("elem_id".into(), json!(self.elem_id));
        props.insert("elem_classes".into(), json!(self.elem_classes));

        match &self.kind {
            WidgetKind::Slider {
                minimum,
                maximum,
                step,
            } => {
                props.insert("minimum".into(), json!(minimum));
                props.insert("maximum".into(), json!(maximum));
                props.insert("step".into(), json!(step));
            }
            WidgetKind::Textbox { placeholder, lines } => {
                props.insert("placeholder".into(), json!(placeholder));
                props.insert("lines".into(), json!(lines));
            }
            WidgetKind::Dropdown {
                choices,
                multiselect,
            } => {
                props.insert("choices".into(), json!(choices));
                props.insert("multiselect".into(), json!(multiselect));
            }
            WidgetKind::Accordion { open } | WidgetKind::InputAccordion { open } => {
                props.insert("open".into(), json!(open));
            }
            WidgetKind::Button { variant } => {
                props.insert("variant".into(), json!(variant));
            }
            _ => {}
        }

        props
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Handles
// ─────────────────────────────────────────────────────────────────────────────

/// A host GUI object as seen by the registry
///
/// The host owns these objects; the registry holds a clone of the handle for
/// every node so the object stays reachable for value reads and writes.
#[derive(Debug)]
pub struct HostComponent {
    widget: Mutex<Widget>,
    registered: AtomicBool,
}

/// Shared handle to a host GUI object
pub type ComponentHandle = Arc<HostComponent>;

/// Identity of a host object (its allocation address)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ObjectKey(usize);

impl HostComponent {
    pub fn new(widget: Widget) -> ComponentHandle {
        Arc::new(Self {
            widget: Mutex::new(widget),
            registered: AtomicBool::new(false),
        })
    }

    /// Identity key, stable while any handle to the object is alive
    pub fn key(handle: &ComponentHandle) -> ObjectKey {
        ObjectKey(Arc::as_ptr(handle) as usize)
    }

    /// Lock the live widget state
    ///
    /// A poisoned lock still holds a usable widget, so it is recovered rather
    /// than propagated into the host's construction path.
    pub fn widget(&self) -> MutexGuard<'_, Widget> {
        self.widget.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    pub(super) fn mark_registered(&self) {
        self.registered.store(true, Ordering::Release);
    }
}
