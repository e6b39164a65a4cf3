//! Host Abstraction
//!
//! The handful of primitives a component tree needs from its rendering
//! environment. `WebHost` talks to the browser, `MemoryHost` keeps the tree
//! in memory.

use std::rc::Rc;

use crate::error::Result;

/// Interaction event as seen by a handler.
///
/// Hosts fill `value`/`checked` from the event target when it is a form
/// control, so handlers never touch host-specific event types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub name: String,
    pub value: Option<String>,
    pub checked: Option<bool>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}

/// Event callback. Single-threaded, so `Rc` rather than `Arc`.
pub type Handler = Rc<dyn Fn(&Event)>;

/// Rendering environment primitives
pub trait Host: Clone + 'static {
    /// Handle to a node owned by the host. Clones refer to the same node.
    type Node: Clone + 'static;

    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    fn create_text(&self, text: &str) -> Result<Self::Node>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Set the live `value` property (not the attribute)
    fn set_value(&self, node: &Self::Node, value: &str) -> Result<()>;

    /// Set the live `checked` property (not the attribute)
    fn set_checked(&self, node: &Self::Node, checked: bool) -> Result<()>;

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Put `new` where `old` is among its siblings. Does nothing when `old`
    /// has no parent.
    fn replace_with(&self, old: &Self::Node, new: &Self::Node) -> Result<()>;

    fn listen(&self, node: &Self::Node, event: &str, handler: Handler) -> Result<()>;
}
