//! In-Memory Host
//!
//! A small node tree with DOM semantics for the primitives in [`Host`]:
//! appending moves a node, `replace_with` swaps in place and is a no-op on
//! detached nodes. Used for headless rendering and for driving components in
//! tests without a browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::rc::{Rc, Weak};

use crate::error::{DomError, Result};
use crate::host::{Event, Handler, Host};

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHost;

impl MemoryHost {
    pub fn new() -> Self {
        Self
    }

    /// Stand-in for `document.body`
    pub fn body(&self) -> MemNode {
        MemNode::new(Kind::Element("body".to_string()))
    }
}

enum Kind {
    Element(String),
    Text(String),
}

struct NodeData {
    kind: Kind,
    attributes: BTreeMap<String, String>,
    value: String,
    checked: bool,
    children: Vec<MemNode>,
    parent: Weak<RefCell<NodeData>>,
    listeners: Vec<(String, Handler)>,
}

/// Handle to an in-memory node. Clones share the node.
#[derive(Clone)]
pub struct MemNode(Rc<RefCell<NodeData>>);

impl std::fmt::Debug for MemNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl MemNode {
    fn new(kind: Kind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            attributes: BTreeMap::new(),
            value: String::new(),
            checked: false,
            children: Vec::new(),
            parent: Weak::new(),
            listeners: Vec::new(),
        })))
    }

    pub fn same_node(&self, other: &MemNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Tag name, `None` for text nodes
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            Kind::Element(tag) => Some(tag.clone()),
            Kind::Text(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    pub fn checked(&self) -> bool {
        self.0.borrow().checked
    }

    pub fn children(&self) -> Vec<MemNode> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<MemNode> {
        self.0.borrow().parent.upgrade().map(MemNode)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            Kind::Text(text) => text.clone(),
            Kind::Element(_) => data.children.iter().map(MemNode::text_content).collect(),
        }
    }

    /// Descendant elements with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<MemNode> {
        let mut found = Vec::new();
        for child in self.children() {
            if child.tag().as_deref() == Some(tag) {
                found.push(child.clone());
            }
            found.extend(child.find_all(tag));
        }
        found
    }

    pub fn find(&self, tag: &str) -> Option<MemNode> {
        self.find_all(tag).into_iter().next()
    }

    /// Dispatch an event to the listeners registered for `event.name`.
    /// No borrow of the tree is held while handlers run.
    pub fn fire(&self, event: Event) {
        let handlers: Vec<Handler> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.name)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn click(&self) {
        self.fire(Event::new("click"));
    }

    /// Type into an input: update the live value, then fire `input`
    pub fn input(&self, text: &str) {
        self.0.borrow_mut().value = text.to_string();
        self.fire(Event::new("input").with_value(text));
    }

    /// Flip a checkbox, then fire `change`
    pub fn toggle_checkbox(&self) {
        let checked = {
            let mut data = self.0.borrow_mut();
            data.checked = !data.checked;
            data.checked
        };
        self.fire(Event::new("change").with_checked(checked));
    }

    /// Serialize as HTML. Live properties are not serialized.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        match &data.kind {
            Kind::Text(text) => out.push_str(&escape(text)),
            Kind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in &data.attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                for child in &data.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }

    fn detach(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !c.same_node(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn is_ancestor_of(&self, other: &MemNode) -> bool {
        let mut current = other.parent();
        while let Some(node) = current {
            if node.same_node(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Host for MemoryHost {
    type Node = MemNode;

    fn create_element(&self, tag: &str) -> Result<MemNode> {
        Ok(MemNode::new(Kind::Element(tag.to_string())))
    }

    fn create_text(&self, text: &str) -> Result<MemNode> {
        Ok(MemNode::new(Kind::Text(text.to_string())))
    }

    fn set_attribute(&self, node: &MemNode, name: &str, value: &str) -> Result<()> {
        let mut data = node.0.borrow_mut();
        if let Kind::Text(_) = data.kind {
            return Err(DomError::UnsupportedNode("set_attribute"));
        }
        data.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_value(&self, node: &MemNode, value: &str) -> Result<()> {
        node.0.borrow_mut().value = value.to_string();
        Ok(())
    }

    fn set_checked(&self, node: &MemNode, checked: bool) -> Result<()> {
        node.0.borrow_mut().checked = checked;
        Ok(())
    }

    fn append_child(&self, parent: &MemNode, child: &MemNode) -> Result<()> {
        if parent.same_node(child) || child.is_ancestor_of(parent) {
            return Err(DomError::Host {
                op: "append_child",
                message: "the new child is an ancestor of the parent".to_string(),
            });
        }
        if let Kind::Text(_) = parent.0.borrow().kind {
            return Err(DomError::UnsupportedNode("append_child"));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&parent.0);
        parent.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn replace_with(&self, old: &MemNode, new: &MemNode) -> Result<()> {
        if old.same_node(new) {
            return Ok(());
        }
        let Some(parent) = old.parent() else {
            return Ok(());
        };
        if new.is_ancestor_of(&parent) || new.same_node(&parent) {
            return Err(DomError::Host {
                op: "replace_with",
                message: "the replacement is an ancestor of the target".to_string(),
            });
        }
        new.detach();
        let mut data = parent.0.borrow_mut();
        // position is looked up after detaching `new`, which may have been a sibling
        if let Some(index) = data.children.iter().position(|c| c.same_node(old)) {
            data.children[index] = new.clone();
        }
        drop(data);
        old.0.borrow_mut().parent = Weak::new();
        new.0.borrow_mut().parent = Rc::downgrade(&parent.0);
        Ok(())
    }

    fn listen(&self, node: &MemNode, event: &str, handler: Handler) -> Result<()> {
        node.0.borrow_mut().listeners.push((event.to_string(), handler));
        Ok(())
    }
}
