//! Browser Host
//!
//! [`Host`] over `web-sys`. Event closures are kept in a listener set owned
//! by the node they were attached to. The sets mirror the DOM: appending links
//! the child's set under the parent's, replacing swaps the old set for the new
//! one. Listeners stay alive as long as a retained node refers to them and are
//! released with the subtree.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::{DomError, Result};
use crate::host::{Event, Handler, Host};

#[derive(Default)]
struct ListenerSet {
    closures: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>>,
    children: RefCell<Vec<Rc<ListenerSet>>>,
    parent: RefCell<Weak<ListenerSet>>,
}

impl ListenerSet {
    fn detach(self: &Rc<Self>) {
        let parent = self.parent.replace(Weak::new()).upgrade();
        if let Some(parent) = parent {
            parent.children.borrow_mut().retain(|c| !Rc::ptr_eq(c, self));
        }
    }

    fn attach(self: &Rc<Self>, parent: &Rc<Self>) {
        self.detach();
        *self.parent.borrow_mut() = Rc::downgrade(parent);
        parent.children.borrow_mut().push(self.clone());
    }

    /// Put `new` in `old`'s place under `old`'s parent set
    fn replace(old: &Rc<Self>, new: &Rc<Self>) {
        if Rc::ptr_eq(old, new) {
            return;
        }
        let parent = old.parent.replace(Weak::new()).upgrade();
        new.detach();
        let Some(parent) = parent else { return };
        {
            let mut children = parent.children.borrow_mut();
            match children.iter().position(|c| Rc::ptr_eq(c, old)) {
                Some(index) => children[index] = new.clone(),
                None => children.push(new.clone()),
            }
        }
        *new.parent.borrow_mut() = Rc::downgrade(&parent);
    }
}

/// Browser node plus the closures it keeps alive
#[derive(Clone)]
pub struct WebNode {
    node: web_sys::Node,
    listeners: Rc<ListenerSet>,
}

impl WebNode {
    fn new(node: web_sys::Node) -> Self {
        Self {
            node,
            listeners: Rc::new(ListenerSet::default()),
        }
    }

    pub fn as_node(&self) -> &web_sys::Node {
        &self.node
    }

    /// Number of handles keeping this node's listeners alive
    #[doc(hidden)]
    pub fn listener_refs(&self) -> usize {
        Rc::strong_count(&self.listeners)
    }

    fn element(&self, op: &'static str) -> Result<&web_sys::Element> {
        self.node
            .dyn_ref::<web_sys::Element>()
            .ok_or(DomError::UnsupportedNode(op))
    }
}

#[derive(Clone)]
pub struct WebHost {
    document: web_sys::Document,
}

impl WebHost {
    /// Host bound to the current window's document
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    pub fn body(&self) -> Result<WebNode> {
        let body = self.document.body().ok_or(DomError::NoBody)?;
        Ok(WebNode::new(body.into()))
    }
}

/// Read value/checked from the target when it is a form control
fn event_from(name: &str, ev: &web_sys::Event) -> Event {
    let mut event = Event::new(name);
    if let Some(target) = ev.target() {
        if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
            event.value = Some(input.value());
            event.checked = Some(input.checked());
        } else if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            event.value = Some(area.value());
        }
    }
    event
}

impl Host for WebHost {
    type Node = WebNode;

    fn create_element(&self, tag: &str) -> Result<WebNode> {
        let element = self
            .document
            .create_element(tag)
            .map_err(DomError::js("create_element"))?;
        Ok(WebNode::new(element.into()))
    }

    fn create_text(&self, text: &str) -> Result<WebNode> {
        Ok(WebNode::new(self.document.create_text_node(text).into()))
    }

    fn set_attribute(&self, node: &WebNode, name: &str, value: &str) -> Result<()> {
        node.element("set_attribute")?
            .set_attribute(name, value)
            .map_err(DomError::js("set_attribute"))
    }

    fn set_value(&self, node: &WebNode, value: &str) -> Result<()> {
        if let Some(input) = node.node.dyn_ref::<web_sys::HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.node.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            self.set_attribute(node, "value", value)?;
        }
        Ok(())
    }

    fn set_checked(&self, node: &WebNode, checked: bool) -> Result<()> {
        let input = node
            .node
            .dyn_ref::<web_sys::HtmlInputElement>()
            .ok_or(DomError::UnsupportedNode("set_checked"))?;
        input.set_checked(checked);
        Ok(())
    }

    fn append_child(&self, parent: &WebNode, child: &WebNode) -> Result<()> {
        parent
            .node
            .append_child(&child.node)
            .map_err(DomError::js("append_child"))?;
        child.listeners.attach(&parent.listeners);
        Ok(())
    }

    fn replace_with(&self, old: &WebNode, new: &WebNode) -> Result<()> {
        if old.node.parent_node().is_none() {
            tracing::trace!("replace_with on a detached node");
            return Ok(());
        }
        old.element("replace_with")?
            .replace_with_with_node_1(&new.node)
            .map_err(DomError::js("replace_with"))?;
        ListenerSet::replace(&old.listeners, &new.listeners);
        Ok(())
    }

    fn listen(&self, node: &WebNode, event: &str, handler: Handler) -> Result<()> {
        let name = event.to_string();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            handler(&event_from(&name, &ev));
        });
        node.node
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(DomError::js("add_event_listener"))?;
        node.listeners.closures.borrow_mut().push(closure);
        tracing::trace!(event, "listener attached");
        Ok(())
    }
}
