//! Element Builder
//!
//! Describes one element (tag, attributes, children, listeners) and builds a
//! fresh host node from it. There is no retained identity and no diffing:
//! every `build` creates new nodes.

use std::borrow::Cow;
use std::rc::Rc;

use crate::error::Result;
use crate::host::{Event, Handler, Host};

/// Attribute value. `value` and `checked` become live properties.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(Cow<'static, str>),
    Flag(bool),
}

impl From<&'static str> for AttrValue {
    fn from(value: &'static str) -> Self {
        AttrValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(Cow::Owned(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

/// Child of an element: literal text or an already built node
pub enum Child<H: Host> {
    Text(String),
    Node(H::Node),
}

/// Element description, consumed by [`ElementSpec::build`]
pub struct ElementSpec<H: Host> {
    tag: Cow<'static, str>,
    attrs: Vec<(Cow<'static, str>, Option<AttrValue>)>,
    children: Vec<Child<H>>,
    listeners: Vec<(Cow<'static, str>, Handler)>,
}

/// Start describing an element
pub fn el<H: Host>(tag: impl Into<Cow<'static, str>>) -> ElementSpec<H> {
    ElementSpec {
        tag: tag.into(),
        attrs: Vec::new(),
        children: Vec::new(),
        listeners: Vec::new(),
    }
}

impl<H: Host> ElementSpec<H> {
    pub fn attr(self, name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
        self.attr_opt(name, Some(value))
    }

    /// Absent values are skipped when building
    pub fn attr_opt<V: Into<AttrValue>>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: Option<V>,
    ) -> Self {
        self.attrs.push((name.into(), value.map(Into::into)));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    pub fn child(mut self, node: H::Node) -> Self {
        self.children.push(Child::Node(node));
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = H::Node>) -> Self {
        self.children.extend(nodes.into_iter().map(Child::Node));
        self
    }

    pub fn on(mut self, event: impl Into<Cow<'static, str>>, handler: impl Fn(&Event) + 'static) -> Self {
        self.listeners.push((event.into(), Rc::new(handler)));
        self
    }

    /// Create the node, apply attributes, append children in order, attach listeners
    pub fn build(self, host: &H) -> Result<H::Node> {
        let node = host.create_element(&self.tag)?;

        for (name, value) in &self.attrs {
            let Some(value) = value else { continue };
            match (name.as_ref(), value) {
                ("value", AttrValue::Text(text)) => host.set_value(&node, text)?,
                ("value", AttrValue::Flag(flag)) => host.set_value(&node, if *flag { "true" } else { "false" })?,
                ("checked", AttrValue::Flag(flag)) => host.set_checked(&node, *flag)?,
                ("checked", AttrValue::Text(text)) => host.set_checked(&node, !text.is_empty())?,
                (_, AttrValue::Text(text)) => host.set_attribute(&node, name, text)?,
                // boolean attribute: present when true, omitted when false
                (_, AttrValue::Flag(true)) => host.set_attribute(&node, name, "")?,
                (_, AttrValue::Flag(false)) => {}
            }
        }

        for child in self.children {
            match child {
                Child::Text(text) => {
                    let text_node = host.create_text(&text)?;
                    host.append_child(&node, &text_node)?;
                }
                Child::Node(child) => host.append_child(&node, &child)?,
            }
        }

        for (event, handler) in self.listeners {
            host.listen(&node, &event, handler)?;
        }

        Ok(node)
    }
}
