//! Component Trait
//!
//! A component renders one node and keeps it. Nothing invalidates the cache
//! automatically: a component that changes its own state re-renders and
//! swaps the mounted node itself through [`NodeSlot::swap`].

use std::cell::RefCell;

use crate::error::Result;
use crate::host::Host;

/// The single node a component has rendered, if any
pub struct NodeSlot<H: Host> {
    node: RefCell<Option<H::Node>>,
}

impl<H: Host> Default for NodeSlot<H> {
    fn default() -> Self {
        Self {
            node: RefCell::new(None),
        }
    }
}

impl<H: Host> NodeSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<H::Node> {
        self.node.borrow().clone()
    }

    pub fn is_rendered(&self) -> bool {
        self.node.borrow().is_some()
    }

    pub fn set(&self, node: H::Node) {
        *self.node.borrow_mut() = Some(node);
    }

    /// Drop the cached node; the next `node()` call renders again
    pub fn invalidate(&self) {
        self.node.borrow_mut().take();
    }

    /// Replace the previously mounted node with `new` in place and cache it.
    /// With nothing cached yet, `new` is just cached.
    pub fn swap(&self, host: &H, new: H::Node) -> Result<()> {
        let old = self.get();
        if let Some(old) = old {
            host.replace_with(&old, &new)?;
        }
        self.set(new);
        Ok(())
    }
}

pub trait Component<H: Host> {
    /// Build a fresh node from current state
    fn render(&self) -> Result<H::Node>;

    fn slot(&self) -> &NodeSlot<H>;

    /// Cached node, rendering it on first use
    fn node(&self) -> Result<H::Node> {
        if let Some(node) = self.slot().get() {
            return Ok(node);
        }
        let node = self.render()?;
        self.slot().set(node.clone());
        Ok(node)
    }
}
