//! Retained-tree components
//!
//! Components render a node once and keep it; a component whose state changes
//! renders again and replaces its own mounted node in place. There is no
//! diffing. The rendering environment sits behind [`Host`]:
//! [`WebHost`](web::WebHost) for the browser, [`MemoryHost`](memory::MemoryHost)
//! for headless rendering and tests.

pub mod component;
pub mod element;
pub mod error;
pub mod host;
pub mod memory;
pub mod web;

pub use component::{Component, NodeSlot};
pub use element::{el, AttrValue, Child, ElementSpec};
pub use error::{DomError, Result};
pub use host::{Event, Handler, Host};
pub use memory::{MemNode, MemoryHost};
pub use web::{WebHost, WebNode};
