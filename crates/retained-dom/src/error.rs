//! Error types for host operations

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while building or mounting nodes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// A host primitive failed (the browser threw, usually)
    #[error("host call `{op}` failed: {message}")]
    Host {
        /// Name of the primitive that failed
        op: &'static str,
        /// Message reported by the host
        message: String,
    },

    /// No global `window` (not running in a browser)
    #[error("no window available")]
    NoWindow,

    /// The window has no document
    #[error("no document available")]
    NoDocument,

    /// The document has no body
    #[error("document has no body")]
    NoBody,

    /// The primitive does not apply to this kind of node
    #[error("`{0}` is not supported on this node")]
    UnsupportedNode(&'static str),
}

impl DomError {
    pub(crate) fn js(op: &'static str) -> impl FnOnce(JsValue) -> DomError {
        move |value| DomError::Host {
            op,
            message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        }
    }
}

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, DomError>;
