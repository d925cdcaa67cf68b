//! XML output.
//!
//! # Data Flow
//! ```text
//! Entity / unrouted path
//!     → render.rs (fragment, escaped)
//!     → envelope (declaration + namespaced root)
//!     → response body
//! ```

pub mod escape;
pub mod render;

pub use escape::escape;
pub use render::{render, render_invalid, render_resource};

pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

pub const NAMESPACE: &str = "http://verthandi.org/2014/verthandi";

/// Wrap a fragment in the response document.
pub fn envelope(fragment: &str) -> String {
    format!("{XML_DECLARATION}<verthandi xmlns='{NAMESPACE}'>{fragment}</verthandi>")
}
