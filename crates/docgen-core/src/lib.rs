//! Core domain of DocGen: a dynamic tree-form state engine.
//!
//! A document structure (nested objects, arrays and prompt strings) produced
//! by an external process is turned into an editable, path-addressed input
//! tree. Array items can be added and removed while a template snapshot of the
//! first structure keeps new items correctly shaped.

pub mod config;
pub mod conversation;
pub mod document;
pub mod error;
pub mod form;
pub mod session;

// Re-export common types
pub use config::DocgenConfig;
pub use document::{DocumentNode, NodePath, Segment, TemplateStore};
pub use error::{DocgenError, Result};
pub use form::{InputTree, RenderNode};
pub use session::DocumentSession;
