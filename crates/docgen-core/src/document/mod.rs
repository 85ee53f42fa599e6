//! Document structure domain module.
//!
//! # Module Structure
//!
//! - `path`: Path addressing (`NodePath`, `Segment`, `join`, `split`)
//! - `node`: The document structure tree (`DocumentNode`)
//! - `template`: First-seen structure snapshot (`TemplateStore`)
//! - `editor`: Copy-producing array item mutations (`add_item`, `delete_item`)

pub mod editor;
mod node;
pub mod path;
mod template;

// Re-export public API
pub use editor::{add_item, can_add_item, delete_item};
pub use node::DocumentNode;
pub use path::{NodePath, Segment};
pub use template::TemplateStore;
