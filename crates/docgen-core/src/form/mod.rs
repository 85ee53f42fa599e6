//! Form state: user inputs and their display projection.
//!
//! - `input_tree`: Path-addressed user values (`InputTree`)
//! - `render`: Display projection (`project`, `RenderNode`)

mod input_tree;
pub mod render;

pub use input_tree::{InputNode, InputTree};
pub use render::{
    AddControl, ArrayItemView, DeleteControl, RenderNode, project, project_with_template,
    title_case,
};
