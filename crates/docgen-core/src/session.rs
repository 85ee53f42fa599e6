//! Document session state engine.
//!
//! `DocumentSession` ties the structure, its template snapshot and the input
//! tree together and keeps them consistent: every structure change goes
//! through [`DocumentSession::apply_structure`] or one of the item
//! operations, and every such change re-derives the input tree.

use crate::document::{self, DocumentNode, NodePath, TemplateStore};
use crate::error::{DocgenError, Result};
use crate::form::{InputTree, RenderNode, project_with_template};

#[derive(Debug, Clone, Default)]
pub struct DocumentSession {
    structure: Option<DocumentNode>,
    template: TemplateStore,
    inputs: InputTree,
    preserve_inputs: bool,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that carries values over to unchanged paths on reshape.
    pub fn preserving_inputs() -> Self {
        Self {
            preserve_inputs: true,
            ..Self::default()
        }
    }

    pub fn structure(&self) -> Option<&DocumentNode> {
        self.structure.as_ref()
    }

    pub fn inputs(&self) -> &InputTree {
        &self.inputs
    }

    pub fn template(&self) -> &TemplateStore {
        &self.template
    }

    pub fn has_structure(&self) -> bool {
        self.structure.is_some()
    }

    /// Installs a structure produced by an external collaborator.
    ///
    /// The first structure of the session becomes the template snapshot.
    pub fn apply_structure(&mut self, structure: DocumentNode) {
        if self.template.capture(&structure) {
            tracing::info!(target: "docgen::session", "Template captured from first structure");
        }
        self.replace_structure(structure);
    }

    fn replace_structure(&mut self, structure: DocumentNode) {
        self.inputs = if self.preserve_inputs {
            InputTree::derive_preserving(&structure, &self.inputs)
        } else {
            InputTree::derive(&structure)
        };
        self.structure = Some(structure);
    }

    fn current(&self) -> Result<&DocumentNode> {
        self.structure
            .as_ref()
            .ok_or_else(|| DocgenError::invalid_structure("no document structure loaded"))
    }

    pub fn edit_input(&mut self, path: &NodePath, value: impl Into<String>) {
        self.inputs = self.inputs.set(path, value);
    }

    /// Appends a blank item to the array at `path`. On error nothing changes.
    pub fn add_item(&mut self, path: &NodePath) -> Result<()> {
        let updated = document::add_item(self.current()?, path, &self.template)?;
        self.replace_structure(updated);
        Ok(())
    }

    /// Removes item `index` of the array at `path`. On error nothing changes.
    pub fn delete_item(&mut self, path: &NodePath, index: usize) -> Result<()> {
        let updated = document::delete_item(self.current()?, path, index)?;
        self.replace_structure(updated);
        Ok(())
    }

    pub fn can_add_item(&self, path: &NodePath) -> bool {
        self.structure
            .as_ref()
            .is_some_and(|s| document::can_add_item(s, path, &self.template))
    }

    /// Display nodes for the current structure; empty when none is loaded.
    pub fn render(&self) -> Vec<RenderNode> {
        match &self.structure {
            Some(structure) => project_with_template(structure, &self.inputs, Some(&self.template)),
            None => Vec::new(),
        }
    }

    /// Forgets the structure, the template and all inputs.
    pub fn reset(&mut self) {
        self.structure = None;
        self.template.reset();
        self.inputs = InputTree::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structure(value: serde_json::Value) -> DocumentNode {
        DocumentNode::parse_structure(value).unwrap()
    }

    #[test]
    fn test_apply_structure_derives_inputs() {
        let mut session = DocumentSession::new();
        assert!(!session.has_structure());
        assert!(session.render().is_empty());

        session.apply_structure(structure(json!({ "clientName": "Enter name" })));
        assert!(session.template().is_captured());
        assert_eq!(session.inputs().to_json(), json!({ "clientName": "" }));
    }

    #[test]
    fn test_add_item_resets_inputs() {
        let mut session = DocumentSession::new();
        session.apply_structure(structure(json!({
            "name": "n",
            "items": [{ "desc": "x" }]
        })));
        session.edit_input(&NodePath::parse("name"), "Acme");

        session.add_item(&NodePath::parse("items")).unwrap();

        assert_eq!(session.inputs().get(&NodePath::parse("name")), "");
        assert_eq!(
            session.inputs().to_json(),
            json!({ "name": "", "items": [{ "desc": "" }, { "desc": "" }] })
        );
    }

    #[test]
    fn test_preserving_session_keeps_values() {
        let mut session = DocumentSession::preserving_inputs();
        session.apply_structure(structure(json!({
            "name": "n",
            "items": [{ "desc": "x" }]
        })));
        session.edit_input(&NodePath::parse("name"), "Acme");
        session.add_item(&NodePath::parse("items")).unwrap();
        assert_eq!(session.inputs().get(&NodePath::parse("name")), "Acme");
    }

    #[test]
    fn test_template_survives_regeneration() {
        let mut session = DocumentSession::new();
        session.apply_structure(structure(json!({ "items": [{ "desc": "x" }] })));
        session.apply_structure(structure(json!({ "items": [] })));

        assert!(session.can_add_item(&NodePath::parse("items")));
        session.add_item(&NodePath::parse("items")).unwrap();
        assert_eq!(
            session.structure().unwrap().to_json(),
            json!({ "items": [{ "desc": "" }] })
        );
    }

    #[test]
    fn test_failed_edit_leaves_state_untouched() {
        let mut session = DocumentSession::new();
        session.apply_structure(structure(json!({ "items": [], "name": "n" })));
        session.edit_input(&NodePath::parse("name"), "kept");

        let err = session.add_item(&NodePath::parse("items")).unwrap_err();
        assert!(err.is_no_known_shape());
        let err = session.delete_item(&NodePath::parse("name"), 0).unwrap_err();
        assert!(err.is_path_not_array());

        assert_eq!(session.inputs().get(&NodePath::parse("name")), "kept");
    }

    #[test]
    fn test_operations_without_structure() {
        let mut session = DocumentSession::new();
        let err = session.add_item(&NodePath::parse("items")).unwrap_err();
        assert!(matches!(err, DocgenError::InvalidStructure(_)));
        assert!(!session.can_add_item(&NodePath::parse("items")));
    }

    #[test]
    fn test_reset_clears_template() {
        let mut session = DocumentSession::new();
        session.apply_structure(structure(json!({ "a": "b" })));
        session.reset();
        assert!(!session.has_structure());
        assert!(!session.template().is_captured());
        assert_eq!(session.inputs(), &InputTree::new());
    }
}
