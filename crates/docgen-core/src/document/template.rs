//! Template snapshot of the first structure seen in a session.

use super::node::DocumentNode;
use super::path::NodePath;

/// Holds an immutable copy of the first document structure of a session.
///
/// The snapshot is the fallback shape source when a live array has been
/// emptied and no longer has an item to clone from. Once captured it is never
/// overwritten; only [`TemplateStore::reset`] clears it.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    snapshot: Option<DocumentNode>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a deep copy of `structure` unless a snapshot already exists.
    ///
    /// Returns `true` when this call captured the snapshot.
    pub fn capture(&mut self, structure: &DocumentNode) -> bool {
        if self.snapshot.is_some() {
            return false;
        }
        self.snapshot = Some(structure.clone());
        tracing::debug!(target: "docgen::template", "Captured template snapshot");
        true
    }

    pub fn is_captured(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&DocumentNode> {
        self.snapshot.as_ref()
    }

    /// The node found at `path` in the original structure.
    pub fn shape_of(&self, path: &NodePath) -> Option<&DocumentNode> {
        self.snapshot.as_ref()?.get(path)
    }

    /// Blank shape of the first item of the array at `path` in the original structure.
    pub fn item_shape(&self, path: &NodePath) -> Option<DocumentNode> {
        let first = self.shape_of(path)?.as_items()?.first()?;
        Some(first.blank_shape())
    }

    pub fn reset(&mut self) {
        self.snapshot = None;
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
    fn test_capture_only_honours_first_structure() {
        let mut store = TemplateStore::new();
        assert!(!store.is_captured());

        let first = structure(json!({ "items": [{ "desc": "x" }] }));
        let second = structure(json!({ "other": "y" }));

        assert!(store.capture(&first));
        assert!(!store.capture(&second));

        assert_eq!(store.snapshot(), Some(&first));
        assert!(store.shape_of(&NodePath::parse("other")).is_none());
        assert!(store.shape_of(&NodePath::parse("items.0.desc")).is_some());
    }

    #[test]
    fn test_item_shape_is_blank() {
        let mut store = TemplateStore::new();
        store.capture(&structure(json!({
            "items": [{ "desc": "x", "notes": ["n"] }]
        })));

        let shape = store.item_shape(&NodePath::parse("items")).unwrap();
        assert_eq!(shape.to_json(), json!({ "desc": "", "notes": [] }));
    }

    #[test]
    fn test_item_shape_missing_for_empty_original_array() {
        let mut store = TemplateStore::new();
        store.capture(&structure(json!({ "items": [] })));
        assert!(store.item_shape(&NodePath::parse("items")).is_none());
        assert!(store.item_shape(&NodePath::parse("missing")).is_none());
    }

    #[test]
    fn test_reset_allows_new_capture() {
        let mut store = TemplateStore::new();
        store.capture(&structure(json!({ "a": "1" })));
        store.reset();
        assert!(!store.is_captured());
        assert!(store.capture(&structure(json!({ "b": "2" }))));
        assert!(store.shape_of(&NodePath::parse("b")).is_some());
    }
}
