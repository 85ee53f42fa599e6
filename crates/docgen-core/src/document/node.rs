//! Document structure model.
//!
//! A document structure is the nested schema describing the fields a generated
//! document needs. Leaves hold prompt text shown as input placeholders.

use super::path::{NodePath, Segment};
use crate::error::{DocgenError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of a document structure.
///
/// Serialized untagged, so a structure reads and writes as plain JSON made of
/// strings, arrays and objects. Any other JSON value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentNode {
    /// Prompt text for a single input.
    Leaf(String),
    /// Ordered sequence of items.
    Items(Vec<DocumentNode>),
    /// Named fields, in the order they were produced.
    Group(IndexMap<String, DocumentNode>),
}

impl DocumentNode {
    /// Parses a session structure from a JSON value. The root must be an object.
    pub fn parse_structure(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(DocgenError::invalid_structure(
                "document structure root must be an object",
            ));
        }
        serde_json::from_value(value).map_err(|e| DocgenError::invalid_structure(e.to_string()))
    }

    /// Parses a session structure from JSON text.
    pub fn parse_structure_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::parse_structure(value)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DocumentNode::Leaf(_))
    }

    pub fn as_items(&self) -> Option<&Vec<DocumentNode>> {
        match self {
            DocumentNode::Items(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, DocumentNode>> {
        match self {
            DocumentNode::Group(fields) => Some(fields),
            _ => None,
        }
    }

    fn child(&self, segment: &Segment) -> Option<&DocumentNode> {
        match self {
            DocumentNode::Leaf(_) => None,
            DocumentNode::Items(items) => items.get(segment.as_index()?),
            DocumentNode::Group(fields) => fields.get(&segment.as_key()),
        }
    }

    fn child_mut(&mut self, segment: &Segment) -> Option<&mut DocumentNode> {
        match self {
            DocumentNode::Leaf(_) => None,
            DocumentNode::Items(items) => items.get_mut(segment.as_index()?),
            DocumentNode::Group(fields) => fields.get_mut(&segment.as_key()),
        }
    }

    /// Walks the structure along `path`.
    pub fn get(&self, path: &NodePath) -> Option<&DocumentNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut DocumentNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child_mut(segment))
    }

    /// Structural clone with no values.
    ///
    /// Leaves become empty strings, arrays become empty, groups keep their keys
    /// and recurse.
    pub fn blank_shape(&self) -> DocumentNode {
        match self {
            DocumentNode::Leaf(_) => DocumentNode::Leaf(String::new()),
            DocumentNode::Items(_) => DocumentNode::Items(Vec::new()),
            DocumentNode::Group(fields) => DocumentNode::Group(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.blank_shape()))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DocumentNode::Leaf(text) => serde_json::Value::String(text.clone()),
            DocumentNode::Items(items) => {
                serde_json::Value::Array(items.iter().map(DocumentNode::to_json).collect())
            }
            DocumentNode::Group(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Default for DocumentNode {
    fn default() -> Self {
        DocumentNode::Group(IndexMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invoice() -> DocumentNode {
        DocumentNode::parse_structure(json!({
            "clientName": "Enter name",
            "items": [{ "desc": "x", "taxes": [{ "rate": "r" }] }],
            "meta": { "dueDate": "When is it due?" }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_keeps_field_order() {
        let structure = invoice();
        let keys: Vec<_> = structure.as_group().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["clientName", "items", "meta"]);
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let err = DocumentNode::parse_structure(json!(["a"])).unwrap_err();
        assert!(matches!(err, DocgenError::InvalidStructure(_)));
    }

    #[test]
    fn test_parse_rejects_numbers() {
        let err = DocumentNode::parse_structure(json!({ "qty": 3 })).unwrap_err();
        assert!(matches!(err, DocgenError::InvalidStructure(_)));
    }

    #[test]
    fn test_get_walks_groups_and_items() {
        let structure = invoice();
        assert_eq!(
            structure.get(&NodePath::parse("items.0.taxes.0.rate")),
            Some(&DocumentNode::Leaf("r".to_string()))
        );
        assert_eq!(structure.get(&NodePath::parse("items.1")), None);
        assert_eq!(structure.get(&NodePath::parse("clientName.x")), None);
        assert_eq!(structure.get(&NodePath::root()), Some(&structure));
    }

    #[test]
    fn test_blank_shape_resets_leaves_and_arrays() {
        let structure = invoice();
        let item = structure.get(&NodePath::parse("items.0")).unwrap();
        assert_eq!(
            item.blank_shape().to_json(),
            json!({ "desc": "", "taxes": [] })
        );
    }

    #[test]
    fn test_to_json_round_trips() {
        let value = json!({ "a": ["x", { "b": "y" }] });
        let node = DocumentNode::parse_structure(value.clone()).unwrap();
        assert_eq!(node.to_json(), value);
    }

    #[test]
    fn test_field_order_survives_parse_and_to_json() {
        let text = r#"{"title":"t","clientName":"c","amount":"a"}"#;
        let node = DocumentNode::parse_structure_str(text).unwrap();

        let keys: Vec<_> = node.as_group().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "clientName", "amount"]);
        assert_eq!(serde_json::to_string(&node.to_json()).unwrap(), text);
        assert_eq!(serde_json::to_string(&node).unwrap(), text);
    }
}
