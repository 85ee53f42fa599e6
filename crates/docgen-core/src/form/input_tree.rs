//! User-entered values, kept shape-parallel to the document structure.

use crate::document::{DocumentNode, NodePath, Segment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of the input tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputNode {
    Value(String),
    Items(Vec<InputNode>),
    Group(IndexMap<String, InputNode>),
}

impl InputNode {
    fn empty_group() -> Self {
        InputNode::Group(IndexMap::new())
    }

    fn child(&self, segment: &Segment) -> Option<&InputNode> {
        match self {
            InputNode::Value(_) => None,
            InputNode::Items(items) => items.get(segment.as_index()?),
            InputNode::Group(fields) => fields.get(&segment.as_key()),
        }
    }

    fn derive(structure: &DocumentNode, previous: Option<&InputNode>) -> InputNode {
        match structure {
            DocumentNode::Leaf(_) => match previous {
                Some(InputNode::Value(value)) => InputNode::Value(value.clone()),
                _ => InputNode::Value(String::new()),
            },
            DocumentNode::Items(items) => InputNode::Items(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let prev = previous.and_then(|p| p.child(&Segment::Index(index)));
                        InputNode::derive(item, prev)
                    })
                    .collect(),
            ),
            DocumentNode::Group(fields) => InputNode::Group(
                fields
                    .iter()
                    .map(|(key, value)| {
                        let prev = previous.and_then(|p| p.child(&Segment::Key(key.clone())));
                        (key.clone(), InputNode::derive(value, prev))
                    })
                    .collect(),
            ),
        }
    }

    /// Writes `value` at the end of `segments`, creating containers on the way.
    ///
    /// Returns `false` when the path cannot be represented (a key under an array).
    fn write(&mut self, segments: &[Segment], value: String) -> bool {
        let Some((head, rest)) = segments.split_first() else {
            *self = InputNode::Value(value);
            return true;
        };

        if matches!(self, InputNode::Value(_)) {
            *self = InputNode::empty_group();
        }

        let slot = match self {
            InputNode::Value(_) => return false,
            InputNode::Group(fields) => fields
                .entry(head.as_key())
                .or_insert_with(InputNode::empty_group),
            InputNode::Items(items) => {
                let Some(index) = head.as_index() else {
                    return false;
                };
                if index >= items.len() {
                    items.resize_with(index + 1, InputNode::empty_group);
                }
                &mut items[index]
            }
        };
        slot.write(rest, value)
    }

    fn collect_leaves(&self, path: &NodePath, out: &mut Vec<(NodePath, String)>) {
        match self {
            InputNode::Value(value) => out.push((path.clone(), value.clone())),
            InputNode::Items(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_leaves(&path.child_index(index), out);
                }
            }
            InputNode::Group(fields) => {
                for (key, value) in fields {
                    value.collect_leaves(&path.child_key(key), out);
                }
            }
        }
    }
}

/// Mapping from path to user-entered value.
///
/// Mutations go through [`InputTree::set`], which returns a new tree and
/// leaves the receiver untouched, so callers can compare versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputTree {
    root: InputNode,
}

impl Default for InputTree {
    fn default() -> Self {
        Self {
            root: InputNode::empty_group(),
        }
    }
}

impl InputTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives an input tree with the shape of `structure` and every value empty.
    ///
    /// This is a full re-derivation; nothing from a previous tree survives.
    pub fn derive(structure: &DocumentNode) -> Self {
        Self {
            root: InputNode::derive(structure, None),
        }
    }

    /// Like [`InputTree::derive`], but keeps values found at the same path in `previous`.
    pub fn derive_preserving(structure: &DocumentNode, previous: &InputTree) -> Self {
        Self {
            root: InputNode::derive(structure, Some(&previous.root)),
        }
    }

    /// Value at `path`, or an empty string when the path is missing or not a leaf.
    pub fn get(&self, path: &NodePath) -> &str {
        let node = path
            .segments()
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment));
        match node {
            Some(InputNode::Value(value)) => value,
            _ => "",
        }
    }

    /// Returns a copy of this tree with `value` stored at `path`.
    ///
    /// Missing intermediate containers are created as empty maps. A path that
    /// cannot be represented leaves the copy unchanged. Writing the root path
    /// is ignored.
    pub fn set(&self, path: &NodePath, value: impl Into<String>) -> Self {
        let mut updated = self.clone();
        if path.is_root() {
            tracing::warn!(target: "docgen::inputs", "Ignoring write to the root path");
            return updated;
        }
        if !updated.root.write(path.segments(), value.into()) {
            tracing::warn!(
                target: "docgen::inputs",
                path = %path,
                "Path cannot be represented in the input tree, write ignored"
            );
            return self.clone();
        }
        updated
    }

    pub fn root(&self) -> &InputNode {
        &self.root
    }

    /// All leaf values with their paths, in tree order.
    pub fn leaves(&self) -> Vec<(NodePath, String)> {
        let mut out = Vec::new();
        self.root.collect_leaves(&NodePath::root(), &mut out);
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.root).unwrap_or(serde_json::Value::Null)
    }
}
