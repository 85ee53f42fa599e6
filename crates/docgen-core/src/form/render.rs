//! Projection of a document structure and its input tree into display nodes.
//!
//! The projection is a pure function of its inputs and is cheap enough to run
//! on every render. Node keys are dotted paths, so they stay stable as long as
//! the shape does.

use super::input_tree::InputTree;
use crate::document::{DocumentNode, NodePath, TemplateStore, can_add_item};
use serde::Serialize;

/// Turns a camelCase key into a display label: `"dueDate"` becomes `"Due Date"`.
pub fn title_case(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// Control that appends an item to the array at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddControl {
    pub path: NodePath,
    pub label: String,
    /// `false` when no item shape is known for the array.
    pub enabled: bool,
}

/// Control that removes item `index` of the array at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteControl {
    pub path: NodePath,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayItemView {
    pub index: usize,
    /// One-based heading, e.g. "Item 1".
    pub heading: String,
    pub delete: DeleteControl,
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    InputField {
        path: NodePath,
        label: String,
        value: String,
        /// The original leaf text, shown as a hint.
        placeholder: String,
    },
    GroupSection {
        path: NodePath,
        label: String,
        children: Vec<RenderNode>,
    },
    ArraySection {
        path: NodePath,
        label: String,
        items: Vec<ArrayItemView>,
        add: AddControl,
    },
}

impl RenderNode {
    pub fn path(&self) -> &NodePath {
        match self {
            RenderNode::InputField { path, .. }
            | RenderNode::GroupSection { path, .. }
            | RenderNode::ArraySection { path, .. } => path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RenderNode::InputField { label, .. }
            | RenderNode::GroupSection { label, .. }
            | RenderNode::ArraySection { label, .. } => label,
        }
    }

    /// Stable element key.
    pub fn key(&self) -> String {
        self.path().to_string()
    }
}

struct Projector<'a> {
    root: &'a DocumentNode,
    inputs: &'a InputTree,
    template: Option<&'a TemplateStore>,
}

impl Projector<'_> {
    fn entries(&self, node: &DocumentNode, path: &NodePath) -> Vec<RenderNode> {
        match node {
            DocumentNode::Group(fields) => fields
                .iter()
                .map(|(key, value)| self.node(value, path.child_key(key), title_case(key)))
                .collect(),
            other => vec![self.node(other, path.clone(), String::new())],
        }
    }

    fn node(&self, node: &DocumentNode, path: NodePath, label: String) -> RenderNode {
        match node {
            DocumentNode::Leaf(prompt) => RenderNode::InputField {
                value: self.inputs.get(&path).to_string(),
                placeholder: prompt.clone(),
                path,
                label,
            },
            DocumentNode::Group(_) => RenderNode::GroupSection {
                children: self.entries(node, &path),
                path,
                label,
            },
            DocumentNode::Items(items) => {
                let views = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| self.item(item, &path, index))
                    .collect();
                let enabled = match self.template {
                    Some(template) => can_add_item(self.root, &path, template),
                    None => !items.is_empty(),
                };
                RenderNode::ArraySection {
                    add: AddControl {
                        path: path.clone(),
                        label: format!("Add {label}"),
                        enabled,
                    },
                    items: views,
                    path,
                    label,
                }
            }
        }
    }

    fn item(&self, item: &DocumentNode, array_path: &NodePath, index: usize) -> ArrayItemView {
        let heading = format!("Item {}", index + 1);
        let item_path = array_path.child_index(index);
        let children = match item {
            DocumentNode::Group(_) => self.entries(item, &item_path),
            other => vec![self.node(other, item_path, heading.clone())],
        };
        ArrayItemView {
            index,
            heading,
            delete: DeleteControl {
                path: array_path.clone(),
                index,
            },
            children,
        }
    }
}

/// Projects `structure` and `inputs` into display nodes.
///
/// Add controls are enabled only for non-empty arrays; use
/// [`project_with_template`] to also consider the template fallback.
pub fn project(structure: &DocumentNode, inputs: &InputTree) -> Vec<RenderNode> {
    project_with_template(structure, inputs, None)
}

pub fn project_with_template(
    structure: &DocumentNode,
    inputs: &InputTree,
    template: Option<&TemplateStore>,
) -> Vec<RenderNode> {
    let projector = Projector {
        root: structure,
        inputs,
        template,
    };
    projector.entries(structure, &NodePath::root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structure(value: serde_json::Value) -> DocumentNode {
        DocumentNode::parse_structure(value).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("dueDate"), "Due Date");
        assert_eq!(title_case("clientName"), "Client Name");
        assert_eq!(title_case("items"), "Items");
        assert_eq!(title_case("URL"), "U R L");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_input_field_uses_value_and_placeholder() {
        let s = structure(json!({ "clientName": "Enter name" }));
        let inputs = InputTree::derive(&s).set(&NodePath::parse("clientName"), "Acme");

        let nodes = project(&s, &inputs);
        assert_eq!(
            nodes,
            vec![RenderNode::InputField {
                path: NodePath::parse("clientName"),
                label: "Client Name".to_string(),
                value: "Acme".to_string(),
                placeholder: "Enter name".to_string(),
            }]
        );
        assert_eq!(nodes[0].key(), "clientName");
    }

    #[test]
    fn test_group_section_nests_children() {
        let s = structure(json!({ "billingInfo": { "dueDate": "When?" } }));
        let nodes = project(&s, &InputTree::derive(&s));

        let RenderNode::GroupSection { label, children, .. } = &nodes[0] else {
            panic!("expected group section");
        };
        assert_eq!(label, "Billing Info");
        assert_eq!(children[0].key(), "billingInfo.dueDate");
        assert_eq!(children[0].label(), "Due Date");
    }

    #[test]
    fn test_array_section_controls() {
        let s = structure(json!({ "lineItems": [{ "desc": "x" }, { "desc": "y" }] }));
        let nodes = project(&s, &InputTree::derive(&s));

        let RenderNode::ArraySection { items, add, .. } = &nodes[0] else {
            panic!("expected array section");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].heading, "Item 2");
        assert_eq!(
            items[1].delete,
            DeleteControl {
                path: NodePath::parse("lineItems"),
                index: 1
            }
        );
        assert_eq!(items[1].children[0].key(), "lineItems.1.desc");
        assert_eq!(add.label, "Add Line Items");
        assert!(add.enabled);
    }

    #[test]
    fn test_empty_array_add_control_follows_template() {
        let s = structure(json!({ "items": [] }));
        let inputs = InputTree::derive(&s);

        let RenderNode::ArraySection { add, .. } = &project(&s, &inputs)[0] else {
            panic!("expected array section");
        };
        assert!(!add.enabled);

        let mut template = TemplateStore::new();
        template.capture(&structure(json!({ "items": [{ "desc": "x" }] })));
        let RenderNode::ArraySection { add, .. } =
            &project_with_template(&s, &inputs, Some(&template))[0]
        else {
            panic!("expected array section");
        };
        assert!(add.enabled);
    }

    #[test]
    fn test_string_array_items_render_as_inputs() {
        let s = structure(json!({ "tags": ["first tag"] }));
        let inputs = InputTree::derive(&s).set(&NodePath::parse("tags.0"), "urgent");
        let RenderNode::ArraySection { items, .. } = &project(&s, &inputs)[0] else {
            panic!("expected array section");
        };
        assert_eq!(
            items[0].children,
            vec![RenderNode::InputField {
                path: NodePath::parse("tags.0"),
                label: "Item 1".to_string(),
                value: "urgent".to_string(),
                placeholder: "first tag".to_string(),
            }]
        );
    }

    #[test]
    fn test_projection_does_not_touch_inputs() {
        let s = structure(json!({ "a": "b" }));
        let inputs = InputTree::derive(&s);
        let before = inputs.clone();
        let _ = project(&s, &inputs);
        assert_eq!(inputs, before);
    }
}
