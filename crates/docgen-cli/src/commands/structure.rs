//! One-shot commands over structure files.

use anyhow::{Context, Result};
use docgen_core::document::{self, DocumentNode, NodePath, TemplateStore};
use docgen_core::form::{self, InputTree};
use std::path::Path;

use super::display;

pub fn load_structure(path: &Path) -> Result<DocumentNode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read structure '{}'", path.display()))?;
    DocumentNode::parse_structure_str(&text)
        .with_context(|| format!("Invalid structure in '{}'", path.display()))
}

fn load_inputs(path: &Path) -> Result<InputTree> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inputs '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid inputs in '{}'", path.display()))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render(structure: &Path, inputs: Option<&Path>, json: bool) -> Result<()> {
    let structure = load_structure(structure)?;
    let inputs = match inputs {
        Some(path) => load_inputs(path)?,
        None => InputTree::derive(&structure),
    };

    let nodes = form::project(&structure, &inputs);
    if json {
        print_json(&serde_json::to_value(&nodes)?)
    } else {
        display::print_form(&nodes);
        Ok(())
    }
}

pub fn derive(structure: &Path) -> Result<()> {
    let structure = load_structure(structure)?;
    print_json(&InputTree::derive(&structure).to_json())
}

pub fn add_item(structure: &Path, path: &str, template: Option<&Path>) -> Result<()> {
    let structure = load_structure(structure)?;
    let mut store = TemplateStore::new();
    if let Some(template) = template {
        store.capture(&load_structure(template)?);
    }

    let updated = document::add_item(&structure, &NodePath::parse(path), &store)?;
    print_json(&updated.to_json())
}

pub fn delete_item(structure: &Path, path: &str, index: usize) -> Result<()> {
    let structure = load_structure(structure)?;
    let updated = document::delete_item(&structure, &NodePath::parse(path), index)?;
    print_json(&updated.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_structure_rejects_non_object_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "[\"a\"]").unwrap();

        let err = load_structure(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid structure"));
    }

    #[test]
    fn test_load_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inputs.json");
        std::fs::write(&path, r#"{"title": "Plan", "tags": ["a", "b"]}"#).unwrap();

        let inputs = load_inputs(&path).unwrap();
        assert_eq!(inputs.get(&NodePath::parse("title")), "Plan");
        assert_eq!(inputs.get(&NodePath::parse("tags.1")), "b");
    }
}
