//! Structure mutations: appending and removing array items.
//!
//! Both operations deep-copy the structure before touching it, so earlier
//! versions stay valid independent snapshots.

use super::node::DocumentNode;
use super::path::NodePath;
use super::template::TemplateStore;
use crate::error::{DocgenError, Result};

fn resolve_items<'a>(
    structure: &'a DocumentNode,
    array_path: &NodePath,
) -> Result<&'a Vec<DocumentNode>> {
    structure
        .get(array_path)
        .ok_or_else(|| DocgenError::path_not_found(array_path))?
        .as_items()
        .ok_or_else(|| DocgenError::path_not_array(array_path))
}

fn resolve_items_mut<'a>(
    structure: &'a mut DocumentNode,
    array_path: &NodePath,
) -> Result<&'a mut Vec<DocumentNode>> {
    match structure.get_mut(array_path) {
        Some(DocumentNode::Items(items)) => Ok(items),
        Some(_) => Err(DocgenError::path_not_array(array_path)),
        None => Err(DocgenError::path_not_found(array_path)),
    }
}

/// Shape of the next item for the array at `array_path`.
///
/// The live array's first item wins; the template is consulted only when the
/// live array is empty.
fn next_item_shape(
    structure: &DocumentNode,
    array_path: &NodePath,
    template: &TemplateStore,
) -> Result<Option<DocumentNode>> {
    let items = resolve_items(structure, array_path)?;
    Ok(match items.first() {
        Some(first) => Some(first.blank_shape()),
        None => template.item_shape(array_path),
    })
}

/// Returns a copy of `structure` with one blank item appended to the array at `array_path`.
///
/// # Errors
///
/// - `PathNotFound` / `PathNotArray` when `array_path` does not resolve to an array
/// - `NoKnownShape` when the array is empty and the template has no item for it
pub fn add_item(
    structure: &DocumentNode,
    array_path: &NodePath,
    template: &TemplateStore,
) -> Result<DocumentNode> {
    let item = next_item_shape(structure, array_path, template)?
        .ok_or_else(|| DocgenError::no_known_shape(array_path))?;

    let mut updated = structure.clone();
    let items = resolve_items_mut(&mut updated, array_path)?;
    items.push(item);

    tracing::debug!(
        target: "docgen::editor",
        path = %array_path,
        len = items.len(),
        "Appended array item"
    );
    Ok(updated)
}

/// Returns a copy of `structure` without the item at `index` of the array at `array_path`.
///
/// An out-of-bounds index removes nothing.
pub fn delete_item(
    structure: &DocumentNode,
    array_path: &NodePath,
    index: usize,
) -> Result<DocumentNode> {
    let mut updated = structure.clone();
    let items = resolve_items_mut(&mut updated, array_path)?;

    if index < items.len() {
        items.remove(index);
        tracing::debug!(
            target: "docgen::editor",
            path = %array_path,
            index,
            "Removed array item"
        );
    } else {
        tracing::debug!(
            target: "docgen::editor",
            path = %array_path,
            index,
            len = items.len(),
            "Index out of bounds, nothing removed"
        );
    }
    Ok(updated)
}

/// Whether [`add_item`] would succeed for `array_path`.
pub fn can_add_item(
    structure: &DocumentNode,
    array_path: &NodePath,
    template: &TemplateStore,
) -> bool {
    matches!(next_item_shape(structure, array_path, template), Ok(Some(_)))
}
