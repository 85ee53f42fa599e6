//! Generation collaborator that writes the filled-in document as JSON.

use async_trait::async_trait;
use docgen_core::conversation::GenerationCollaborator;
use docgen_core::{DocgenError, DocumentNode, InputTree, NodePath, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

const DEFAULT_SLUG: &str = "document";

/// Replaces every prompt leaf of `structure` with the user's value at the same path.
pub fn filled_document(structure: &DocumentNode, inputs: &InputTree) -> Value {
    fill(structure, inputs, &NodePath::root())
}

fn fill(node: &DocumentNode, inputs: &InputTree, path: &NodePath) -> Value {
    match node {
        DocumentNode::Leaf(_) => Value::String(inputs.get(path).to_string()),
        DocumentNode::Items(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| fill(item, inputs, &path.child_index(i)))
                .collect(),
        ),
        DocumentNode::Group(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, child)| (key.clone(), fill(child, inputs, &path.child_key(key))))
                .collect::<Map<_, _>>(),
        ),
    }
}

/// File name stem from the document's `title` value, if any.
fn slug(inputs: &InputTree) -> String {
    let title = inputs.get(&NodePath::parse("title"));
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Writes generated documents to `<output_dir>/<slug>-<timestamp>-<id>.json`.
///
/// The short random id keeps documents generated within the same second apart;
/// an existing file is never overwritten.
#[derive(Debug, Clone)]
pub struct JsonDocumentExporter {
    output_dir: PathBuf,
}

impl JsonDocumentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the document and returns the file it was written to.
    pub async fn export(&self, structure: &DocumentNode, inputs: &InputTree) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            DocgenError::io(format!(
                "Failed to create output directory '{}': {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let id = uuid::Uuid::new_v4().simple().to_string();
        let path = self
            .output_dir
            .join(format!("{}-{}-{}.json", slug(inputs), timestamp, &id[..8]));
        let content = serde_json::to_string_pretty(&filled_document(structure, inputs))?;

        let write_error = |e: std::io::Error| {
            DocgenError::io(format!("Failed to write document '{}': {}", path.display(), e))
        };
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_error)?;
        file.write_all(content.as_bytes()).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        tracing::info!(target: "docgen::exporter", path = %path.display(), "Document written");
        Ok(path)
    }
}

#[async_trait]
impl GenerationCollaborator for JsonDocumentExporter {
    async fn generate_document(
        &self,
        structure: &DocumentNode,
        inputs: &InputTree,
    ) -> Result<String> {
        let path = self.export(structure, inputs).await?;
        Ok(format!("Your document is ready: {}", path.display()))
    }
}
