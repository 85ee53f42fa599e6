//! Message collaborator that reads the document structure from an uploaded
//! JSON file instead of asking a model for one.

use async_trait::async_trait;
use docgen_core::conversation::{MessageCollaborator, MessageOutcome, UploadedFile};
use docgen_core::{DocgenError, DocumentNode, Result};
use tokio::fs;

pub const NO_JSON_MESSAGE: &str = "Please upload a JSON document structure file first.";

fn is_json(file: &UploadedFile) -> bool {
    file.mime_type == "application/json"
        || file
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Answers every message with the structure found in the most recently
/// uploaded `.json` file.
#[derive(Debug, Default, Clone)]
pub struct JsonStructureResponder;

impl JsonStructureResponder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageCollaborator for JsonStructureResponder {
    async fn handle_user_message(
        &self,
        text: &str,
        files: &[UploadedFile],
    ) -> Result<MessageOutcome> {
        let Some(file) = files.iter().rev().find(|f| is_json(f)) else {
            tracing::debug!(
                target: "docgen::responder",
                "No JSON file among {} upload(s)",
                files.len()
            );
            return Ok(MessageOutcome {
                messages: vec![NO_JSON_MESSAGE.to_string()],
                structure: None,
            });
        };

        tracing::info!(
            target: "docgen::responder",
            file = %file.name,
            message_len = text.len(),
            "Reading document structure"
        );

        let content = fs::read_to_string(&file.path).await.map_err(|e| {
            DocgenError::io(format!("Failed to read '{}': {}", file.path.display(), e))
        })?;
        let structure = DocumentNode::parse_structure_str(&content)
            .map_err(|e| DocgenError::invalid_structure(format!("{}: {}", file.name, e)))?;

        Ok(MessageOutcome {
            messages: vec![format!(
                "Here is the document structure from {}. Fill in the form to continue.",
                file.name
            )],
            structure: Some(structure),
        })
    }
}
