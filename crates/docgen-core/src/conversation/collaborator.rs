//! Interfaces of the external collaborators driven by the conversation.
//!
//! Implementations live outside the core (see `docgen-infrastructure`); the
//! core only relies on the shapes defined here.

use crate::document::DocumentNode;
use crate::error::Result;
use crate::form::InputTree;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file handed to the session by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Unique identifier for the uploaded file
    pub id: String,
    /// Original filename
    pub name: String,
    /// Path to the stored file
    pub path: PathBuf,
    /// MIME type of the file
    pub mime_type: String,
    /// File size in bytes
    pub size: u64,
    /// Timestamp when the file was uploaded (unix seconds)
    pub uploaded_at: i64,
}

/// Result of handling an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOutcome {
    /// Bot messages to append to the transcript.
    pub messages: Vec<String>,
    /// The file list the session should hold from now on.
    pub files: Vec<UploadedFile>,
}

/// Result of handling a user message.
#[derive(Debug, Clone, Default)]
pub struct MessageOutcome {
    /// Bot messages to append to the transcript.
    pub messages: Vec<String>,
    /// A new document structure, when the message produced one.
    pub structure: Option<DocumentNode>,
}

#[async_trait]
pub trait UploadCollaborator: Send + Sync {
    async fn handle_file_upload(&self, files: Vec<PathBuf>) -> Result<UploadOutcome>;
}

#[async_trait]
pub trait MessageCollaborator: Send + Sync {
    /// Understands `text` in the context of `files` and possibly produces a structure.
    async fn handle_user_message(
        &self,
        text: &str,
        files: &[UploadedFile],
    ) -> Result<MessageOutcome>;
}

#[async_trait]
pub trait GenerationCollaborator: Send + Sync {
    /// Produces the final document and returns the bot message announcing it.
    async fn generate_document(
        &self,
        structure: &DocumentNode,
        inputs: &InputTree,
    ) -> Result<String>;
}
