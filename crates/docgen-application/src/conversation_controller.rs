//! Conversation controller implementation.
//!
//! This module provides the `ConversationController` which owns the chat
//! transcript and the document session, and coordinates them with the
//! external upload, message and generation collaborators.

use docgen_core::conversation::{
    ConversationMessage, GenerationCollaborator, MessageCollaborator, Transcript,
    UploadCollaborator, UploadedFile,
};
use docgen_core::{
    DocgenConfig, DocgenError, DocumentNode, DocumentSession, InputTree, NodePath, RenderNode,
    Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

const NO_STRUCTURE_MESSAGE: &str =
    "There is no document structure yet. Upload a file and describe the document first.";

/// The external collaborators a controller delegates to.
#[derive(Clone)]
pub struct Collaborators {
    pub upload: Arc<dyn UploadCollaborator>,
    pub message: Arc<dyn MessageCollaborator>,
    pub generation: Arc<dyn GenerationCollaborator>,
}

struct ControllerState {
    transcript: Transcript,
    files: Vec<UploadedFile>,
    session: DocumentSession,
}

/// Marks a collaborator request as in flight; cleared on drop.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: "docgen::conversation", "Rejecting overlapping request");
            return Err(DocgenError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Owns the chat transcript and the document session.
///
/// # Responsibilities
///
/// - Appending user and bot messages to the transcript
/// - Delegating uploads, message understanding and document generation
/// - Installing structures yielded by the message collaborator
/// - Forwarding form edits (input writes, array item add/delete) to the session
///
/// # Concurrency
///
/// State sits behind a `RwLock` that is never held across a collaborator call.
/// Only one collaborator request runs at a time; an overlapping upload,
/// submission or generation request fails with [`DocgenError::Busy`].
pub struct ConversationController {
    state: RwLock<ControllerState>,
    collaborators: Collaborators,
    greeting: Vec<String>,
    preserve_inputs: bool,
    in_flight: AtomicBool,
}

impl ConversationController {
    /// Creates a controller whose transcript opens with the configured greeting.
    pub fn new(config: &DocgenConfig, collaborators: Collaborators) -> Self {
        let preserve_inputs = config.preserve_inputs_on_reshape;
        Self {
            state: RwLock::new(ControllerState {
                transcript: Transcript::with_greeting(config.greeting.iter().cloned()),
                files: Vec::new(),
                session: Self::fresh_session(preserve_inputs),
            }),
            collaborators,
            greeting: config.greeting.clone(),
            preserve_inputs,
            in_flight: AtomicBool::new(false),
        }
    }

    fn fresh_session(preserve_inputs: bool) -> DocumentSession {
        if preserve_inputs {
            DocumentSession::preserving_inputs()
        } else {
            DocumentSession::new()
        }
    }

    pub async fn transcript(&self) -> Vec<ConversationMessage> {
        self.state.read().await.transcript.messages().to_vec()
    }

    pub async fn files(&self) -> Vec<UploadedFile> {
        self.state.read().await.files.clone()
    }

    pub async fn structure(&self) -> Option<DocumentNode> {
        self.state.read().await.session.structure().cloned()
    }

    pub async fn inputs(&self) -> InputTree {
        self.state.read().await.session.inputs().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    async fn push_bot_messages(&self, messages: Vec<String>) {
        let mut state = self.state.write().await;
        for text in messages {
            state.transcript.push_bot(text);
        }
    }

    /// Hands files to the upload collaborator and keeps the file list it returns.
    pub async fn upload_files(&self, paths: Vec<PathBuf>) -> Result<()> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        tracing::info!(target: "docgen::conversation", count = paths.len(), "Uploading files");

        match self.collaborators.upload.handle_file_upload(paths).await {
            Ok(outcome) => {
                let mut state = self.state.write().await;
                for text in outcome.messages {
                    state.transcript.push_bot(text);
                }
                state.files = outcome.files;
            }
            Err(e) => {
                tracing::warn!(target: "docgen::conversation", "Upload failed: {}", e);
                self.push_bot_messages(vec![format!(
                    "Sorry, I couldn't process those files: {e}"
                )])
                .await;
            }
        }
        Ok(())
    }

    /// Appends the user's message and lets the message collaborator answer it.
    ///
    /// Blank messages are ignored. A structure yielded by the collaborator
    /// replaces the current one and re-derives the inputs.
    pub async fn submit_user_message(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            tracing::debug!(target: "docgen::conversation", "Ignoring blank message");
            return Ok(());
        }
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let files = {
            let mut state = self.state.write().await;
            state.transcript.push_user(text);
            state.files.clone()
        };

        match self
            .collaborators
            .message
            .handle_user_message(text, &files)
            .await
        {
            Ok(outcome) => {
                let mut state = self.state.write().await;
                for message in outcome.messages {
                    state.transcript.push_bot(message);
                }
                if let Some(structure) = outcome.structure {
                    tracing::info!(
                        target: "docgen::conversation",
                        "Received new document structure"
                    );
                    state.session.apply_structure(structure);
                }
            }
            Err(e) => {
                tracing::warn!(target: "docgen::conversation", "Message handling failed: {}", e);
                self.push_bot_messages(vec![format!(
                    "Sorry, something went wrong while handling your message: {e}"
                )])
                .await;
            }
        }
        Ok(())
    }

    /// Hands the current structure and inputs to the generation collaborator.
    pub async fn request_document_generation(&self) -> Result<()> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let snapshot = {
            let state = self.state.read().await;
            state
                .session
                .structure()
                .cloned()
                .map(|structure| (structure, state.session.inputs().clone()))
        };
        let Some((structure, inputs)) = snapshot else {
            self.push_bot_messages(vec![NO_STRUCTURE_MESSAGE.to_string()])
                .await;
            return Ok(());
        };

        match self
            .collaborators
            .generation
            .generate_document(&structure, &inputs)
            .await
        {
            Ok(message) => self.push_bot_messages(vec![message]).await,
            Err(e) => {
                tracing::warn!(target: "docgen::conversation", "Document generation failed: {}", e);
                self.push_bot_messages(vec![format!(
                    "Sorry, I couldn't generate the document: {e}"
                )])
                .await;
            }
        }
        Ok(())
    }

    pub async fn edit_input(&self, path: &NodePath, value: impl Into<String>) {
        self.state.write().await.session.edit_input(path, value);
    }

    /// Appends a blank item to the array at `path`.
    ///
    /// On error the structure and inputs are unchanged.
    pub async fn add_item(&self, path: &NodePath) -> Result<()> {
        let result = self.state.write().await.session.add_item(path);
        Self::log_edit_failure("add_item", path, &result);
        result
    }

    /// Removes item `index` from the array at `path`.
    pub async fn delete_item(&self, path: &NodePath, index: usize) -> Result<()> {
        let result = self.state.write().await.session.delete_item(path, index);
        Self::log_edit_failure("delete_item", path, &result);
        result
    }

    fn log_edit_failure(operation: &str, path: &NodePath, result: &Result<()>) {
        let Err(e) = result else {
            return;
        };
        if e.is_contract_violation() {
            tracing::error!(
                target: "docgen::conversation",
                operation,
                path = %path,
                "Form and structure disagree on path: {}",
                e
            );
        } else {
            tracing::debug!(
                target: "docgen::conversation",
                operation,
                path = %path,
                "Edit rejected: {}",
                e
            );
        }
    }

    pub async fn can_add_item(&self, path: &NodePath) -> bool {
        self.state.read().await.session.can_add_item(path)
    }

    pub async fn render(&self) -> Vec<RenderNode> {
        self.state.read().await.session.render()
    }

    /// Starts over: greeting-only transcript, no files, no structure, no template.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.transcript = Transcript::with_greeting(self.greeting.iter().cloned());
        state.files.clear();
        state.session = Self::fresh_session(self.preserve_inputs);
        tracing::info!(target: "docgen::conversation", "Session reset");
    }
}
