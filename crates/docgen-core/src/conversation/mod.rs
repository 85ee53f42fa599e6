//! Conversation domain module.
//!
//! - `message`: Transcript types (`ConversationMessage`, `Transcript`)
//! - `collaborator`: External collaborator traits and their payloads

mod collaborator;
mod message;

pub use collaborator::{
    GenerationCollaborator, MessageCollaborator, MessageOutcome, UploadCollaborator,
    UploadOutcome, UploadedFile,
};
pub use message::{ConversationMessage, Transcript};
