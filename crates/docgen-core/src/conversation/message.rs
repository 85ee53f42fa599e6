//! Conversation message types.

use serde::{Deserialize, Serialize};

/// A single message in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The content of the message.
    pub text: String,
    /// Whether the message was produced by the bot rather than the user.
    pub from_bot: bool,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    fn new(text: impl Into<String>, from_bot: bool) -> Self {
        Self {
            text: text.into(),
            from_bot,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Display prefix for the sender.
    pub fn sender_label(&self) -> &'static str {
        if self.from_bot { "Bot: " } else { "User: " }
    }
}

/// Append-only, ordered message history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript seeded with bot messages.
    pub fn with_greeting<I, S>(greeting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: greeting.into_iter().map(ConversationMessage::bot).collect(),
        }
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.push(ConversationMessage::bot(text));
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(ConversationMessage::user(text));
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }
}
