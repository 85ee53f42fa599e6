//! Application layer for DocGen.
//!
//! This crate provides the use case that coordinates the conversation
//! transcript, the document session engine and the external collaborators.

pub mod conversation_controller;

pub use conversation_controller::{Collaborators, ConversationController};
