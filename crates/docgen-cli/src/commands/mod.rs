pub mod chat;
pub mod display;
pub mod structure;
