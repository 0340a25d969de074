pub mod client;
pub mod types;

pub use client::{CompletionClient, CompletionError};
pub use types::{ChatMessage, ChatRequest, ChatResponse};
