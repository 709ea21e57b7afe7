//! Client for the chat endpoint of a local Ollama server.
//!
//! The prompt is the only payload; the reply text is returned verbatim.

mod client;
mod error;

pub use client::OllamaClient;
pub use error::OllamaError;
pub use error::Result;
