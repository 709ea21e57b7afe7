use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OllamaError>;

#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("invalid Ollama configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Ollama returned HTTP {status} with body: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("unexpected Ollama response format: {body}")]
    MalformedResponse { body: String },
}
