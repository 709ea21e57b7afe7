use std::time::Duration;

use loglens_core::config::OllamaConfig;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::OllamaError;
use crate::error::Result;

const CHAT_PATH: &str = "/api/chat";

/// Non-streaming client for `POST /api/chat`.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: reqwest::Client,
    chat_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OllamaClient {
    pub fn from_config(config: &OllamaConfig) -> Result<Self> {
        Self::try_new(&config.base_url, &config.model, config.request_timeout)
    }

    /// Rejects an empty base URL or model before any request is made.
    pub fn try_new(base_url: &str, model: &str, request_timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(OllamaError::InvalidConfig(
                "base URL cannot be empty".to_string(),
            ));
        }
        let model = model.trim();
        if model.is_empty() {
            return Err(OllamaError::InvalidConfig(
                "model name cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            chat_url: format!("{base_url}{CHAT_PATH}"),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Sends `prompt` as a single user message and returns the assistant's
    /// reply content.
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        debug!(
            url = %self.chat_url,
            model = %self.model,
            prompt_bytes = prompt.len(),
            "sending chat request"
        );
        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OllamaError::UnexpectedStatus { status, body });
        }

        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(parsed) => Ok(parsed.message.content),
            Err(err) => {
                debug!("failed to decode chat response: {err}");
                Err(OllamaError::MalformedResponse { body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_slash_is_ignored() {
        let client = OllamaClient::try_new("http://localhost:11434/", "llama3", Duration::from_secs(1))
            .expect("valid client");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model(), "llama3");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = OllamaClient::try_new("  ", "llama3", Duration::from_secs(1))
            .expect_err("empty url should fail");
        assert_matches!(err, OllamaError::InvalidConfig(_));
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = OllamaClient::try_new("http://localhost:11434", "", Duration::from_secs(1))
            .expect_err("empty model should fail");
        assert_matches!(err, OllamaError::InvalidConfig(_));
    }

    #[test]
    fn request_body_matches_chat_api() {
        let request = ChatRequest {
            model: "llama3",
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize request"),
            serde_json::json!({
                "model": "llama3",
                "messages": [{ "role": "user", "content": "hello" }],
                "stream": false,
            })
        );
    }
}
