use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";

/// Shown for any failure the server did not explain itself.
pub const FALLBACK_NOTICE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("server rejected message")]
    Api { message: Option<String> },
}

impl ChatError {
    /// The user-facing error bubble text: the server-supplied message when
    /// there is one, the fixed fallback otherwise.
    pub fn user_notice(&self) -> String {
        match self {
            ChatError::Api {
                message: Some(message),
            } => message.clone(),
            _ => FALLBACK_NOTICE.to_string(),
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Seam between the send state machine and the network, so the controller
/// is testable with a scripted backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> ChatResult<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    timestamp: Option<String>,
}

/// Maps a response body to the reply text or the error taxonomy.
fn interpret_response(body: &str) -> ChatResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    if parsed.success {
        match parsed.response {
            Some(reply) => Ok(reply),
            None => Err(ChatError::Api { message: None }),
        }
    } else {
        Err(ChatError::Api {
            message: parsed.error,
        })
    }
}

pub struct HttpChatBackend {
    client: Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint from `PARAKEET_ENDPOINT`, falling back to the local default.
    pub fn from_env() -> Self {
        let endpoint = env::var("PARAKEET_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        Self::new(endpoint)
    }

    /// Base URL of the service, with the chat path stripped.
    fn base_url(&self) -> &str {
        self.endpoint
            .strip_suffix("/api/chat")
            .unwrap_or(&self.endpoint)
    }

    /// One best-effort probe of the service's health endpoint. Any failure
    /// just means "offline".
    pub async fn probe_health(&self) -> bool {
        let url = format!("{}/health", self.base_url());
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> ChatResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await?;
        let body = response.text().await?;
        interpret_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interprets_success() {
        let reply = interpret_response(r#"{"success":true,"response":"hey","timestamp":"2024-03-01T15:04:05"}"#)
            .expect("should succeed");
        assert_eq!(reply, "hey");
    }

    #[test]
    fn interprets_server_error_with_message() {
        let err = interpret_response(r#"{"success":false,"error":"Empty message"}"#).unwrap_err();
        assert_eq!(err.user_notice(), "Empty message");
    }

    #[test]
    fn interprets_server_error_without_message() {
        let err = interpret_response(r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.user_notice(), FALLBACK_NOTICE);
    }

    #[test]
    fn interprets_malformed_body() {
        let err = interpret_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, ChatError::Malformed(_)));
        assert_eq!(err.user_notice(), FALLBACK_NOTICE);
    }

    #[test]
    fn success_without_reply_text_is_an_error() {
        let err = interpret_response(r#"{"success":true}"#).unwrap_err();
        assert_eq!(err.user_notice(), FALLBACK_NOTICE);
    }

    #[test]
    fn strips_chat_path_for_health_probe() {
        let backend = HttpChatBackend::new("http://localhost:5000/api/chat");
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }
}
