//! OpenAI-compatible chat-completions client for a locally hosted model
//! server (LM Studio and similar).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{LlmError, TextGenerator};
use crate::config::LlmConfig;

const SYSTEM_PROMPT: &str = "You are an energy expert assistant.";

/// HTTP client for `{api_base}/models` and `{api_base}/chat/completions`.
#[derive(Clone)]
pub struct LmStudioClient {
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    probe_timeout: Duration,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LmStudioClient {
    /// Builds a client from configuration. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            client,
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for LmStudioClient {
    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.api_base);
        match self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                debug!(url = %url, "completion API reachable");
                true
            }
            Ok(resp) => {
                warn!(url = %url, status = %resp.status(), "completion API probe failed");
                false
            }
            Err(e) => {
                warn!(url = %url, error = %e, "completion API unreachable");
                false
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config_for(url: &str) -> LlmConfig {
        LlmConfig {
            api_base: format!("{url}/v1"),
            timeout_secs: 5,
            probe_timeout_secs: 2,
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn probe_succeeds_on_200() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"id":"qwen3-4b"}]}"#)
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        assert!(client.is_available().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn probe_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models")
            .with_status(503)
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn probe_fails_when_unreachable() {
        let cfg = LlmConfig {
            api_base: "http://127.0.0.1:9/v1".to_string(),
            probe_timeout_secs: 1,
            ..LlmConfig::default()
        };
        let client = LmStudioClient::new(&cfg).unwrap();
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn generate_returns_trimmed_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "model": "local-model",
                "max_tokens": 256,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{"message": {"role": "assistant", "content": "  Go solar.\n"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        let text = client.generate("prompt").await.unwrap();
        assert_eq!(text, "Go solar.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_surfaces_bad_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn generate_rejects_malformed_payload() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn generate_rejects_empty_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = LmStudioClient::new(&config_for(&server.url())).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let cfg = LlmConfig {
            api_base: "http://localhost:1234/v1/".to_string(),
            ..LlmConfig::default()
        };
        let client = LmStudioClient::new(&cfg).unwrap();
        assert_eq!(client.api_base(), "http://localhost:1234/v1");
    }
}
