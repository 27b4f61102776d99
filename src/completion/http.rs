//! OpenAI-compatible chat completions client

use crate::config::CompletionConfig;
use crate::core::error::CompletionError;
use crate::core::service::{CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Serialize)]
struct ContentPart<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [ContentPart<'a>; 1],
}

impl<'a> Message<'a> {
    fn new(role: &'static str, text: &'a str) -> Self {
        Self {
            role,
            content: [ContentPart { kind: "text", text }],
        }
    }
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 2],
}

/// Completion service speaking the chat completions wire format over HTTP
#[derive(Clone)]
pub struct HttpCompletionService {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for HttpCompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionService")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpCompletionService {
    /// Create a client from configuration
    pub fn from_config(config: &CompletionConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            tracing::warn!(
                "No completion API key configured (checked inline key and ${})",
                config.api_key_env
            );
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatBody<'a> {
        ChatBody {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: [
                Message::new("system", &request.system_instructions),
                Message::new("user", &request.user_text),
            ],
        }
    }
}

/// Pull the completion text out of a chat completions reply
///
/// `content` is either a string or an array whose first part carries `text`.
pub fn reply_text(reply: &Value) -> Result<String, CompletionError> {
    let content = reply
        .pointer("/choices/0/message/content")
        .ok_or_else(|| CompletionError::MalformedResponse {
            message: "reply has no choices[0].message.content".to_string(),
        })?;

    match content {
        Value::String(text) => Ok(text.clone()),
        Value::Array(parts) => parts
            .first()
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| CompletionError::MalformedResponse {
                message: "content array has no text part".to_string(),
            }),
        other => Err(CompletionError::MalformedResponse {
            message: format!("unexpected content type: {}", other),
        }),
    }
}

#[async_trait]
impl CompletionService for HttpCompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let mut call = self.client.post(&self.endpoint).json(&self.body(&request));
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CompletionError::Auth {
                message: format!("completion endpoint returned {}", status),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::Transport {
                message: format!("completion endpoint returned {}: {}", status, detail),
            });
        }

        let reply: Value = response.json().await?;
        let text = reply_text(&reply)?;
        tracing::debug!(model = %self.model, chars = text.len(), "Completion received");
        Ok(text)
    }
}
