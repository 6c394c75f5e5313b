use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::llm::{models::ChatTurn, CompletionError, CompletionGateway};

/// Gateway over any OpenAI-compatible `/chat/completions` endpoint (Groq,
/// OpenAI). One request per turn, bounded by a per-request timeout.
pub struct OpenAiCompatProvider {
    client: Client,
    label: String,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    system_prompt: String,
}

impl OpenAiCompatProvider {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: String,
        api_base: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout_secs: u64,
        system_prompt: String,
    ) -> Self {
        Self {
            client: Client::new(),
            label,
            api_base,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
            system_prompt,
        }
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.label
    }

    async fn generate(
        &self,
        history: &[ChatTurn],
        new_message: &str,
    ) -> Result<String, CompletionError> {
        let mut messages: Vec<ChatTurn> = Vec::with_capacity(history.len() + 2);
        messages.push(ChatTurn::new("system", self.system_prompt.clone()));
        messages.extend(history.iter().cloned());
        messages.push(ChatTurn::new("user", new_message));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        debug!(provider = %self.label, turns = messages.len(), "requesting completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(provider = %self.label, %status, %detail, "completion request rejected");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Auth,
                StatusCode::TOO_MANY_REQUESTS => CompletionError::Busy,
                s if s.is_server_error() => CompletionError::Busy,
                s => CompletionError::Api {
                    status: s.as_u16(),
                    detail,
                },
            });
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::Network(e.to_string())
            }
        })?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim();

        if content.is_empty() {
            return Err(CompletionError::EmptyReply);
        }

        Ok(content.to_string())
    }
}
