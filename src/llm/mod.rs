pub mod models;
pub mod openai;
pub mod prompt;

use openai::OpenAiCompatProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use models::ChatTurn;

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("provider rejected credentials")]
    Auth,
    #[error("provider rate limited or unavailable")]
    Busy,
    #[error("provider call timed out")]
    Timeout,
    #[error("provider returned no usable text")]
    EmptyReply,
}

/// The external text-generation capability. Implementations own prompt
/// assembly (system instructions + prior turns + new message) and translate
/// provider failures into [`CompletionError`]. No retries happen here;
/// callers resubmit.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(
        &self,
        history: &[ChatTurn],
        new_message: &str,
    ) -> Result<String, CompletionError>;
}

/// Builds the configured gateway implementation.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(config: &AppConfig) -> Option<Arc<dyn CompletionGateway>> {
        let llm = &config.llm;
        let system_prompt = config
            .chat
            .system_prompt
            .clone()
            .unwrap_or_else(|| prompt::DEFAULT_SYSTEM_PROMPT.to_string());

        let default_base = match llm.provider.as_str() {
            "groq" => GROQ_API_BASE,
            "openai" => OPENAI_API_BASE,
            _ => return None,
        };
        let api_base = llm
            .api_base
            .clone()
            .unwrap_or_else(|| default_base.to_string());

        Some(Arc::new(OpenAiCompatProvider::new(
            llm.provider.clone(),
            api_base,
            llm.api_key.clone(),
            llm.model.clone(),
            llm.max_tokens,
            llm.temperature,
            llm.timeout_secs,
            system_prompt,
        )))
    }
}
