use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use aiact_core::AiSettings;

use crate::error::ProviderError;

/// Text in, text out. The only way the pipeline talks to a model.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, system: &str, user_msg: &str) -> Result<String, ProviderError>;
}

/// Provider names accepted in `ai.provider`.
pub const SUPPORTED_PROVIDERS: [&str; 7] =
    ["openai", "anthropic", "google", "ollama", "groq", "mistral", "deepseek"];

fn map_backend(provider: &str) -> Result<LLMBackend, ProviderError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

/// Hosted or local model reached through the `llm` crate backends.
pub struct LlmProvider {
    settings: AiSettings,
}

impl LlmProvider {
    pub fn new(settings: AiSettings) -> Result<Self, ProviderError> {
        if !aiact_core::ai_configured(&settings) {
            return Err(ProviderError::NotConfigured);
        }
        map_backend(&settings.provider)?;
        Ok(Self { settings })
    }
}

#[async_trait]
impl Provider for LlmProvider {
    async fn generate(&self, system: &str, user_msg: &str) -> Result<String, ProviderError> {
        let backend = map_backend(&self.settings.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.settings.model)
            .system(system);

        if !self.settings.api_key.is_empty() {
            builder = builder.api_key(&self.settings.api_key);
        }

        let llm = builder
            .build()
            .map_err(|e| ProviderError::Request(format!("build LLM: {e}")))?;

        let messages = vec![ChatMessage::user().content(user_msg).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| ProviderError::Request(format!("chat: {e}")))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ProviderError::EmptyResponse),
        }
    }
}
