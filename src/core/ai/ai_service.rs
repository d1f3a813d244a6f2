use super::models::{AiConfig, AiMessage};
use async_trait::async_trait;
use std::error::Error;

/// The advisory reasoning collaborator port.
///
/// Implementations perform network I/O with unbounded-by-design latency
/// and may fail or time out; callers own the fallback behavior.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request and returns the model's text.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

// Blanket implementation for Box<dyn AiProvider>
// This allows trait objects in services that are generic over a provider,
// enabling runtime switching between providers.
#[async_trait]
impl AiProvider for Box<dyn AiProvider> {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        (**self).chat_complete(messages, config).await
    }
}

/// Thin wrapper owning a system prompt and generation settings, so callers
/// only supply the user-facing prompt.
pub struct AiService<P: AiProvider> {
    provider: P,
    system_prompt: String,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, system_prompt: String, config: AiConfig) -> Self {
        Self {
            provider,
            system_prompt,
            config,
        }
    }

    /// Send one user prompt under this service's system prompt.
    pub async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let messages = vec![
            AiMessage::system(self.system_prompt.clone()),
            AiMessage::user(prompt),
        ];

        self.provider.chat_complete(&messages, &self.config).await
    }
}
