//! The text generation seam.

use adscript_core::provider::ModelSpec;
use adscript_llm::{LlmClient, ProviderError};
use async_trait::async_trait;

/// Something that turns a prompt into text with a given model and key.
///
/// Implemented by [`LlmClient`] in production; tests substitute a fake.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &ModelSpec,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        model: &ModelSpec,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        LlmClient::generate(self, model, api_key, prompt).await
    }
}
