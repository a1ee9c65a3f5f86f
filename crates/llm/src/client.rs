//! The shared HTTP client and vendor dispatch.

use adscript_core::provider::{ModelSpec, Provider};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{vendor_message, ProviderError};
use crate::{claude, gemini, openai};

pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";
pub const DEFAULT_ANTHROPIC_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_DEEPSEEK_BASE: &str = "https://api.deepseek.com";

/// Base URL of each vendor API, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub gemini: String,
    pub openai: String,
    pub anthropic: String,
    pub deepseek: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gemini: DEFAULT_GEMINI_BASE.to_string(),
            openai: DEFAULT_OPENAI_BASE.to_string(),
            anthropic: DEFAULT_ANTHROPIC_BASE.to_string(),
            deepseek: DEFAULT_DEEPSEEK_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every vendor at the same base URL (used with a local mock server).
    pub fn all(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            gemini: base.clone(),
            openai: base.clone(),
            anthropic: base.clone(),
            deepseek: base,
        }
    }
}

/// HTTP client for the four supported LLM vendors.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl LlmClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, endpoints: Endpoints) -> Self {
        let endpoints = Endpoints {
            gemini: endpoints.gemini.trim_end_matches('/').to_string(),
            openai: endpoints.openai.trim_end_matches('/').to_string(),
            anthropic: endpoints.anthropic.trim_end_matches('/').to_string(),
            deepseek: endpoints.deepseek.trim_end_matches('/').to_string(),
        };
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Generate text for `prompt` with `model`, authenticating with `api_key`.
    #[tracing::instrument(
        skip(self, api_key, prompt),
        fields(provider = %model.provider, model = %model.name, prompt_len = prompt.len())
    )]
    pub async fn generate(
        &self,
        model: &ModelSpec,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let result = match model.provider {
            Provider::Gemini => {
                gemini::generate(self, &self.endpoints.gemini, api_key, &model.name, prompt).await
            }
            Provider::OpenAi => {
                let url = format!("{}/v1/chat/completions", self.endpoints.openai);
                openai::generate(self, Provider::OpenAi, &url, api_key, &model.name, prompt).await
            }
            Provider::Claude => {
                claude::generate(self, &self.endpoints.anthropic, api_key, &model.name, prompt)
                    .await
            }
            Provider::DeepSeek => {
                // OpenAI-compatible, but without the `/v1` prefix.
                let url = format!("{}/chat/completions", self.endpoints.deepseek);
                openai::generate(self, Provider::DeepSeek, &url, api_key, &model.name, prompt)
                    .await
            }
        };

        match &result {
            Ok(text) => tracing::debug!(response_len = text.len(), "Provider call succeeded"),
            Err(e) => tracing::warn!(error = %e, status = ?e.status(), "Provider call failed"),
        }
        result
    }

    /// POST a JSON body and decode a successful JSON response.
    ///
    /// `query` and `headers` are added verbatim; a non-2xx status becomes
    /// [`ProviderError::Status`].
    pub(crate) async fn post_json<B, T>(
        &self,
        provider: Provider,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(url).query(query).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Status {
                provider,
                status: status.as_u16(),
                message: vendor_message(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::MalformedResponse {
                provider,
                detail: e.to_string(),
            })
    }
}

/// Reject a blank result instead of storing an empty artifact.
pub(crate) fn non_empty(provider: Provider, text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::MalformedResponse {
            provider,
            detail: "response contained no text".to_string(),
        })
    } else {
        Ok(text)
    }
}
