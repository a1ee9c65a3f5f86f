//! Vendor credential settings (singleton row).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::provider::Provider;
use adscript_core::types::Timestamp;

/// The single row of the `api_settings` table.
///
/// Contains plaintext vendor keys -- NEVER serialize this to API responses.
/// Use [`ApiSettingsView`] for external-facing output.
#[derive(Clone, FromRow)]
pub struct ApiSettings {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub default_model: String,
    pub updated_at: Timestamp,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("claude_api_key", &self.claude_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("deepseek_api_key", &self.deepseek_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl ApiSettings {
    /// The stored key for `provider`, ignoring blank values.
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Claude => self.claude_api_key.as_deref(),
            Provider::DeepSeek => self.deepseek_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    /// Public view with keys reduced to "is configured" flags.
    pub fn view(&self) -> ApiSettingsView {
        ApiSettingsView {
            has_gemini_api_key: self.key_for(Provider::Gemini).is_some(),
            has_openai_api_key: self.key_for(Provider::OpenAi).is_some(),
            has_claude_api_key: self.key_for(Provider::Claude).is_some(),
            has_deepseek_api_key: self.key_for(Provider::DeepSeek).is_some(),
            default_model: self.default_model.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Safe representation of [`ApiSettings`] for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSettingsView {
    pub has_gemini_api_key: bool,
    pub has_openai_api_key: bool,
    pub has_claude_api_key: bool,
    pub has_deepseek_api_key: bool,
    pub default_model: String,
    pub updated_at: Timestamp,
}

/// DTO for updating settings.
///
/// For each key: absent leaves the stored value, an empty string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApiSettings {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub default_model: Option<String>,
}
