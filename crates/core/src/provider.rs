//! LLM vendor identification.
//!
//! A model name (e.g. `gemini-1.5-flash`, `gpt-4o`, `claude-3-5-sonnet`) is
//! resolved to a [`Provider`] exactly once, at the request boundary. All
//! later code dispatches on the enum.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Model used when neither the request nor `api_settings` names one.
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";

/// Message shown when the credential for the resolved vendor is missing.
pub const MISSING_API_KEY_MESSAGE: &str = "APIキーが設定されていません";

/// Prefixes of OpenAI reasoning models that do not contain `gpt`.
const OPENAI_REASONING_PREFIXES: &[&str] = &["o1", "o3", "o4"];

/// Supported LLM vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Claude,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl Provider {
    pub const ALL: [Provider; 4] = [Self::Gemini, Self::OpenAi, Self::Claude, Self::DeepSeek];

    /// Resolve the vendor serving `model`.
    pub fn from_model(model: &str) -> Result<Self, CoreError> {
        let normalized = model.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation("Model name must not be empty".into()));
        }

        if normalized.contains("gemini") {
            Ok(Self::Gemini)
        } else if normalized.contains("claude") {
            Ok(Self::Claude)
        } else if normalized.contains("deepseek") {
            Ok(Self::DeepSeek)
        } else if normalized.contains("gpt")
            || OPENAI_REASONING_PREFIXES
                .iter()
                .any(|p| normalized == *p || normalized.starts_with(&format!("{p}-")))
        {
            Ok(Self::OpenAi)
        } else {
            Err(CoreError::Validation(format!(
                "未対応のモデルです: {model}"
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Claude => "claude",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Human-readable vendor name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
            Self::Claude => "Claude",
            Self::DeepSeek => "DeepSeek",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model name together with the vendor that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    pub provider: Provider,
    pub name: String,
}

impl ModelSpec {
    /// Resolve the vendor and validate the name.
    ///
    /// Names end up in vendor URL paths (Gemini), so only ASCII
    /// alphanumerics, `-`, `.` and `_` are accepted.
    pub fn parse(model: &str) -> Result<Self, CoreError> {
        let provider = Provider::from_model(model)?;
        let name = model.trim();
        if !name.chars().all(is_model_name_char) {
            return Err(CoreError::Validation(format!(
                "モデル名に使用できない文字が含まれています: {name}"
            )));
        }
        Ok(Self {
            provider,
            name: name.to_string(),
        })
    }
}

fn is_model_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')
}

/// Pick the model for a request.
///
/// Precedence: explicit request value, then the stored default, then
/// `fallback`. Blank strings count as absent.
pub fn choose_model<'a>(
    requested: Option<&'a str>,
    stored_default: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    [requested, stored_default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|m| !m.is_empty())
        .unwrap_or(fallback)
}
