//! Model and API key resolution.

use adscript_core::provider::{choose_model, ModelSpec};
use adscript_db::models::api_settings::ApiSettings;

use crate::error::PipelineError;

/// A model together with the key that authorizes it.
pub struct Credentials {
    pub model: ModelSpec,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Pick the model (request, then stored default, then `fallback_model`)
    /// and look up the stored key for its vendor.
    ///
    /// `settings` is `None` when the settings row is missing, which behaves
    /// like a row with no keys.
    pub fn resolve(
        settings: Option<&ApiSettings>,
        requested: Option<&str>,
        fallback_model: &str,
    ) -> Result<Self, PipelineError> {
        let name = choose_model(
            requested,
            settings.map(|s| s.default_model.as_str()),
            fallback_model,
        );
        let model =
            ModelSpec::parse(name).map_err(|_| PipelineError::UnsupportedModel(format!(
                "未対応のモデルです: {name}"
            )))?;

        let api_key = settings
            .and_then(|s| s.key_for(model.provider))
            .ok_or(PipelineError::MissingApiKey {
                provider: model.provider,
            })?
            .to_string();

        Ok(Self { model, api_key })
    }
}
