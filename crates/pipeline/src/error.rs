use adscript_core::provider::Provider;
use adscript_core::stage::MissingPrerequisite;
use adscript_core::types::DbId;
use adscript_llm::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Project {0} not found")]
    ProjectNotFound(DbId),

    #[error(transparent)]
    MissingPrerequisite(#[from] MissingPrerequisite),

    /// No credential is stored for the vendor serving the chosen model.
    #[error("{}", adscript_core::provider::MISSING_API_KEY_MESSAGE)]
    MissingApiKey { provider: Provider },

    #[error("{0}")]
    UnsupportedModel(String),

    /// The requested stage transition is not allowed from the current stage.
    #[error("{0}")]
    InvalidTransition(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
