//! Free-form generation endpoints not tied to a project.

use axum::extract::State;
use axum::response::IntoResponse;
use adscript_core::validation::require_text;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditTextRequest {
    pub text: String,
    pub instruction: String,
    pub model: Option<String>,
}

/// POST /api/ai/generate
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateTextRequest>,
) -> AppResult<impl IntoResponse> {
    require_text("prompt", &input.prompt)?;
    let outcome = state
        .orchestrator()
        .generate_text(&input.prompt, input.model.as_deref())
        .await?;
    tracing::debug!(user_id = auth.user_id, provider = %outcome.provider, "Free-form text generated");
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/text-edit
pub async fn edit_text(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<EditTextRequest>,
) -> AppResult<impl IntoResponse> {
    require_text("text", &input.text)?;
    require_text("instruction", &input.instruction)?;
    let outcome = state
        .orchestrator()
        .edit_text(&input.text, &input.instruction, input.model.as_deref())
        .await?;
    tracing::debug!(user_id = auth.user_id, provider = %outcome.provider, "Text edited");
    Ok(Json(DataResponse { data: outcome }))
}
