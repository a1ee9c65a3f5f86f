//! Handlers for vendor credentials and the default model.
//!
//! The settings row is shared by every organization, so only platform
//! operators may read or change it. Keys are write-only over HTTP:
//! responses only say whether each key is set.

use axum::extract::State;
use axum::response::IntoResponse;
use adscript_core::provider::ModelSpec;
use adscript_db::models::api_settings::UpdateApiSettings;
use adscript_db::repositories::ApiSettingsRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequirePlatformAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/settings/api
pub async fn get(
    RequirePlatformAdmin(_admin): RequirePlatformAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = ApiSettingsRepo::get(&state.pool)
        .await?
        .ok_or_else(|| AppError::InternalError("api_settings row is missing".into()))?;
    Ok(Json(DataResponse {
        data: settings.view(),
    }))
}

/// PUT /api/settings/api
///
/// Absent keys are kept, empty strings clear them. A non-blank
/// `default_model` must name a supported vendor.
pub async fn update(
    RequirePlatformAdmin(admin): RequirePlatformAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateApiSettings>,
) -> AppResult<impl IntoResponse> {
    if let Some(model) = input.default_model.as_deref().filter(|m| !m.trim().is_empty()) {
        ModelSpec::parse(model)?;
    }
    let settings = ApiSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(user_id = admin.user_id, default_model = %settings.default_model, "API settings updated");
    Ok(Json(DataResponse {
        data: settings.view(),
    }))
}
