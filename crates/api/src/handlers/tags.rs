//! Handlers for organization tags.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use adscript_core::error::CoreError;
use adscript_core::types::DbId;
use adscript_core::validation::{validate_hex_color, validate_name};
use adscript_db::models::tag::CreateTag;
use adscript_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::rbac::OrgMember;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(member: OrgMember, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool, member.organization_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/tags
///
/// Names are unique per organization; a duplicate is a 409.
pub async fn create(
    member: OrgMember,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;
    if let Some(color) = &input.color {
        validate_hex_color(color)?;
    }
    let tag = TagRepo::create(&state.pool, member.organization_id, &input).await?;
    tracing::info!(tag_id = tag.id, organization_id = member.organization_id, "Tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /api/tags/{id}
pub async fn delete(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::delete(&state.pool, member.organization_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }))
    }
}
