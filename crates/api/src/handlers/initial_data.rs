//! Handlers for stage-1 source material (`/projects/{id}/initial-data`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use adscript_core::content::{validate_initial_data, DataType};
use adscript_core::error::CoreError;
use adscript_core::types::DbId;
use adscript_core::validation::validate_name;
use adscript_db::models::initial_data::{CreateInitialData, UpdateInitialData};
use adscript_db::repositories::InitialDataRepo;

use super::projects::find_scoped;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::rbac::OrgMember;
use crate::response::DataResponse;
use crate::state::AppState;

fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| t.trim().to_string()).collect()
}

/// GET /api/projects/{id}/initial-data
pub async fn list(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let items = InitialDataRepo::list_for_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/projects/{id}/initial-data
pub async fn create(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<CreateInitialData>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;

    validate_name("title", &input.title)?;
    let data_type = match input.data_type.as_deref() {
        Some(s) => DataType::from_str_value(s)?,
        None => DataType::Text,
    };
    input.tags = normalize_tags(&input.tags);
    validate_initial_data(data_type, input.source_url.as_deref(), &input.tags)?;

    let item = InitialDataRepo::create(&state.pool, project.id, member.user_id, &input).await?;
    tracing::info!(
        project_id = project.id,
        item_id = item.id,
        data_type = data_type.as_str(),
        "Initial data added",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/projects/{id}/initial-data/{item_id}
///
/// The type-specific rules are checked against the item as it will look
/// after the update, so switching an item to `url` requires a URL.
pub async fn update(
    member: OrgMember,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(DbId, DbId)>,
    Json(mut input): Json<UpdateInitialData>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let existing = InitialDataRepo::find_by_id(&state.pool, project.id, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InitialData",
            id: item_id,
        }))?;

    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }
    input.tags = input.tags.as_deref().map(normalize_tags);

    let data_type =
        DataType::from_str_value(input.data_type.as_deref().unwrap_or(existing.data_type.as_str()))?;
    let source_url = input.source_url.as_deref().or(existing.source_url.as_deref());
    let tags = input.tags.as_deref().unwrap_or(existing.tags.as_slice());
    validate_initial_data(data_type, source_url, tags)?;

    let item = InitialDataRepo::update(&state.pool, project.id, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InitialData",
            id: item_id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/projects/{id}/initial-data/{item_id}
pub async fn delete(
    member: OrgMember,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = find_scoped(&state, &member, id).await?;
    if InitialDataRepo::delete(&state.pool, project.id, item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "InitialData",
            id: item_id,
        }))
    }
}
