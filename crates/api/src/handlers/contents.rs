//! Handlers for stage artifacts (`/projects/{id}/contents`) and explicit
//! stage completion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use adscript_core::content::{ContentStatus, STATUS_DRAFT};
use adscript_core::error::CoreError;
use adscript_core::stage::StageType;
use adscript_core::types::DbId;
use adscript_db::models::project_content::{
    ContentListParams, CreateProjectContent, NewProjectContent, UpdateProjectContent,
};
use adscript_db::repositories::ProjectContentRepo;

use super::projects::find_scoped;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::OrgMember;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/projects/{id}/contents
///
/// Full history, newest first, optionally narrowed to one stage type.
pub async fn list(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ContentListParams>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    if let Some(stage_type) = params.stage_type.as_deref() {
        StageType::from_str_value(stage_type)?;
    }
    let rows =
        ProjectContentRepo::list_for_project(&state.pool, project.id, params.stage_type.as_deref())
            .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/projects/{id}/contents/latest
pub async fn latest(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let rows = ProjectContentRepo::latest_per_stage(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/projects/{id}/contents
///
/// Store a hand-written artifact. Like generated scripts, the first script
/// of a project becomes the selected one.
pub async fn create(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProjectContent>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;

    let stage_type = StageType::from_str_value(&input.stage_type)?;
    let status = match input.status.as_deref() {
        Some(s) => ContentStatus::from_str_value(s)?.as_str(),
        None => STATUS_DRAFT,
    };

    let is_selected = stage_type == StageType::Script
        && !ProjectContentRepo::has_selected(&state.pool, project.id).await?;

    let row = ProjectContentRepo::insert(
        &state.pool,
        &NewProjectContent {
            project_id: project.id,
            stage_type: stage_type.as_str().to_string(),
            content: input.content,
            status: status.to_string(),
            is_ai_generated: false,
            is_selected,
            created_by: Some(member.user_id),
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        content_id = row.id,
        stage_type = stage_type.as_str(),
        "Manual content stored",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/projects/{id}/contents/{content_id}
pub async fn update(
    member: OrgMember,
    State(state): State<AppState>,
    Path((id, content_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectContent>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    if let Some(status) = input.status.as_deref() {
        ContentStatus::from_str_value(status)?;
    }

    let row = ProjectContentRepo::update_content(
        &state.pool,
        project.id,
        content_id,
        input.content.as_deref(),
        input.status.as_deref(),
        member.user_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "ProjectContent",
        id: content_id,
    }))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/projects/{id}/contents/{content_id}/select
pub async fn select(
    member: OrgMember,
    State(state): State<AppState>,
    Path((id, content_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let row = ProjectContentRepo::select_variant(&state.pool, project.id, content_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id: content_id,
        }))?;
    tracing::info!(project_id = project.id, content_id, "Script variant selected");
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/projects/{id}/stage/complete
pub async fn complete_stage(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = state
        .orchestrator()
        .complete_stage(member.organization_id, id, member.user_id)
        .await?;
    Ok(Json(DataResponse { data: project }))
}
