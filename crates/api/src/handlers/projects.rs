//! Handlers for the `/projects` resource and its tags.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use adscript_core::error::CoreError;
use adscript_core::types::DbId;
use adscript_core::validation::validate_name;
use adscript_db::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use adscript_db::models::tag::SetProjectTags;
use adscript_db::repositories::{ProjectRepo, TagRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::OrgMember;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a project visible to `member`, or 404.
///
/// Every project-scoped handler goes through here so other organizations'
/// projects are indistinguishable from missing ones.
pub(crate) async fn find_scoped(
    state: &AppState,
    member: &OrgMember,
    id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, member.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Reject an `assigned_to` user outside the caller's organization.
async fn ensure_assignable(
    state: &AppState,
    member: &OrgMember,
    assigned_to: Option<DbId>,
) -> AppResult<()> {
    let Some(user_id) = assigned_to else {
        return Ok(());
    };
    let user = UserRepo::find_by_id(&state.pool, user_id).await?;
    if user.and_then(|u| u.organization_id) != Some(member.organization_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "assigned_to: user {user_id} is not a member of this organization"
        ))));
    }
    Ok(())
}

/// POST /api/projects/create
pub async fn create(
    member: OrgMember,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;
    ensure_assignable(&state, &member, input.assigned_to).await?;
    let project =
        ProjectRepo::create(&state.pool, member.organization_id, member.user_id, &input).await?;
    tracing::info!(project_id = project.id, user_id = member.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/projects
pub async fn list(
    member: OrgMember,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.pool, member.organization_id, &params).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/projects/{id}
///
/// Also mounted as PATCH; absent fields are left unchanged either way.
pub async fn update(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    ensure_assignable(&state, &member, input.assigned_to).await?;
    let project = ProjectRepo::update(&state.pool, member.organization_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::soft_delete(&state.pool, member.organization_id, id).await?;
    if deleted {
        tracing::info!(project_id = id, user_id = member.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// GET /api/projects/{id}/tags
pub async fn list_tags(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let tags = TagRepo::list_for_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// PUT /api/projects/{id}/tags
///
/// Replaces the full tag set. Ids of tags outside the organization are
/// ignored.
pub async fn set_tags(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetProjectTags>,
) -> AppResult<impl IntoResponse> {
    let project = find_scoped(&state, &member, id).await?;
    let tags =
        TagRepo::replace_for_project(&state.pool, member.organization_id, project.id, &input.tag_ids)
            .await?;
    Ok(Json(DataResponse { data: tags }))
}
