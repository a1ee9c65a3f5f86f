//! Handlers for the caller's organization and its members.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use adscript_core::error::CoreError;
use adscript_core::roles::{ROLE_MEMBER, VALID_ROLES};
use adscript_core::types::DbId;
use adscript_core::validation::validate_name;
use adscript_db::models::organization::{CreateOrganization, UpdateOrganization};
use adscript_db::models::user::AddMember;
use adscript_db::repositories::{OrganizationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{OrgMember, RequireOrgAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/organizations
///
/// The caller must have a profile and no organization yet; they become the
/// new organization's admin.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOrganization>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Create your profile before an organization".into()))?;
    if user.organization_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Already a member of an organization".into(),
        )));
    }

    let org = OrganizationRepo::create_with_owner(&state.pool, &input, user.id).await?;
    tracing::info!(organization_id = org.id, user_id = user.id, "Organization created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: org })))
}

/// GET /api/organizations/current
pub async fn get_current(
    member: OrgMember,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let org = OrganizationRepo::find_by_id(&state.pool, member.organization_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: member.organization_id,
        }))?;
    Ok(Json(DataResponse { data: org }))
}

/// PUT /api/organizations/current
pub async fn update_current(
    RequireOrgAdmin(admin): RequireOrgAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateOrganization>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let org = OrganizationRepo::update(&state.pool, admin.organization_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: admin.organization_id,
        }))?;
    Ok(Json(DataResponse { data: org }))
}

/// GET /api/organizations/current/members
pub async fn list_members(
    member: OrgMember,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_by_organization(&state.pool, member.organization_id).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/organizations/current/members
///
/// Adds an existing profile (looked up by email). Users already in another
/// organization are rejected with 409.
pub async fn add_member(
    RequireOrgAdmin(admin): RequireOrgAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddMember>,
) -> AppResult<impl IntoResponse> {
    let role = input.role.as_deref().unwrap_or(ROLE_MEMBER);
    if !VALID_ROLES.contains(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))));
    }

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("No user with email {}", input.email.trim())))?;
    match user.organization_id {
        Some(org) if org != admin.organization_id => {
            return Err(AppError::Core(CoreError::Conflict(
                "User already belongs to another organization".into(),
            )));
        }
        _ => {}
    }

    let user = UserRepo::set_membership(&state.pool, user.id, admin.organization_id, role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.id,
        }))?;

    tracing::info!(
        organization_id = admin.organization_id,
        user_id = user.id,
        role,
        "Member added",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// DELETE /api/organizations/current/members/{user_id}
pub async fn remove_member(
    RequireOrgAdmin(admin): RequireOrgAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if user_id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot remove themselves".into(),
        )));
    }

    let removed =
        UserRepo::remove_from_organization(&state.pool, admin.organization_id, user_id).await?;
    if removed {
        tracing::info!(organization_id = admin.organization_id, user_id, "Member removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
    }
}
