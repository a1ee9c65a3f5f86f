//! Organization membership and role extractors.
//!
//! Organization roles live on the `users` row, not in the token, so the
//! organization extractors load the caller's profile after authentication.
//! The platform operator role is the one role read from the token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use adscript_core::error::CoreError;
use adscript_core::roles::{ROLE_ADMIN, ROLE_PLATFORM_ADMIN};
use adscript_core::types::DbId;
use adscript_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Message returned when the caller has no organization.
pub const NO_ORGANIZATION_MESSAGE: &str = "組織に所属していません";

/// An authenticated caller that belongs to an organization.
///
/// Rejects with 400 when the caller has no profile or no organization.
///
/// ```ignore
/// async fn scoped(member: OrgMember) -> AppResult<Json<()>> {
///     // member.organization_id scopes every query
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OrgMember {
    pub user_id: DbId,
    pub organization_id: DbId,
    pub role: String,
}

impl OrgMember {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for OrgMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = UserRepo::find_by_id(&state.pool, auth.user_id).await?;

        match user {
            Some(user) => match user.organization_id {
                Some(organization_id) => Ok(OrgMember {
                    user_id: user.id,
                    organization_id,
                    role: user.role,
                }),
                None => Err(AppError::BadRequest(NO_ORGANIZATION_MESSAGE.into())),
            },
            None => Err(AppError::BadRequest(NO_ORGANIZATION_MESSAGE.into())),
        }
    }
}

/// Requires the organization `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireOrgAdmin(pub OrgMember);

impl FromRequestParts<AppState> for RequireOrgAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let member = OrgMember::from_request_parts(parts, state).await?;
        if !member.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Organization admin role required".into(),
            )));
        }
        Ok(RequireOrgAdmin(member))
    }
}

/// Requires the platform operator role in the token. Rejects with 403
/// Forbidden otherwise, including for organization admins.
///
/// Guards state shared by every organization, such as vendor credentials.
pub struct RequirePlatformAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequirePlatformAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_PLATFORM_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Platform admin role required".into(),
            )));
        }
        Ok(RequirePlatformAdmin(user))
    }
}
