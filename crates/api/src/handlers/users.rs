//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::response::IntoResponse;
use adscript_core::error::CoreError;
use adscript_core::validation::require_text;
use adscript_db::models::user::UpsertProfile;
use adscript_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/users/me
///
/// Creates the profile on first sign-in and refreshes email and name after.
pub async fn upsert_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertProfile>,
) -> AppResult<impl IntoResponse> {
    require_text("email", &input.email)?;
    let user = UserRepo::upsert_profile(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = user.id, "Profile upserted");
    Ok(Json(DataResponse { data: user }))
}
