use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::organizations;
use crate::state::AppState;

/// Routes mounted at `/organizations`.
///
/// ```text
/// POST   /                                 -> create
/// GET    /current                          -> get_current
/// PUT    /current                          -> update_current (admin)
/// GET    /current/members                  -> list_members
/// POST   /current/members                  -> add_member (admin)
/// DELETE /current/members/{user_id}        -> remove_member (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(organizations::create))
        .route(
            "/current",
            get(organizations::get_current).put(organizations::update_current),
        )
        .route(
            "/current/members",
            get(organizations::list_members).post(organizations::add_member),
        )
        .route(
            "/current/members/{user_id}",
            delete(organizations::remove_member),
        )
}
