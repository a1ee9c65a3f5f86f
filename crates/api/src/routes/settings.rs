use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`. Platform admins only.
///
/// ```text
/// GET    /api    -> get
/// PUT    /api    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/api", get(settings::get).put(settings::update))
}
