use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Free-form AI routes, merged at the `/api` root.
///
/// ```text
/// POST   /ai/generate    -> generate
/// POST   /text-edit      -> edit_text
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai/generate", post(ai::generate))
        .route("/text-edit", post(ai::edit_text))
}
