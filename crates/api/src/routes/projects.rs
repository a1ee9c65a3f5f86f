//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped initial data, content, tag and generation
//! routes under `/projects/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{contents, generation, initial_data, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /create                                  -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// PATCH  /{id}                                    -> update
/// DELETE /{id}                                    -> delete
/// GET    /{id}/tags                               -> list_tags
/// PUT    /{id}/tags                               -> set_tags
///
/// GET    /{id}/initial-data                       -> initial_data::list
/// POST   /{id}/initial-data                       -> initial_data::create
/// PUT    /{id}/initial-data/{item_id}             -> initial_data::update
/// DELETE /{id}/initial-data/{item_id}             -> initial_data::delete
///
/// GET    /{id}/contents                           -> contents::list
/// POST   /{id}/contents                           -> contents::create
/// GET    /{id}/contents/latest                    -> contents::latest
/// PUT    /{id}/contents/{content_id}              -> contents::update
/// POST   /{id}/contents/{content_id}/select       -> contents::select
/// POST   /{id}/stage/complete                     -> contents::complete_stage
///
/// POST   /{id}/summary                            -> generation::product_summary
/// POST   /{id}/education-content                  -> generation::education_content
/// POST   /{id}/creative-parts                     -> generation::creative_parts
/// POST   /{id}/script-generation                  -> generation::script
/// POST   /{id}/script-generation/variation        -> generation::script_variation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list))
        .route("/create", post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .patch(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/tags", get(projects::list_tags).put(projects::set_tags))
        // Initial data
        .route(
            "/{id}/initial-data",
            get(initial_data::list).post(initial_data::create),
        )
        .route(
            "/{id}/initial-data/{item_id}",
            put(initial_data::update).delete(initial_data::delete),
        )
        // Contents
        .route("/{id}/contents", get(contents::list).post(contents::create))
        .route("/{id}/contents/latest", get(contents::latest))
        .route("/{id}/contents/{content_id}", put(contents::update))
        .route("/{id}/contents/{content_id}/select", post(contents::select))
        .route("/{id}/stage/complete", post(contents::complete_stage))
        // Generation
        .route("/{id}/summary", post(generation::product_summary))
        .route("/{id}/education-content", post(generation::education_content))
        .route("/{id}/creative-parts", post(generation::creative_parts))
        .route("/{id}/script-generation", post(generation::script))
        .route(
            "/{id}/script-generation/variation",
            post(generation::script_variation),
        )
}
