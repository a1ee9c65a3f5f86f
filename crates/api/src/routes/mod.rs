pub mod ai;
pub mod health;
pub mod organizations;
pub mod projects;
pub mod settings;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/me                                        get, upsert own profile
///
/// /organizations                                   create (caller becomes admin)
/// /organizations/current                           get, rename (admin)
/// /organizations/current/members                   list, add by email (admin)
/// /organizations/current/members/{user_id}         remove (admin)
///
/// /projects                                        list (?status, ?stage)
/// /projects/create                                 create
/// /projects/{id}                                   get, update (PUT/PATCH), soft delete
/// /projects/{id}/tags                              list, replace
/// /projects/{id}/initial-data                      list, create
/// /projects/{id}/initial-data/{item_id}            update, delete
/// /projects/{id}/contents                          history (?stage_type), manual create
/// /projects/{id}/contents/latest                   latest row per stage type
/// /projects/{id}/contents/{content_id}             edit
/// /projects/{id}/contents/{content_id}/select      select script variant
/// /projects/{id}/stage/complete                    explicit stage completion
/// /projects/{id}/summary                           generate product summary
/// /projects/{id}/education-content                 generate education content
/// /projects/{id}/creative-parts                    generate creative parts
/// /projects/{id}/script-generation                 generate script
/// /projects/{id}/script-generation/variation       generate script variation
///
/// /ai/generate                                     free-form generation
/// /text-edit                                       AI text edit
///
/// /tags                                            list, create
/// /tags/{id}                                       delete
///
/// /settings/api                                    get, update (platform admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/organizations", organizations::router())
        .nest("/projects", projects::router())
        .nest("/tags", tags::router())
        .nest("/settings", settings::router())
        .merge(ai::router())
}
