//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Organization-scoped repositories
//! take the caller's `organization_id` explicitly; nothing here trusts a
//! request body for tenancy.

pub mod api_settings_repo;
pub mod initial_data_repo;
pub mod organization_repo;
pub mod project_content_repo;
pub mod project_repo;
pub mod tag_repo;
pub mod user_repo;

pub use api_settings_repo::ApiSettingsRepo;
pub use initial_data_repo::InitialDataRepo;
pub use organization_repo::OrganizationRepo;
pub use project_content_repo::ProjectContentRepo;
pub use project_repo::ProjectRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
