//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod api_settings;
pub mod initial_data;
pub mod organization;
pub mod project;
pub mod project_content;
pub mod tag;
pub mod user;
