//! Organization-scoped tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    /// Optional hex color code (e.g., `"#FF5733"`).
    pub color: Option<String>,
}

/// DTO for replacing the full tag set of a project.
#[derive(Debug, Clone, Deserialize)]
pub struct SetProjectTags {
    pub tag_ids: Vec<DbId>,
}
