//! Stage artifact model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::types::{DbId, Timestamp};

/// A row from the `project_contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectContent {
    pub id: DbId,
    pub project_id: DbId,
    pub stage_type: String,
    pub content: String,
    pub status: String,
    pub is_ai_generated: bool,
    pub is_selected: bool,
    pub created_by: Option<DbId>,
    pub last_edited_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload used by both the generators and manual entry.
#[derive(Debug, Clone)]
pub struct NewProjectContent {
    pub project_id: DbId,
    pub stage_type: String,
    pub content: String,
    pub status: String,
    pub is_ai_generated: bool,
    pub is_selected: bool,
    pub created_by: Option<DbId>,
}

/// Request body for manually writing a stage artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectContent {
    pub stage_type: String,
    pub content: String,
    /// Defaults to `draft`.
    pub status: Option<String>,
}

/// Request body for editing an artifact in place.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectContent {
    pub content: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for the content history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentListParams {
    pub stage_type: Option<String>,
}
