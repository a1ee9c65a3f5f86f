//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Free-text label chosen by the team (e.g. `"進行中"`).
    pub status: String,
    /// Pipeline stage counter, 1..=6.
    pub stage: i16,
    pub created_by: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
///
/// `organization_id` and `created_by` come from the caller, never from the
/// request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `未着手` if omitted.
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `stage` is deliberately absent: it only moves through the pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
}

/// Query parameters for `GET /api/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub stage: Option<i16>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
