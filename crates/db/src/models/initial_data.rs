//! Stage-1 source material model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::types::{DbId, Timestamp};

/// A row from the `initial_data` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InitialData {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub content: String,
    pub data_type: String,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a source item to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInitialData {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Defaults to `text`.
    pub data_type: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for editing a source item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInitialData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub data_type: Option<String>,
    pub source_url: Option<String>,
    pub tags: Option<Vec<String>>,
}
