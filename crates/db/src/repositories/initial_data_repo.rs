//! Repository for the `initial_data` table.

use sqlx::PgPool;
use adscript_core::types::DbId;

use crate::models::initial_data::{CreateInitialData, InitialData, UpdateInitialData};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, content, data_type, source_url, tags, \
                       created_by, created_at, updated_at";

/// Provides CRUD operations for stage-1 source material.
pub struct InitialDataRepo;

impl InitialDataRepo {
    /// Insert a new item. `data_type` defaults to `text`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreateInitialData,
    ) -> Result<InitialData, sqlx::Error> {
        let query = format!(
            "INSERT INTO initial_data (project_id, title, content, data_type, source_url, tags, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 'text'), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InitialData>(&query)
            .bind(project_id)
            .bind(input.title.trim())
            .bind(&input.content)
            .bind(&input.data_type)
            .bind(&input.source_url)
            .bind(&input.tags)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<InitialData>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM initial_data WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, InitialData>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's items in insertion order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<InitialData>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM initial_data WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, InitialData>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the project has at least one item with non-blank content.
    pub async fn has_meaningful_content(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM initial_data
                WHERE project_id = $1 AND length(btrim(content)) > 0
             )",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateInitialData,
    ) -> Result<Option<InitialData>, sqlx::Error> {
        let query = format!(
            "UPDATE initial_data SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                data_type = COALESCE($5, data_type),
                source_url = COALESCE($6, source_url),
                tags = COALESCE($7, tags)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InitialData>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.content)
            .bind(&input.data_type)
            .bind(&input.source_url)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM initial_data WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
