//! Repository for the `project_contents` table (stage artifacts).
//!
//! Rows are append-only from the generators' point of view: a run inserts a
//! new row and never rewrites an older one. The effective artifact for a
//! stage is the selected row if there is one (only scripts are ever
//! selected), otherwise the newest row by `created_at`, ties broken by `id`.

use sqlx::PgPool;
use adscript_core::content::STATUS_COMPLETED;
use adscript_core::stage::STAGE_TYPE_SCRIPT;
use adscript_core::types::DbId;

use crate::models::project_content::{NewProjectContent, ProjectContent};

/// Ordering that puts the effective row of a stage first.
const EFFECTIVE_ORDER: &str = "is_selected DESC, created_at DESC, id DESC";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, stage_type, content, status, is_ai_generated, \
                       is_selected, created_by, last_edited_by, created_at, updated_at";

/// Provides storage operations for stage artifacts.
pub struct ProjectContentRepo;

impl ProjectContentRepo {
    /// Insert a new artifact row. `last_edited_by` starts equal to `created_by`.
    pub async fn insert(
        pool: &PgPool,
        input: &NewProjectContent,
    ) -> Result<ProjectContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_contents
                (project_id, stage_type, content, status, is_ai_generated, is_selected,
                 created_by, last_edited_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(input.project_id)
            .bind(&input.stage_type)
            .bind(&input.content)
            .bind(&input.status)
            .bind(input.is_ai_generated)
            .bind(input.is_selected)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an artifact by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectContent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_contents WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// The effective artifact of one stage type.
    pub async fn latest_for_stage(
        pool: &PgPool,
        project_id: DbId,
        stage_type: &str,
    ) -> Result<Option<ProjectContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_contents
             WHERE project_id = $1 AND stage_type = $2
             ORDER BY {EFFECTIVE_ORDER}
             LIMIT 1"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(project_id)
            .bind(stage_type)
            .fetch_optional(pool)
            .await
    }

    /// The effective artifact of each stage type that has one.
    pub async fn latest_per_stage(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectContent>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (stage_type) {COLUMNS} FROM project_contents
             WHERE project_id = $1
             ORDER BY stage_type, {EFFECTIVE_ORDER}"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Full artifact history, newest first, optionally for one stage type.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        stage_type: Option<&str>,
    ) -> Result<Vec<ProjectContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_contents
             WHERE project_id = $1 AND ($2::TEXT IS NULL OR stage_type = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(project_id)
            .bind(stage_type)
            .fetch_all(pool)
            .await
    }

    /// Edit an artifact in place. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists in the project.
    pub async fn update_content(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        content: Option<&str>,
        status: Option<&str>,
        edited_by: DbId,
    ) -> Result<Option<ProjectContent>, sqlx::Error> {
        let query = format!(
            "UPDATE project_contents SET
                content = COALESCE($3, content),
                status = COALESCE($4, status),
                last_edited_by = $5
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(id)
            .bind(project_id)
            .bind(content)
            .bind(status)
            .bind(edited_by)
            .fetch_optional(pool)
            .await
    }

    /// Mark an artifact `completed`.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        edited_by: DbId,
    ) -> Result<Option<ProjectContent>, sqlx::Error> {
        let query = format!(
            "UPDATE project_contents SET status = $2, last_edited_by = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectContent>(&query)
            .bind(id)
            .bind(STATUS_COMPLETED)
            .bind(edited_by)
            .fetch_optional(pool)
            .await
    }

    /// Whether any script row of the project is currently selected.
    pub async fn has_selected(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM project_contents
                WHERE project_id = $1 AND stage_type = $2 AND is_selected
             )",
        )
        .bind(project_id)
        .bind(STAGE_TYPE_SCRIPT)
        .fetch_one(pool)
        .await
    }

    /// Make one script row the selected variant of its project.
    ///
    /// Clears `is_selected` on every other script row in the same
    /// transaction. Returns `None` (and changes nothing) if `id` is not a
    /// script row of the project.
    pub async fn select_variant(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectContent>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM project_contents
                WHERE id = $1 AND project_id = $2 AND stage_type = $3
             )",
        )
        .bind(id)
        .bind(project_id)
        .bind(STAGE_TYPE_SCRIPT)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Ok(None);
        }

        sqlx::query(
            "UPDATE project_contents SET is_selected = FALSE
             WHERE project_id = $1 AND stage_type = $2 AND is_selected AND id <> $3",
        )
        .bind(project_id)
        .bind(STAGE_TYPE_SCRIPT)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE project_contents SET is_selected = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectContent>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }
}
