//! Repository for the `tags` and `project_tags` tables.

use sqlx::PgPool;
use adscript_core::types::DbId;

use crate::models::tag::{CreateTag, Tag};

/// Column list for `tags` queries.
const COLUMNS: &str = "id, organization_id, name, color, created_at, updated_at";

/// Provides organization-scoped tag CRUD and project-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Create a tag. Fails with a `uq_tags_organization_name` violation on
    /// a duplicate name within the organization.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateTag,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (organization_id, name, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(organization_id)
            .bind(input.name.trim())
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// List an organization's tags alphabetically.
    pub async fn list(pool: &PgPool, organization_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tags WHERE organization_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Tag>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a tag (and its project associations). Returns `true` if removed.
    pub async fn delete(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Project associations
    // -----------------------------------------------------------------------

    /// Tags attached to a project, alphabetically.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.organization_id, t.name, t.color, t.created_at, t.updated_at
             FROM tags t
             JOIN project_tags pt ON pt.tag_id = t.id
             WHERE pt.project_id = $1
             ORDER BY t.name, t.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the project's tag set with `tag_ids`.
    ///
    /// IDs that do not belong to `organization_id` are silently skipped.
    /// Returns the resulting tag list.
    pub async fn replace_for_project(
        pool: &PgPool,
        organization_id: DbId,
        project_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_tags WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_tags (project_id, tag_id)
             SELECT $1, id FROM tags WHERE organization_id = $2 AND id = ANY($3)
             ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(organization_id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Self::list_for_project(pool, project_id).await
    }
}
