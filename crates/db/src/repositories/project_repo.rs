//! Repository for the `projects` table.
//!
//! Every read and write is scoped by `organization_id`; a project of another
//! organization behaves exactly like a missing one.

use sqlx::PgPool;
use adscript_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organization_id, name, description, status, stage, \
                       created_by, assigned_to, created_at, updated_at";

/// Default page size for project listing.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for project listing.
const MAX_LIMIT: i64 = 500;

/// Provides CRUD operations and stage advancement for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project at stage 1, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `未着手`.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        created_by: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (organization_id, name, description, status, created_by, assigned_to)
             VALUES ($1, $2, $3, COALESCE($4, '未着手'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(organization_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(&input.status)
            .bind(created_by)
            .bind(input.assigned_to)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID within an organization. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List an organization's projects, most recently updated first.
    ///
    /// `status` and `stage` filters are applied only when present.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        params: &ProjectListParams,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE organization_id = $1 AND deleted_at IS NULL
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::SMALLINT IS NULL OR stage = $3)
             ORDER BY updated_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(organization_id)
            .bind(&params.status)
            .bind(params.stage)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists in the organization.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                assigned_to = COALESCE($6, assigned_to)
             WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Move the stage counter forward to at least `stage`.
    ///
    /// Uses `GREATEST` so a concurrent or repeated run never moves a project
    /// backwards.
    pub async fn advance_stage(
        pool: &PgPool,
        id: DbId,
        stage: i16,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET stage = GREATEST(stage, $2)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(stage)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
