//! Repository for the `organizations` table.

use sqlx::PgPool;
use adscript_core::roles::ROLE_ADMIN;
use adscript_core::types::DbId;

use crate::models::organization::{CreateOrganization, Organization, UpdateOrganization};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides operations for organizations (tenants).
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Create an organization and make `owner_id` its admin, atomically.
    ///
    /// The owner's previous membership (if any) is replaced.
    pub async fn create_with_owner(
        pool: &PgPool,
        input: &CreateOrganization,
        owner_id: DbId,
    ) -> Result<Organization, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO organizations (name) VALUES ($1) RETURNING {COLUMNS}");
        let org = sqlx::query_as::<_, Organization>(&query)
            .bind(input.name.trim())
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE users SET organization_id = $2, role = $3 WHERE id = $1")
            .bind(owner_id)
            .bind(org.id)
            .bind(ROLE_ADMIN)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;
        Ok(org)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an organization. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }
}
