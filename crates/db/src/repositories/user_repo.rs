//! Repository for the `users` table.

use sqlx::PgPool;
use adscript_core::types::DbId;

use crate::models::user::{UpsertProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, full_name, organization_id, role, created_at, updated_at";

/// Provides profile and membership operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by ID (the JWT subject).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Create the profile for `id`, or refresh its email and name.
    ///
    /// Organization membership and role are never touched here.
    pub async fn upsert_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpsertProfile,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, full_name)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                full_name = COALESCE(EXCLUDED.full_name, users.full_name)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.email.trim())
            .bind(input.full_name.as_deref())
            .fetch_one(pool)
            .await
    }

    /// List members of an organization, oldest first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE organization_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Place a user into an organization with the given role.
    ///
    /// Returns `None` if no user with the given `id` exists.
    pub async fn set_membership(
        pool: &PgPool,
        id: DbId,
        organization_id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET organization_id = $2, role = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Detach a user from `organization_id`. Returns `true` if the user was a member.
    pub async fn remove_from_organization(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET organization_id = NULL, role = 'member'
             WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
