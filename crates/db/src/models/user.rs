//! User profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use adscript_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `id` is the subject of the auth provider's JWT; this service never
/// issues identities itself.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub organization_id: Option<DbId>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or refreshing the caller's own profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfile {
    pub email: String,
    pub full_name: Option<String>,
}

/// DTO for adding an existing user to the caller's organization.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMember {
    pub email: String,
    /// Defaults to `member`.
    pub role: Option<String>,
}
