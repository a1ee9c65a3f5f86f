//! Well-known organization role names.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000003_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MEMBER];

/// Token `role` claim of platform operators, who manage the shared vendor
/// credentials. Not an organization role and never stored in `users.role`.
pub const ROLE_PLATFORM_ADMIN: &str = "platform_admin";
