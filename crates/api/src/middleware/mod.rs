//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::OrgMember`] -- Requires the caller to belong to an organization.
//! - [`rbac::RequireOrgAdmin`] -- Requires the organization `admin` role.
//! - [`rbac::RequirePlatformAdmin`] -- Requires the platform operator token role.

pub mod auth;
pub mod rbac;
