//! Authentication primitives.
//!
//! Identities are issued by an external auth provider; this service only
//! verifies the HS256 bearer tokens it signs (see [`jwt`]).

pub mod jwt;
