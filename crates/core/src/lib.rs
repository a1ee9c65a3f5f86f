//! Domain logic shared by every adscript crate.
//!
//! This crate has no database or HTTP dependencies. Everything here is pure:
//! the pipeline state machine, provider resolution, prompt templates and the
//! string vocabularies stored in the database.

pub mod content;
pub mod error;
pub mod prompts;
pub mod provider;
pub mod roles;
pub mod stage;
pub mod types;
pub mod validation;
