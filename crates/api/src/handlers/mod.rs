//! Request handlers, one module per resource.

pub mod ai;
pub mod contents;
pub mod generation;
pub mod initial_data;
pub mod organizations;
pub mod projects;
pub mod settings;
pub mod tags;
pub mod users;
