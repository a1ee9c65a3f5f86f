//! Stage generators and the pipeline orchestrator.
//!
//! [`Orchestrator`] runs one generation end to end: project lookup,
//! prerequisite gating, credential resolution, prompt build, one vendor call,
//! one insert and a monotone stage update. The vendor call goes through the
//! [`TextGenerator`] seam so tests can run the whole flow without a network.

pub mod credentials;
pub mod error;
pub mod generator;
pub mod orchestrator;

pub use credentials::Credentials;
pub use error::PipelineError;
pub use generator::TextGenerator;
pub use orchestrator::{AdHocOutcome, GenerationOutcome, Orchestrator};
