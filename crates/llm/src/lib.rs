//! Provider Adapter: turns `(prompt, model, api key)` into generated text.
//!
//! One [`LlmClient`] owns a pooled [`reqwest::Client`] and the base URL of
//! each vendor. The vendor is chosen by [`Provider`], which callers resolve
//! from the model name before getting here. Each vendor module owns its own
//! request and response shapes.
//!
//! Every call is a single attempt. Non-2xx responses surface as
//! [`ProviderError::Status`] carrying the vendor's status code and message.

mod claude;
mod client;
mod error;
mod gemini;
mod openai;

pub use client::{Endpoints, LlmClient};
pub use error::ProviderError;

pub use adscript_core::provider::{ModelSpec, Provider};
