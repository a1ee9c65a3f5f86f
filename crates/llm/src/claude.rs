//! Anthropic Messages API.

use adscript_core::provider::Provider;
use serde::{Deserialize, Serialize};

use crate::client::{non_empty, LlmClient};
use crate::error::ProviderError;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// `POST {base}/v1/messages`
pub(crate) async fn generate(
    client: &LlmClient,
    base: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    let url = format!("{base}/v1/messages");
    let body = MessagesRequest {
        model,
        max_tokens: MAX_TOKENS,
        messages: [Message {
            role: "user",
            content: prompt,
        }],
    };
    let headers = [("x-api-key", api_key), ("anthropic-version", ANTHROPIC_VERSION)];

    let response: MessagesResponse = client
        .post_json(Provider::Claude, &url, &[], &headers, &body)
        .await?;
    extract_text(response)
}

/// Concatenate every `text` block; other block types are skipped.
fn extract_text(response: MessagesResponse) -> Result<String, ProviderError> {
    let blocks = response
        .content
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: Provider::Claude,
            detail: "missing content".to_string(),
        })?;

    let text: String = blocks
        .into_iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text)
        .collect();
    non_empty(Provider::Claude, text)
}
