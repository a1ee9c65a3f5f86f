//! OpenAI Chat Completions, also spoken by DeepSeek.

use adscript_core::provider::Provider;
use serde::{Deserialize, Serialize};

use crate::client::{non_empty, LlmClient};
use crate::error::ProviderError;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// `POST {url}` with a bearer token and a single user message.
///
/// `provider` only labels errors; the caller picks the URL.
pub(crate) async fn generate(
    client: &LlmClient,
    provider: Provider,
    url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    let body = ChatCompletionRequest {
        model,
        messages: [Message {
            role: "user",
            content: prompt,
        }],
    };
    let auth = format!("Bearer {api_key}");

    let response: ChatCompletionResponse = client
        .post_json(provider, url, &[], &[("authorization", auth.as_str())], &body)
        .await?;
    extract_text(provider, response)
}

/// Text of `choices[0].message.content`.
fn extract_text(
    provider: Provider,
    response: ChatCompletionResponse,
) -> Result<String, ProviderError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider,
            detail: "missing choices[0].message.content".to_string(),
        })?;
    non_empty(provider, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"台本"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(Provider::OpenAi, response).unwrap(), "台本");
    }

    #[test]
    fn null_content_is_malformed() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        let err = extract_text(Provider::DeepSeek, response).unwrap_err();
        assert_eq!(err.provider(), Provider::DeepSeek);
    }
}
