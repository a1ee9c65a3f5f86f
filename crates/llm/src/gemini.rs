//! Google Gemini `generateContent`.

use adscript_core::provider::Provider;
use serde::{Deserialize, Serialize};

use crate::client::{non_empty, LlmClient};
use crate::error::ProviderError;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// `POST {base}/v1beta/models/{model}:generateContent?key={api_key}`
pub(crate) async fn generate(
    client: &LlmClient,
    base: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    let url = format!("{base}/v1beta/models/{model}:generateContent");
    let body = GenerateContentRequest {
        contents: [Content {
            parts: [RequestPart { text: prompt }],
        }],
    };

    let response: GenerateContentResponse = client
        .post_json(Provider::Gemini, &url, &[("key", api_key)], &[], &body)
        .await?;
    extract_text(response)
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: Provider::Gemini,
            detail: "missing candidates[0].content".to_string(),
        })?;

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    non_empty(Provider::Gemini, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_all_parts_of_first_candidate() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"前半"},{"text":"後半"}],"role":"model"}},
                              {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "前半後半");
    }

    #[test]
    fn blocked_prompt_without_candidates_is_malformed() {
        let response = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"contents":[{"parts":[{"text":"hi"}]}]})
        );
    }
}
