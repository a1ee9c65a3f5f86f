use adscript_core::provider::Provider;

/// Errors from a single vendor call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("{} request failed: {source}", .provider.display_name())]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor returned a non-2xx status code.
    #[error("{} API error ({status}): {message}", .provider.display_name())]
    Status {
        provider: Provider,
        status: u16,
        /// The vendor's `error.message`, or the raw body if it was not JSON.
        message: String,
    },

    /// A 2xx response without usable text at the expected location.
    #[error("{} returned an unexpected response: {detail}", .provider.display_name())]
    MalformedResponse { provider: Provider, detail: String },
}

impl ProviderError {
    pub fn provider(&self) -> Provider {
        match self {
            Self::Request { provider, .. }
            | Self::Status { provider, .. }
            | Self::MalformedResponse { provider, .. } => *provider,
        }
    }

    /// The vendor's HTTP status, if the vendor answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of a vendor error body.
///
/// All four vendors wrap errors as `{"error": {"message": ...}}`; anything
/// else is returned verbatim.
pub(crate) fn vendor_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
