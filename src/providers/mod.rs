pub mod openai;
pub mod traits;

pub use openai::OpenAiProvider;
pub use traits::{Completion, CompletionRequest};

use crate::config::Config;
use std::sync::Arc;

const MAX_API_ERROR_CHARS: usize = 200;

/// Build the completion provider from the loaded config.
pub fn create_provider(config: &Config) -> Arc<dyn Completion> {
    Arc::new(OpenAiProvider::with_base_url(
        config.api_key.as_deref(),
        &config.model,
        config.base_url.as_deref(),
    ))
}

/// Reduce an upstream API error body to something loggable: truncated, with
/// any bearer credential redacted. Providers echo request headers in some
/// error payloads; those must never reach logs verbatim.
pub fn sanitize_api_error(body: &str) -> String {
    let mut sanitized = body.trim().to_string();

    // Resume each scan past the inserted placeholder, or the find would
    // match it again at the same index.
    let mut search_from = 0;
    while let Some(offset) = sanitized[search_from..].find("Bearer ") {
        let start = search_from + offset;
        let token_start = start + "Bearer ".len();
        let token_end = sanitized[token_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            .map_or(sanitized.len(), |i| token_start + i);
        sanitized.replace_range(start..token_end, "Bearer [REDACTED]");
        search_from = start + "Bearer [REDACTED]".len();
    }

    if sanitized.chars().count() > MAX_API_ERROR_CHARS {
        let truncated: String = sanitized.chars().take(MAX_API_ERROR_CHARS).collect();
        sanitized = format!("{truncated}…");
    }
    sanitized
}

/// Build an `anyhow` error from a non-2xx provider response, consuming the
/// body for diagnostics.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::anyhow!("{provider} API error {status}: {}", sanitize_api_error(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates_long_bodies() {
        let long = "x".repeat(500);
        let out = sanitize_api_error(&long);
        assert!(out.chars().count() <= MAX_API_ERROR_CHARS + 1);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn sanitize_redacts_bearer_tokens() {
        let body = r#"{"error":"bad header Authorization: Bearer sk-secret-123"}"#;
        let out = sanitize_api_error(body);
        assert!(!out.contains("sk-secret-123"));
        assert!(out.contains("[REDACTED]"));
    }

    #[test]
    fn sanitize_leaves_short_clean_bodies_alone() {
        assert_eq!(sanitize_api_error("model not found"), "model not found");
    }

    #[test]
    fn sanitize_redacts_every_bearer_token_and_terminates() {
        let body = "first Bearer sk-one then Bearer sk-two end";
        let out = sanitize_api_error(body);
        assert_eq!(out, "first Bearer [REDACTED] then Bearer [REDACTED] end");
    }

    #[test]
    fn sanitize_handles_a_bearer_token_at_the_end_of_the_body() {
        let out = sanitize_api_error("unauthorized: Bearer sk-tail");
        assert_eq!(out, "unauthorized: Bearer [REDACTED]");
    }
}
