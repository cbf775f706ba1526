//! Fence-tolerant parsing of model output.
//!
//! Chat models frequently wrap JSON answers in a markdown code fence even
//! when told not to. The gateway never trusts raw output: it strips one
//! optional leading/trailing fence pair and then parses strictly, returning
//! a tagged [`ParseError`] instead of panicking or silently yielding an
//! empty object.

use crate::error::ParseError;

/// Strip a single surrounding triple-backtick fence, with an optional
/// language tag on the opening line (e.g. ```` ```json ````).
///
/// Unfenced input is returned unchanged. Only an outermost fence pair is
/// removed; interior backticks are left alone.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag: everything up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        // Single-line fence like ```{"a":1}``` — no tag to drop.
        None => rest,
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Strip any code fence, then parse strictly as JSON.
pub fn parse_model_json(raw: &str) -> Result<serde_json::Value, ParseError> {
    let clean = strip_code_fence(raw);
    if clean.is_empty() {
        return Err(ParseError::EmptyContent);
    }
    serde_json::from_str(clean).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Parse fence-stripped model output into a concrete type.
pub fn parse_model_response<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    let value = parse_model_json(raw)?;
    serde_json::from_value(value).map_err(|e| ParseError::Shape(e.to_string()))
}
