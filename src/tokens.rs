//! Token generation: turn the accumulated wizard state into a structured
//! design-token set via one model call.

use crate::error::{GenerationError, ParseError};
use crate::parse::parse_model_json;
use crate::providers::{Completion, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

const GENERATION_MAX_TOKENS: u32 = 1000;

const GENERATION_SYSTEM_PROMPT: &str = "You are a brand design assistant. Generate a valid JSON \
     design token set based on the brand input and moodboard image. Return only a JSON object \
     in the following format.";

/// A generated design-token set.
///
/// The four category maps are flat string-to-string; `illustrations` is the
/// only sequence-valued field. Values are deliberately NOT validated (no hex
/// or CSS-length checks) — downstream rendering tolerates arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub color: BTreeMap<String, String>,
    pub font: BTreeMap<String, String>,
    pub spacing: BTreeMap<String, String>,
    pub radius: BTreeMap<String, String>,
    #[serde(default)]
    pub illustrations: Vec<String>,
}

/// Wire body of `POST /generate-tokens`.
///
/// Every field is string-typed: the original client stored each wizard step
/// answer as a session-storage string and submitted them back verbatim, so
/// warmth/brightness arrive as decimal strings, and niche as a joined list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub brand_name: String,
    pub purpose: String,
    pub values: String,
    pub niche: String,
    pub theme: String,
    pub warmth: String,
    pub brightness: String,
    pub typography: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moodboard_image_base64: Option<String>,
}

pub struct TokenGenerator {
    provider: Arc<dyn Completion>,
}

impl TokenGenerator {
    pub fn new(provider: Arc<dyn Completion>) -> Self {
        Self { provider }
    }

    fn build_prompt(request: &GenerateRequest) -> String {
        format!(
            "Please return only a JSON object in this format:\n\n\
             {{\n  \
               \"color\": {{ \"primary\": \"...\", \"background\": \"...\", \"text\": \"...\" }},\n  \
               \"font\": {{ \"family\": \"...\", \"base\": \"...\", \"h1\": \"...\" }},\n  \
               \"spacing\": {{ \"sm\": \"...\", \"md\": \"...\", \"lg\": \"...\" }},\n  \
               \"radius\": {{ \"md\": \"...\" }},\n  \
               \"illustrations\": [\"3D illustration prompt or URL 1\", \"3D illustration prompt or URL 2\", \"3D illustration prompt or URL 3\"]\n\
             }}\n\n\
             Do not include markdown or explanation.\n\n\
             Brand Name: {}\n\
             Purpose: {}\n\
             Values: {}\n\
             Niche: {}\n\
             Theme: {}\n\
             Warmth: {}\n\
             Brightness: {}\n\
             Typography: {}",
            request.brand_name,
            request.purpose,
            request.values,
            request.niche,
            request.theme,
            request.warmth,
            request.brightness,
            request.typography,
        )
    }

    /// One model call with the full accumulated wizard state. On any
    /// failure the caller gets an error — never a partial or default set.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<TokenSet, GenerationError> {
        let prompt = Self::build_prompt(request);
        let raw = self
            .provider
            .complete(
                CompletionRequest::text(GENERATION_SYSTEM_PROMPT, &prompt, GENERATION_MAX_TOKENS)
                    .with_image(request.moodboard_image_base64.as_deref()),
            )
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let value = parse_model_json(&raw).map_err(GenerationError::Parse)?;
        let tokens: TokenSet = serde_json::from_value(value)
            .map_err(|e| GenerationError::Parse(ParseError::Shape(e.to_string())))?;
        Ok(tokens)
    }
}
