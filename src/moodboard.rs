//! Moodboard analysis: ask the model to label the dominant palette color
//! and classify an overall style. The model never contributes colors — the
//! returned palette is always the one extracted client-side.

use crate::error::AnalysisError;
use crate::palette::Palette;
use crate::parse::parse_model_response;
use crate::providers::{Completion, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const ANALYSIS_MAX_TOKENS: u32 = 300;

const ANALYSIS_SYSTEM_PROMPT: &str = "You are a brand design assistant. Given a color palette, \
     return a JSON object with: mainColor (name and hex of the first color), style (suggested \
     style, e.g. Minimal, Luxury, Playful, etc.). Do NOT generate or change the palette. \
     Do NOT invent new colors.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: String,
}

/// Result of one moodboard analysis.
///
/// Invariant: `colors` is exactly the palette that was sent in the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodboardAnalysis {
    pub main_color: NamedColor,
    pub style: String,
    pub colors: Palette,
}

/// The two keys the model is asked for. Everything else in its output is
/// discarded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelVerdict {
    main_color: NamedColor,
    style: String,
}

pub struct MoodboardAnalyzer {
    provider: Arc<dyn Completion>,
}

impl MoodboardAnalyzer {
    pub fn new(provider: Arc<dyn Completion>) -> Self {
        Self { provider }
    }

    fn build_prompt(palette: &Palette) -> String {
        format!(
            "Given this color palette: {}\n\
             Return only a JSON object in this format:\n\
             {{\n  \"mainColor\": {{ \"name\": \"...\", \"hex\": \"...\" }},\n  \"style\": \"...\"\n}}",
            palette.to_comma_list()
        )
    }

    /// Label and classify the palette. The uploaded image itself is not
    /// forwarded to the model; the palette carries all the color signal and
    /// the model's only job is naming and style classification.
    pub async fn analyze(&self, palette: &Palette) -> Result<MoodboardAnalysis, AnalysisError> {
        let prompt = Self::build_prompt(palette);
        let raw = self
            .provider
            .complete(CompletionRequest::text(
                ANALYSIS_SYSTEM_PROMPT,
                &prompt,
                ANALYSIS_MAX_TOKENS,
            ))
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let verdict: ModelVerdict = parse_model_response(&raw)?;

        // Never trust the model's echo of the palette.
        Ok(MoodboardAnalysis {
            main_color: verdict.main_color,
            style: verdict.style,
            colors: palette.clone(),
        })
    }
}
