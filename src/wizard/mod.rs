//! Wizard state: the accumulated brand brief and the rules for moving
//! between steps.
//!
//! The state is an explicit context object threaded through the pipeline
//! driver — there are no ambient globals. Each step mutates only its own
//! fields through [`WizardStore::set`].

pub mod pipeline;

pub use pipeline::{PipelineOutcome, WizardDriver};

use crate::error::WizardError;
use crate::tokens::GenerateRequest;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The six visual style ids offered on the style step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Minimal,
    Bold,
    Editorial,
    Luxury,
    Playful,
    Futuristic,
}

/// The four typography ids offered on the style step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Typography {
    Modern,
    Classic,
    Techy,
    Friendly,
}

/// Industry niches selectable on the identity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Niche {
    Tech,
    Fashion,
    Health,
    Finance,
    Nonprofit,
}

/// The linear step sequence. Transitions are forward/backward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Identity,
    StylePreferences,
    Moodboard,
    Generating,
    Preview,
}

impl WizardStep {
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::StylePreferences => "style-preferences",
            Self::Moodboard => "moodboard",
            Self::Generating => "generating",
            Self::Preview => "preview",
        }
    }
}

/// Mutable record accumulated across steps. Lives for the wizard session
/// and is destroyed on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub brand_name: String,
    pub purpose: String,
    pub values: String,
    pub niche: Vec<Niche>,
    pub theme: Option<Theme>,
    pub warmth: u8,
    pub brightness: u8,
    pub typography: Option<Typography>,
    /// Base64 data URL of the uploaded moodboard image. Always optional.
    pub moodboard_image: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            brand_name: String::new(),
            purpose: String::new(),
            values: String::new(),
            niche: Vec::new(),
            theme: None,
            // Slider defaults from the style step.
            warmth: 40,
            brightness: 40,
            typography: None,
            moodboard_image: None,
        }
    }
}

/// Per-step field updates. Each variant can only touch its own step's
/// slice of the state.
#[derive(Debug, Clone)]
pub enum StepFields {
    Identity {
        brand_name: String,
        purpose: String,
        values: String,
        niche: Vec<Niche>,
    },
    Style {
        theme: Theme,
        warmth: u8,
        brightness: u8,
        typography: Typography,
    },
    Moodboard {
        image: Option<String>,
    },
}

/// Explicit context object owning the wizard state.
#[derive(Debug, Default)]
pub struct WizardStore {
    state: WizardState,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &WizardState {
        &self.state
    }

    pub fn set(&mut self, fields: StepFields) {
        match fields {
            StepFields::Identity {
                brand_name,
                purpose,
                values,
                niche,
            } => {
                self.state.brand_name = brand_name;
                self.state.purpose = purpose;
                self.state.values = values;
                self.state.niche = niche;
            }
            StepFields::Style {
                theme,
                warmth,
                brightness,
                typography,
            } => {
                self.state.theme = Some(theme);
                self.state.warmth = warmth.min(100);
                self.state.brightness = brightness.min(100);
                self.state.typography = Some(typography);
            }
            StepFields::Moodboard { image } => {
                self.state.moodboard_image = image;
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = WizardState::default();
    }

    /// Whether the given step's required fields are filled. Moving forward
    /// is blocked while this is false.
    pub fn is_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Identity => {
                !self.state.brand_name.trim().is_empty()
                    && !self.state.purpose.trim().is_empty()
                    && !self.state.values.trim().is_empty()
            }
            WizardStep::StylePreferences => {
                self.state.theme.is_some() && self.state.typography.is_some()
            }
            // Moodboard is always optional; the remaining steps collect
            // nothing.
            WizardStep::Moodboard | WizardStep::Generating | WizardStep::Preview => true,
        }
    }

    pub fn require_complete(&self, step: WizardStep) -> Result<(), WizardError> {
        if self.is_complete(step) {
            Ok(())
        } else {
            Err(WizardError::IncompleteStep { step: step.name() })
        }
    }

    /// Serialize the accumulated state into the token-generation request
    /// body, string-typed exactly as stored.
    pub fn to_generate_request(&self) -> GenerateRequest {
        GenerateRequest {
            brand_name: self.state.brand_name.clone(),
            purpose: self.state.purpose.clone(),
            values: self.state.values.clone(),
            niche: self
                .state
                .niche
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            theme: self.state.theme.map(|t| t.to_string()).unwrap_or_default(),
            warmth: self.state.warmth.to_string(),
            brightness: self.state.brightness.to_string(),
            typography: self
                .state
                .typography
                .map(|t| t.to_string())
                .unwrap_or_default(),
            moodboard_image_base64: self.state.moodboard_image.clone(),
        }
    }
}
