use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `TokenForge`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ForgeError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Palette extraction ───────────────────────────────────────────────
    #[error("palette: {0}")]
    Extraction(#[from] ExtractionError),

    // ── Moodboard analysis ───────────────────────────────────────────────
    #[error("moodboard: {0}")]
    Analysis(#[from] AnalysisError),

    // ── Token generation ─────────────────────────────────────────────────
    #[error("tokens: {0}")]
    Generation(#[from] GenerationError),

    // ── Wizard pipeline ──────────────────────────────────────────────────
    #[error("wizard: {0}")]
    Wizard(#[from] WizardError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Palette extraction errors ──────────────────────────────────────────────

/// Non-fatal: the caller treats this as "no palette available".
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("image is not a base64 data URL")]
    NotADataUrl,

    #[error("image has no usable pixels")]
    Empty,
}

// ─── Model-output parse errors ──────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model returned empty content")]
    EmptyContent,

    #[error("model output was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("model output did not match the expected shape: {0}")]
    Shape(String),
}

// ─── Moodboard analysis errors ──────────────────────────────────────────────

/// Non-fatal: the caller degrades gracefully (moodboard treated as absent).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(String),

    #[error("analysis parse failed: {0}")]
    Parse(#[from] ParseError),
}

// ─── Token generation errors ────────────────────────────────────────────────

/// Fatal to the current pipeline run; no default token set is fabricated.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(String),

    #[error("generation parse failed: {0}")]
    Parse(#[from] ParseError),
}

// ─── Wizard pipeline errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("required fields for step {step} are incomplete")]
    IncompleteStep { step: &'static str },

    #[error("cannot move {direction} from step {step}")]
    NoSuchTransition {
        step: &'static str,
        direction: &'static str,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ForgeError>;
