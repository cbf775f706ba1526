use async_trait::async_trait;

/// One completion request against the model API.
///
/// `image_data_url`, when present, is attached as an inline visual input
/// alongside the text prompt; providers without vision support may ignore it.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub image_data_url: Option<&'a str>,
    pub max_tokens: u32,
}

impl<'a> CompletionRequest<'a> {
    pub fn text(system: &'a str, prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            system,
            prompt,
            image_data_url: None,
            max_tokens,
        }
    }

    pub fn with_image(mut self, image_data_url: Option<&'a str>) -> Self {
        self.image_data_url = image_data_url;
        self
    }
}

/// Boundary to the external LLM completion API.
///
/// Implementations return the raw text of the first completion choice;
/// callers own all parsing and shaping of that text.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> anyhow::Result<String>;
}
