use crate::providers::traits::{Completion, CompletionRequest};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiProvider {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    cached_completions_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self::with_base_url(api_key, model, None)
    }

    pub fn with_base_url(api_key: Option<&str>, model: &str, base_url: Option<&str>) -> Self {
        let base = base_url
            .map_or("https://api.openai.com", |u| u.trim_end_matches('/'))
            .to_string();
        Self {
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            cached_completions_url: format!("{base}/v1/chat/completions"),
            model: model.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request(&self, request: &CompletionRequest<'_>) -> ChatRequest {
        let user_content = match request.image_data_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: url.to_string(),
                    },
                },
            ]),
            None => MessageContent::Text(request.prompt.to_string()),
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(request.system.to_string()),
                },
                Message {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens: request.max_tokens,
        }
    }

    fn extract_text(chat_response: ChatResponse) -> anyhow::Result<String> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))
    }
}

#[async_trait]
impl Completion for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> anyhow::Result<String> {
        let auth_header = self.cached_auth_header.as_ref().ok_or_else(|| {
            anyhow::anyhow!("OpenAI API key not set. Set OPENAI_API_KEY or edit config.toml.")
        })?;

        let body = self.build_request(&request);
        let response = self
            .client
            .post(&self.cached_completions_url)
            .header("Authorization", auth_header)
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            return Err(super::api_error("OpenAI", response).await);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("OpenAI response JSON decode failed")?;
        Self::extract_text(chat_response)
    }
}
