//! HTTP client for the Open WebUI chat-completion and image-generation
//! endpoints.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

const CHAT_ENDPOINT: &str = "/api/chat/completions";
const IMAGE_ENDPOINT: &str = "/api/v1/images/generations";

/// Image model loaded on the Open WebUI instance.
const IMAGE_MODEL: &str = "dreamshaper_8";

/// Fixed chat id so Open WebUI does not create a new chat per request.
const CHAT_ID: &str = "4a299940-11b4-49e7-9844-5c39e2a2955c";

// Web-search-backed completions can take a while.
const CHAT_TIMEOUT: Duration = Duration::from_secs(600);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(600);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    chat_id: &'static str,
    stream: bool,
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    features: Features,
    background_tasks: BackgroundTasks,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Features {
    image_generation: bool,
    code_interpreter: bool,
    voice: bool,
    web_search: bool,
}

#[derive(Debug, Serialize)]
struct BackgroundTasks {
    title_generation: bool,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'static str,
    prompt: &'a str,
}

/// A chat completion as returned by Open WebUI. Every nested field the bot
/// reads is optional upstream, so everything defaults rather than fails.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub source: Option<SourceOrigin>,
    #[serde(default)]
    pub metadata: Vec<SourceLink>,
}

#[derive(Debug, Deserialize)]
pub struct SourceOrigin {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SourceLink {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// One generated image reference; the URL is a download endpoint relative to
/// the API base.
#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

#[derive(Clone)]
pub struct OpenWebUiClient {
    api_key: String,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OpenWebUiClient {
    #[must_use]
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self {
            api_key,
            api_base,
            model,
            client: reqwest::Client::new(),
        }
    }

    /// Name of the chat model this client is configured for.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send a single-turn chat completion request.
    pub async fn chat(&self, prompt: &str) -> Result<ChatCompletion> {
        debug!("Sending chat request to Open WebUI");

        let request = ChatRequest {
            chat_id: CHAT_ID,
            stream: false,
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            features: Features {
                image_generation: false,
                code_interpreter: false,
                voice: false,
                web_search: true,
            },
            background_tasks: BackgroundTasks {
                title_generation: true,
            },
        };

        let response = self
            .client
            .post(format!("{}{CHAT_ENDPOINT}", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(CHAT_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::OpenWebUiApi { status, message });
        }

        let completion: ChatCompletion = response.json().await?;
        debug!(
            "Received chat completion with {} choices and {} sources",
            completion.choices.len(),
            completion.sources.len()
        );
        Ok(completion)
    }

    /// Request image generation for a prompt.
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<GeneratedImage>> {
        debug!("Sending image generation request to Open WebUI");

        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
        };

        let response = self
            .client
            .post(format!("{}{IMAGE_ENDPOINT}", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(IMAGE_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::OpenWebUiApi { status, message });
        }

        Ok(response.json().await?)
    }

    /// Download a generated image from its endpoint on the same instance.
    pub async fn download_image(&self, endpoint: &str) -> Result<Vec<u8>> {
        debug!("Downloading generated image from {endpoint}");

        let response = self
            .client
            .get(format!("{}{endpoint}", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::OpenWebUiApi { status, message });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
