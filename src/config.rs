use std::env;

use log::{debug, error, info};
use url::Url;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub openwebui_api_key: String,
    /// Base URL of the Open WebUI instance, without a trailing slash.
    pub openwebui_api_base: String,
    pub model_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN").map_err(|e| {
            error!("Failed to load DISCORD_TOKEN from environment: {}", e);
            e
        })?;

        let openwebui_api_key = env::var("OPENWEBUI_API_KEY").map_err(|e| {
            error!("Failed to load OPENWEBUI_API_KEY from environment: {}", e);
            e
        })?;

        let openwebui_api_base = env::var("OPENWEBUI_API_BASE").map_err(|e| {
            error!("Failed to load OPENWEBUI_API_BASE from environment: {}", e);
            e
        })?;

        if let Err(e) = Url::parse(&openwebui_api_base) {
            error!("OPENWEBUI_API_BASE is not a valid URL: {}", e);
            return Err(e.into());
        }
        let openwebui_api_base = openwebui_api_base.trim_end_matches('/').to_string();

        let model_name = env::var("MODEL_NAME").map_err(|e| {
            error!("Failed to load MODEL_NAME from environment: {}", e);
            e
        })?;

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!(
            "Open WebUI API key length: {} characters",
            openwebui_api_key.len()
        );
        debug!("Open WebUI API base: {}", openwebui_api_base);
        debug!("Model name: {}", model_name);

        Ok(Self {
            discord_token,
            openwebui_api_key,
            openwebui_api_base,
            model_name,
        })
    }
}
