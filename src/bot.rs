//! Discord bot wiring and event dispatch.

use log::{debug, info};
use poise::{
    Framework, FrameworkOptions, builtins,
    serenity_prelude::{ClientBuilder, Context, FullEvent, GatewayIntents},
};

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryCache;
use crate::mention;
use crate::openwebui::OpenWebUiClient;
use crate::{ask, imagine};

type EventResult = Result<()>;

/// Process-wide state shared with every command and event handler.
pub struct Data {
    pub openwebui: OpenWebUiClient,
    pub history: HistoryCache,
}

/// Run the Discord bot.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing Open WebUI client");
    let openwebui = OpenWebUiClient::new(
        config.openwebui_api_key.clone(),
        config.openwebui_api_base.clone(),
        config.model_name.clone(),
    );

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let discord_token = config.discord_token.clone();

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![ask::question(), ask::get_model_name(), imagine::image()],
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot is ready and connected as {}", ready.user.name);
                debug!("Registering commands globally");
                builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully");
                Ok(Data {
                    openwebui,
                    history: HistoryCache::new(),
                })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> EventResult {
    match event {
        FullEvent::Message { new_message } => {
            mention::handle_message(ctx, data, new_message).await?;
        }
        FullEvent::Resume { .. } => {
            info!("Gateway connection resumed");
        }
        _ => {}
    }
    Ok(())
}
