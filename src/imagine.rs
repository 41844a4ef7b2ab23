//! `/image` slash command: prompt-to-image generation with the result
//! attached to the reply.

use chrono::Utc;
use log::{error, info};
use poise::CreateReply;
use poise::serenity_prelude::{Colour, CreateAttachment, CreateEmbed};

use crate::answer::ANSWER_COLOUR;
use crate::ask::error_embed;
use crate::bot::Data;
use crate::error::{BotError, Result};

type Context<'a> = poise::Context<'a, Data, BotError>;

/// Generate an image from a prompt.
#[poise::command(slash_command)]
pub async fn image(
    ctx: Context<'_>,
    #[description = "What image do you want?"] prompt: String,
) -> Result<()> {
    info!("Image command started with prompt: {prompt}");
    ctx.defer().await?;

    match generate_image(ctx.data(), &prompt).await {
        Ok((embed, attachment)) => {
            ctx.send(CreateReply::default().embed(embed).attachment(attachment))
                .await?;
        }
        Err(e) => {
            error!("Failed to generate image: {e}");
            ctx.send(CreateReply::default().embed(error_embed(&e)))
                .await?;
        }
    }
    Ok(())
}

/// Request generation, download the first returned image, and build the
/// embed plus attachment for the reply.
async fn generate_image(data: &Data, prompt: &str) -> Result<(CreateEmbed, CreateAttachment)> {
    let images = data.openwebui.generate_image(prompt).await?;
    let first = images
        .first()
        .ok_or_else(|| BotError::OpenWebUiResponse("no image in response".to_string()))?;

    let bytes = data.openwebui.download_image(&first.url).await?;

    let filename = format!("image_{}.png", Utc::now().format("%Y%m%d_%H%M%S"));
    let embed = CreateEmbed::new()
        .title("Generated image")
        .description(prompt)
        .colour(Colour::new(ANSWER_COLOUR))
        .image(format!("attachment://{filename}"));

    Ok((embed, CreateAttachment::bytes(bytes, filename)))
}
