//! `/question` and `/get_model_name` slash commands and the answer flow
//! shared with the mention handler.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use poise::CreateReply;
use poise::serenity_prelude::{
    Colour, ComponentInteraction, Context as SerenityContext, CreateEmbed, EditInteractionResponse,
};

use crate::answer::{ERROR_COLOUR, GeneratedAnswer};
use crate::bot::Data;
use crate::error::{BotError, Result};
use crate::openwebui::OpenWebUiClient;
use crate::pager::{AnswerPages, Paginator, ResponseSource};

/// Context type for slash commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

/// Ask a question and get a text reply.
#[poise::command(slash_command)]
pub async fn question(
    ctx: Context<'_>,
    #[description = "What is your question?"] prompt: String,
) -> Result<()> {
    info!("Question command started with prompt: {prompt}");
    ctx.defer().await?;

    let answer = match generate_answer(&ctx.data().openwebui, &prompt).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("Failed to generate answer: {e}");
            ctx.send(CreateReply::default().embed(error_embed(&e)))
                .await?;
            return Ok(());
        }
    };

    let pages = answer_pages(&answer, &prompt);
    let source = Arc::new(RetrySource {
        client: ctx.data().openwebui.clone(),
    });
    let mut pager = Paginator::new(ctx.author().id, pages, source);

    let (embed, components) = pager.first_page();
    let handle = ctx
        .send(CreateReply::default().embed(embed).components(components))
        .await?;
    let message = handle.into_message().await?;

    pager.run(ctx.serenity_context(), message).await
}

/// Returns the name of the currently loaded LLM.
#[poise::command(slash_command)]
pub async fn get_model_name(ctx: Context<'_>) -> Result<()> {
    ctx.say(ctx.data().openwebui.model_name().to_string())
        .await?;
    Ok(())
}

/// Run a chat completion and parse it into a displayable answer.
pub async fn generate_answer(client: &OpenWebUiClient, prompt: &str) -> Result<GeneratedAnswer> {
    let completion = client.chat(prompt).await?;
    GeneratedAnswer::from_completion(&completion)
}

/// Page source over a generated answer, keyed on the asking prompt.
#[must_use]
pub fn answer_pages(answer: &GeneratedAnswer, question: &str) -> AnswerPages {
    AnswerPages::new(
        answer.title.clone(),
        answer.colour,
        &answer.answer,
        &answer.thought,
        &answer.sources,
        question,
    )
}

/// Red embed shown when a remote request fails.
#[must_use]
pub fn error_embed(error: &BotError) -> CreateEmbed {
    CreateEmbed::new()
        .title("Failed to get response")
        .description(error.user_message())
        .colour(Colour::new(ERROR_COLOUR))
}

/// Regenerates an answer in place when the pager's retry control is pressed.
///
/// The regenerated answer replaces the retried message and is served by a
/// fresh pager session starting at page 1.
#[derive(Clone)]
pub struct RetrySource {
    pub client: OpenWebUiClient,
}

#[async_trait]
impl ResponseSource for RetrySource {
    async fn regenerate(
        &self,
        ctx: &SerenityContext,
        interaction: &ComponentInteraction,
        prompt: &str,
    ) -> Result<()> {
        info!("Regenerating answer for prompt: {prompt}");
        let answer = generate_answer(&self.client, prompt).await?;

        let pages = answer_pages(&answer, prompt);
        let mut pager = Paginator::new(interaction.user.id, pages, Arc::new(self.clone()));

        let (embed, components) = pager.first_page();
        let message = interaction
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new()
                    .embed(embed)
                    .components(components),
            )
            .await?;

        pager.run(ctx, message).await
    }
}
