//! Interactive Discord widget over a [`PageProvider`].
//!
//! One `Paginator` is created per triggering interaction and owns a single
//! rendered message. It serves button presses one at a time until the
//! inactivity timeout elapses, at which point the buttons are stripped and
//! the session ends. The timeout is re-armed after every handled press.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use poise::serenity_prelude::{
    ButtonStyle, Colour, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, EditMessage, Message, ReactionType, UserId,
};

use crate::error::Result;

use super::nav::{Controls, NavAction, NavState};
use super::page::{Page, PageProvider};

/// How long a pager waits for a button press before tearing itself down.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(100);

const DENIAL_COLOUR: u32 = 0x00FF_0000;
const DENIAL_NOTICE: &str = "Only the author of the command can perform this action.";

const PREVIOUS_ID: &str = "pager_previous";
const NEXT_ID: &str = "pager_next";
const JUMP_ID: &str = "pager_jump";
const RETRY_ID: &str = "pager_retry";

/// Regenerates an answer for a retried prompt and drives a fresh pager
/// session on the retried message. Errors are reported back so the calling
/// session can restore its retry control and continue.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    async fn regenerate(
        &self,
        ctx: &Context,
        interaction: &ComponentInteraction,
        prompt: &str,
    ) -> Result<()>;
}

/// Stateful navigation controller over the pages of one answer.
pub struct Paginator<P: PageProvider> {
    provider: P,
    owner: UserId,
    source: Arc<dyn ResponseSource>,
    nav: NavState,
}

impl<P: PageProvider> Paginator<P> {
    #[must_use]
    pub fn new(owner: UserId, provider: P, source: Arc<dyn ResponseSource>) -> Self {
        Self {
            provider,
            owner,
            source,
            nav: NavState::new(),
        }
    }

    /// Render the first page. The caller attaches the result to whichever
    /// surface hosts this session before handing the message to [`run`].
    ///
    /// [`run`]: Self::run
    pub fn first_page(&mut self) -> (CreateEmbed, Vec<CreateActionRow>) {
        self.render(false)
    }

    /// Serve button presses on `message` until the inactivity timeout.
    ///
    /// The first page must already be displayed on `message`. A successful
    /// retry hands the message over to the regenerated session and ends this
    /// one.
    pub async fn run(mut self, ctx: &Context, mut message: Message) -> Result<()> {
        loop {
            let Some(press) = message
                .await_component_interaction(&ctx.shard)
                .timeout(INACTIVITY_TIMEOUT)
                .await
            else {
                strip_controls(ctx, &mut message).await;
                return Ok(());
            };

            if press.user.id != self.owner {
                self.deny(ctx, &press).await;
                continue;
            }

            match press.data.custom_id.as_str() {
                PREVIOUS_ID => {
                    self.nav.apply(NavAction::Previous);
                    self.edit_page(ctx, &press).await?;
                }
                NEXT_ID => {
                    self.nav.apply(NavAction::Next);
                    self.edit_page(ctx, &press).await?;
                }
                JUMP_ID => {
                    self.nav.apply(NavAction::JumpEnd);
                    self.edit_page(ctx, &press).await?;
                }
                RETRY_ID => {
                    if self.retry(ctx, &press).await? {
                        return Ok(());
                    }
                }
                other => {
                    debug!("Ignoring unknown pager component: {other}");
                }
            }
        }
    }

    /// Invoke the provider for the current index and build the embed plus
    /// button row, recording the reported page count.
    fn render(&mut self, retry_disabled: bool) -> (CreateEmbed, Vec<CreateActionRow>) {
        let (page, total) = self.provider.get_page(self.nav.index);
        self.nav.record_total(total);
        let mut controls = self.nav.controls();
        controls.retry_disabled = retry_disabled;
        (build_embed(&page), vec![button_row(&controls)])
    }

    /// Re-render the current page in place as the response to a press.
    async fn edit_page(&mut self, ctx: &Context, press: &ComponentInteraction) -> Result<()> {
        let (embed, components) = self.render(false);
        press
            .create_response(
                &ctx.http,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .components(components),
                ),
            )
            .await?;
        Ok(())
    }

    /// Handle a retry press. Returns true when the regenerated session has
    /// taken over the surface and this session should end.
    async fn retry(&mut self, ctx: &Context, press: &ComponentInteraction) -> Result<bool> {
        let (page, total) = self.provider.get_page(self.nav.index);
        self.nav.record_total(total);

        let prompt = page.question.clone();
        if prompt.is_empty() {
            debug!("Retry pressed but the page carries no question");
            press
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
            return Ok(false);
        }

        info!("Retry prompt: {prompt}");

        // Disable the retry control so the regeneration cannot be
        // re-submitted while it is in flight.
        let mut controls = self.nav.controls();
        controls.retry_disabled = true;
        press
            .create_response(
                &ctx.http,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(build_embed(&page))
                        .components(vec![button_row(&controls)]),
                ),
            )
            .await?;

        if let Err(e) = press.channel_id.broadcast_typing(&ctx.http).await {
            debug!("Failed to broadcast typing indicator: {e}");
        }

        match self.source.regenerate(ctx, press, &prompt).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!("Retry regeneration failed: {e}");
                let (embed, components) = self.render(false);
                if let Err(edit_err) = press
                    .edit_response(
                        &ctx.http,
                        EditInteractionResponse::new()
                            .embed(embed)
                            .components(components),
                    )
                    .await
                {
                    debug!("Failed to restore retry control: {edit_err}");
                }
                Ok(false)
            }
        }
    }

    /// Ephemeral denial for presses from anyone but the session owner.
    async fn deny(&self, ctx: &Context, press: &ComponentInteraction) {
        debug!(
            "Denied pager interaction from {} (owner is {})",
            press.user.id, self.owner
        );
        let embed = CreateEmbed::new()
            .description(DENIAL_NOTICE)
            .colour(Colour::new(DENIAL_COLOUR));
        if let Err(e) = press
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .ephemeral(true),
                ),
            )
            .await
        {
            warn!("Failed to send denial notice: {e}");
        }
    }
}

/// Best-effort removal of the buttons once a session times out. The rendered
/// content stays visible; a vanished message is not an error.
async fn strip_controls(ctx: &Context, message: &mut Message) {
    debug!("Pager timed out, removing controls");
    if let Err(e) = message
        .edit(&ctx.http, EditMessage::new().components(Vec::new()))
        .await
    {
        debug!("Failed to strip controls after timeout: {e}");
    }
}

fn build_embed(page: &Page) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(page.title.as_str())
        .description(page.body.as_str())
        .colour(Colour::new(page.colour));
    if let Some(thought) = &page.thought {
        embed = embed.field(thought.heading.as_str(), thought.text.as_str(), false);
    }
    if !page.question.is_empty() {
        embed = embed.field("Question", page.question.as_str(), false);
    }
    if !page.sources.is_empty() {
        embed = embed.field("Sources", page.sources.as_str(), false);
    }
    if let Some(footer) = &page.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer.as_str()));
    }
    embed
}

fn button_row(controls: &Controls) -> CreateActionRow {
    let jump_emoji = if controls.jump_to_end {
        "⏭️"
    } else {
        "⏮️"
    };
    CreateActionRow::Buttons(vec![
        CreateButton::new(PREVIOUS_ID)
            .emoji(ReactionType::Unicode("◀️".to_string()))
            .style(ButtonStyle::Primary)
            .disabled(controls.previous_disabled),
        CreateButton::new(NEXT_ID)
            .emoji(ReactionType::Unicode("▶️".to_string()))
            .style(ButtonStyle::Primary)
            .disabled(controls.next_disabled),
        CreateButton::new(JUMP_ID)
            .emoji(ReactionType::Unicode(jump_emoji.to_string()))
            .style(ButtonStyle::Primary)
            .disabled(controls.jump_disabled),
        CreateButton::new(RETRY_ID)
            .emoji(ReactionType::Unicode("↩️".to_string()))
            .style(ButtonStyle::Primary)
            .disabled(controls.retry_disabled),
    ])
}
