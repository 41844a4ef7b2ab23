//! Mention and DM handler: answers with a paged response on a channel reply,
//! using recent channel history as context.

use std::sync::Arc;

use log::{debug, error, info};
use poise::serenity_prelude::{Context, CreateMessage, Message, UserId};

use crate::ask::{RetrySource, answer_pages, error_embed, generate_answer};
use crate::bot::Data;
use crate::error::Result;
use crate::pager::Paginator;

/// Handle an incoming message, replying when the bot is mentioned or
/// messaged directly.
pub async fn handle_message(ctx: &Context, data: &Data, message: &Message) -> Result<()> {
    let bot_id = ctx.cache.current_user().id;
    if message.author.bot {
        return Ok(());
    }

    let is_dm = message.guild_id.is_none();
    if !is_dm && !message.mentions_user_id(bot_id) {
        return Ok(());
    }

    let question = strip_bot_mention(&message.content, bot_id);
    if question.is_empty() {
        debug!("Ignoring mention with no question");
        return Ok(());
    }

    info!(
        "Mention from {} in channel {}: {}",
        message.author.tag(),
        message.channel_id,
        question
    );

    if let Err(e) = message.channel_id.broadcast_typing(&ctx.http).await {
        debug!("Failed to broadcast typing indicator: {e}");
    }

    let transcript = data.history.transcript(ctx, message.channel_id).await?;
    let prompt = compose_prompt(&transcript, &question);

    match generate_answer(&data.openwebui, &prompt).await {
        Ok(answer) => {
            // The retry prompt is the bare question; the transcript is a
            // point-in-time context that would be stale on retry anyway.
            let pages = answer_pages(&answer, &question);
            let source = Arc::new(RetrySource {
                client: data.openwebui.clone(),
            });
            let mut pager = Paginator::new(message.author.id, pages, source);

            let (embed, components) = pager.first_page();
            let reply = message
                .channel_id
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .reference_message(message)
                        .add_embed(embed)
                        .components(components),
                )
                .await?;

            pager.run(ctx, reply).await
        }
        Err(e) => {
            error!(
                "Failed to answer mention from {}: {}",
                message.author.tag(),
                e
            );
            message
                .channel_id
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .reference_message(message)
                        .add_embed(error_embed(&e)),
                )
                .await?;
            Ok(())
        }
    }
}

/// Remove the bot's mention from the triggering message and trim the rest.
fn strip_bot_mention(content: &str, bot_id: UserId) -> String {
    content
        .replace(&format!("<@{bot_id}>"), "")
        .replace(&format!("<@!{bot_id}>"), "")
        .trim()
        .to_string()
}

/// Prepend the channel transcript to the question so the model sees the
/// conversation so far.
fn compose_prompt(transcript: &str, question: &str) -> String {
    if transcript.is_empty() {
        return question.to_string();
    }
    format!("Recent channel history:\n{transcript}\n\n{question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plain_and_nickname_mentions() {
        let bot_id = UserId::new(42);
        assert_eq!(strip_bot_mention("<@42> hello", bot_id), "hello");
        assert_eq!(strip_bot_mention("<@!42> hello", bot_id), "hello");
        assert_eq!(strip_bot_mention("hello <@42> there", bot_id), "hello  there");
    }

    #[test]
    fn mention_only_message_becomes_empty() {
        let bot_id = UserId::new(42);
        assert_eq!(strip_bot_mention("<@42>", bot_id), "");
        assert_eq!(strip_bot_mention("  <@!42>  ", bot_id), "");
    }

    #[test]
    fn prompt_includes_transcript_when_present() {
        let prompt = compose_prompt("alice: hi\nbob: hey", "what happened?");
        assert!(prompt.starts_with("Recent channel history:\nalice: hi"));
        assert!(prompt.ends_with("what happened?"));
    }

    #[test]
    fn prompt_is_bare_question_without_transcript() {
        assert_eq!(compose_prompt("", "what happened?"), "what happened?");
    }
}
