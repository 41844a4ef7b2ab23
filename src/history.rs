//! Channel transcript fetching with a short-lived per-channel cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;
use mime::Mime;
use poise::serenity_prelude::{ChannelId, Context, GetMessages, Message};
use tokio::sync::Mutex;

use crate::error::Result;

const HISTORY_LIMIT: u8 = 100;
const CACHE_TTL: Duration = Duration::from_secs(30);

struct CachedTranscript {
    fetched_at: Instant,
    transcript: String,
}

/// Per-channel transcript cache, owned by the bot's service-lifetime data and
/// shared by reference with the handlers that need it.
#[derive(Default)]
pub struct HistoryCache {
    entries: Mutex<HashMap<ChannelId, CachedTranscript>>,
}

impl HistoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recent channel history as `author: content` lines, oldest first.
    /// Served from cache while the entry is fresh.
    pub async fn transcript(&self, ctx: &Context, channel_id: ChannelId) -> Result<String> {
        {
            let entries = self.entries.lock().await;
            if let Some(cached) = entries.get(&channel_id)
                && cached.fetched_at.elapsed() < CACHE_TTL
            {
                debug!("Using cached transcript for channel {channel_id}");
                return Ok(cached.transcript.clone());
            }
        }

        debug!("Fetching channel history for {channel_id}");
        let messages = channel_id
            .messages(&ctx.http, GetMessages::new().limit(HISTORY_LIMIT))
            .await?;
        let transcript = format_transcript(&messages);

        let mut entries = self.entries.lock().await;
        entries.insert(
            channel_id,
            CachedTranscript {
                fetched_at: Instant::now(),
                transcript: transcript.clone(),
            },
        );
        Ok(transcript)
    }
}

/// Render fetched messages (newest first, as the API returns them) into an
/// oldest-first transcript, noting image attachments inline.
fn format_transcript(messages: &[Message]) -> String {
    let mut lines = Vec::with_capacity(messages.len());
    for message in messages.iter().rev() {
        let mut line = format!("{}: {}", message.author.name, message.content);
        for attachment in &message.attachments {
            if is_image_attachment(attachment.content_type.as_deref()) {
                line.push_str(&format!(" [Image: {}]", attachment.url));
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Check whether an attachment's content type is an image.
fn is_image_attachment(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.parse::<Mime>().ok())
        .is_some_and(|mime| mime.type_() == mime::IMAGE)
}
