// History provider backed by the Discord REST API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

use crate::core::quotes::{ChannelMessage, MessageHistory, QuoteError};

pub struct GatewayHistory {
    http: Arc<serenity::Http>,
}

impl GatewayHistory {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageHistory for GatewayHistory {
    async fn messages_before(
        &self,
        channel_id: u64,
        before: u64,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, QuoteError> {
        let builder = serenity::GetMessages::new()
            .before(serenity::MessageId::new(before))
            .limit(limit);

        let messages = serenity::ChannelId::new(channel_id)
            .messages(&self.http, builder)
            .await
            .map_err(|e| QuoteError::History(e.to_string()))?;

        // Discord pages newest first, which is exactly the search order the
        // core service expects.
        Ok(messages.iter().map(map_message).collect())
    }
}

/// Flatten a serenity message into the core representation.
fn map_message(msg: &serenity::Message) -> ChannelMessage {
    let display_name = msg
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .unwrap_or_else(|| msg.author.display_name().to_string());

    ChannelMessage {
        id: msg.id.get(),
        channel_id: msg.channel_id.get(),
        author_id: msg.author.id.get(),
        author_username: msg.author.name.clone(),
        author_display_name: display_name,
        author_is_bot: msg.author.bot,
        author_avatar_url: msg.author.avatar_url(),
        content: msg.content.clone(),
        created_at: to_utc(msg.timestamp),
        edited_at: msg.edited_timestamp.map(to_utc),
    }
}

fn to_utc(ts: serenity::Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.unix_timestamp(), 0).unwrap_or_default()
}
