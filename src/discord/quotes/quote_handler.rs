// Discord-specific quote handling - translates core search results into
// Discord actions.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call core service
// 3. Format the response based on the result
//
// This layer is THIN - no business logic, just translation.

use crate::core::quotes::{humanize_delta, QuoteMatch};
use crate::discord::{Data, Error};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

/// Check a message for a quote request and repost the matched message.
///
/// Returns `true` when the message was a request that produced a repost.
/// No match, malformed requests, and platform failures all leave the
/// trigger message untouched.
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<bool, Error> {
    // Skip bots
    if msg.author.bot {
        return Ok(false);
    }

    // Only quote inside guild channels (not DMs)
    let guild_id = match msg.guild_id {
        Some(id) => id,
        None => return Ok(false),
    };

    let request = match data.quotes.parse_request(&msg.content) {
        Some(request) => request,
        None => return Ok(false),
    };

    let requested_at = DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .unwrap_or_else(Utc::now);

    let quote = match data
        .quotes
        .find_quote(msg.channel_id.get(), msg.id.get(), requested_at, &request)
        .await
    {
        Ok(Some(quote)) => quote,
        Ok(None) => {
            tracing::debug!(
                channel_id = msg.channel_id.get(),
                "No message in the window matched the quote request"
            );
            return Ok(false);
        }
        Err(e) => {
            tracing::warn!("Quote search failed: {}", e);
            return Ok(false);
        }
    };

    let embed = build_quote_embed(msg, &quote, guild_id);

    if let Err(e) = msg
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to send quote embed: {}", e);
        return Ok(false);
    }

    // The embed replaces the trigger message; a denied delete is tolerated.
    if let Err(e) = msg.delete(&ctx.http).await {
        tracing::warn!("Failed to delete quote request message: {}", e);
    }

    tracing::info!(
        guild_id = guild_id.get(),
        channel_id = msg.channel_id.get(),
        quoted_message_id = quote.message.id,
        "Reposted a quoted message"
    );

    Ok(true)
}

/// Build the embed that represents the quoted message: the quoted author in
/// the author block, the content (or excerpt) plus a jump link in the
/// description, and the quoting user in the footer.
fn build_quote_embed(
    trigger: &serenity::Message,
    quote: &QuoteMatch,
    guild_id: serenity::GuildId,
) -> serenity::CreateEmbed {
    let quoted = &quote.message;

    let jump_link = format!(
        "https://discord.com/channels/{}/{}/{}",
        guild_id.get(),
        quoted.channel_id,
        quoted.id
    );

    let description = match &quote.excerpt {
        Some(excerpt) => excerpt.clone(),
        None => format!("{}\n[↑]({})", quoted.content, jump_link),
    };

    let quoting_name = trigger
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .unwrap_or_else(|| trigger.author.display_name().to_string());

    let mut footer_text = format!("Quoted by {}.", quoting_name);
    if let Some(edited_at) = quoted.edited_at {
        footer_text.push_str(&format!(
            " Edited {} later.",
            humanize_delta(edited_at - quoted.created_at)
        ));
    }

    let mut footer = serenity::CreateEmbedFooter::new(footer_text);
    if let Some(url) = trigger.author.avatar_url() {
        footer = footer.icon_url(url);
    }

    let mut author = serenity::CreateEmbedAuthor::new(quoted.author_display_name.clone());
    if let Some(url) = &quoted.author_avatar_url {
        author = author.icon_url(url);
    }

    let timestamp = serenity::Timestamp::from_unix_timestamp(quoted.created_at.timestamp())
        .unwrap_or_else(|_| serenity::Timestamp::now());

    serenity::CreateEmbed::new()
        .author(author)
        .description(description)
        .footer(footer)
        .timestamp(timestamp)
}
