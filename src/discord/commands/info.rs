use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Background information about the bot.
#[poise::command(slash_command, prefix_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let embed = build_info_embed(ctx.serenity_context()).await;
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

pub async fn build_info_embed(ctx: &serenity::Context) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title("ParrotBot")
        .description(
            "I repost quoted messages - a functionality Discord still lacks \
            by default. Type an excerpt of an earlier message after a \
            greater-sign and I'll dig it out of the channel history and \
            repost it as an embed.",
        )
        .color(0x5865F2)
        .timestamp(serenity::Timestamp::now());

    // Set thumbnail to bot avatar
    if let Ok(bot_user) = ctx.http.get_current_user().await {
        if let Some(avatar_url) = bot_user.avatar_url() {
            embed = embed.thumbnail(avatar_url);
        }
    }

    embed = embed.field(
        "How it works",
        "I scan a bounded window of recent messages in the channel and \
        repost the most recent one containing your excerpt. Use /help for \
        the full syntax, including author filters and excerpt-only quotes.",
        false,
    );

    embed = embed.field(
        "Free software",
        "My source code is available under the GNU General Public License, \
        version 3 or later. I come without any warranty; see the license for \
        details: http://www.gnu.org/licenses/",
        false,
    );

    embed.footer(serenity::CreateEmbedFooter::new(
        "Happy quoting!",
    ))
}

/// Strip a leading mention of the bot, returning the rest of the message.
/// `None` when the message does not start by mentioning the bot.
pub fn strip_bot_mention(content: &str, bot_id: u64) -> Option<&str> {
    let content = content.trim();
    // Discord renders both mention forms depending on nickname state.
    for prefix in [format!("<@{}>", bot_id), format!("<@!{}>", bot_id)] {
        if let Some(rest) = content.strip_prefix(&prefix) {
            return Some(rest.trim());
        }
    }
    None
}

/// Whether the text after a mention starts a command the framework
/// dispatches itself. Anything else addressed at the bot gets the info
/// message instead.
pub fn is_known_command(rest: &str) -> bool {
    matches!(rest.split_whitespace().next(), Some("help") | Some("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plain_and_nickname_mentions() {
        assert_eq!(strip_bot_mention("<@42> hello", 42), Some("hello"));
        assert_eq!(strip_bot_mention("<@!42>", 42), Some(""));
        assert_eq!(strip_bot_mention("  <@42>   info  ", 42), Some("info"));
    }

    #[test]
    fn other_mentions_and_plain_text_are_not_addressed_to_the_bot() {
        assert_eq!(strip_bot_mention("<@43> hello", 42), None);
        assert_eq!(strip_bot_mention("hello <@42>", 42), None);
        assert_eq!(strip_bot_mention("> hello", 42), None);
    }

    #[test]
    fn known_commands_are_left_to_the_framework() {
        assert!(is_known_command("help"));
        assert!(is_known_command("info"));
        assert!(!is_known_command(""));
        assert!(!is_known_command("what do you do"));
    }
}
