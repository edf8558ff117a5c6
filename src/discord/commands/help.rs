use crate::core::botlists::ServerCountService;
use crate::core::quotes::QuoteService;
use crate::infra::botlists::TopGgClient;
use crate::infra::history::GatewayHistory;
use poise::serenity_prelude as serenity;

/// Explain how to quote other users' messages.
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let mut embed = serenity::CreateEmbed::new()
        .title("Quoting made easy")
        .description(
            "Type a greater-sign followed by an excerpt from the message you \
            want to quote, and I will find it and repost it. If I picked the \
            wrong message, use a longer excerpt.",
        )
        .color(serenity::Colour::from_rgb(88, 101, 242))
        .timestamp(serenity::Timestamp::now())
        .field("Quote a message", "```> sample excerpt```", false)
        .field(
            "Only search one user's messages",
            "Put their name, id, or mention before the marker.\n```sample_user > sample excerpt```",
            false,
        )
        .field(
            "Repost just your excerpt",
            "Use two greater-signs instead of one.\n```>> sample```",
            false,
        )
        .field(
            "Quote by message id",
            "A single-marker request whose text is the start of a message id \
            matches that exact message.",
            false,
        );

    if let Ok(user) = ctx.framework().bot_id.to_user(&ctx).await {
        embed = embed.thumbnail(user.face());
    }

    embed = embed.footer(serenity::CreateEmbedFooter::new(
        "Use /info for background on the bot.",
    ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Type alias for our bot's context.
/// This is what every command receives as its first parameter.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands.
/// This is where we store our services and configuration.
use std::sync::Arc;

pub struct Data {
    pub quotes: Arc<QuoteService<GatewayHistory>>,
    pub botlists: Arc<ServerCountService<TopGgClient>>,
    pub settings: BotSettings,
}

/// Runtime settings the event handlers need after startup.
pub struct BotSettings {
    /// Activity text shown in the bot's profile, if configured.
    pub presence: Option<String>,
    /// Log every connected guild on ready.
    pub log_guild_list: bool,
}
