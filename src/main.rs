// This is the entry point of the quote bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Discord REST, bot list APIs)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::botlists::ServerCountService;
use crate::core::quotes::{QuoteConfig, QuoteService};
use crate::discord::commands::help::BotSettings;
use crate::discord::commands::info;
use crate::discord::quotes as quote_handler;
use crate::discord::{Data, Error};
use crate::infra::botlists::TopGgClient;
use crate::infra::history::GatewayHistory;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// This is where quote requests get picked up.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            // Ignore bot messages (including our own)
            if new_message.author.bot {
                return Ok(());
            }

            // Messages addressed to the bot are commands. The framework
            // dispatches the known ones through its mention prefix; anything
            // else gets the info message, like an unknown command would.
            let bot_id = ctx.cache.current_user().id.get();
            if let Some(rest) = info::strip_bot_mention(&new_message.content, bot_id) {
                if !info::is_known_command(rest) {
                    let embed = info::build_info_embed(ctx).await;
                    if let Err(e) = new_message
                        .channel_id
                        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
                        .await
                    {
                        tracing::warn!("Failed to send info message: {}", e);
                    }
                }
                return Ok(());
            }

            if let Err(e) = quote_handler::handle_message(ctx, new_message, data).await {
                tracing::error!("Error handling quote request: {}", e);
            }
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            let guild_count = data_about_bot.guilds.len();
            tracing::info!(guild_count, "Bot is ready");

            if data.settings.log_guild_list {
                for guild in &data_about_bot.guilds {
                    tracing::info!(guild_id = guild.id.get(), "Connected guild");
                }
            }

            if let Some(presence) = &data.settings.presence {
                ctx.set_presence(
                    Some(serenity::ActivityData::playing(presence.clone())),
                    serenity::OnlineStatus::Online,
                );
            }

            publish_server_count(ctx, data).await;
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            if is_new.unwrap_or(false) {
                tracing::info!(guild_id = guild.id.get(), guild_name = %guild.name, "Joined guild");
            }
            publish_server_count(ctx, data).await;
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            tracing::info!(guild_id = incomplete.id.get(), "Left guild");
            publish_server_count(ctx, data).await;
        }

        _ => {}
    }

    Ok(())
}

/// Report the connected-guild count to configured bot list sites.
async fn publish_server_count(ctx: &serenity::Context, data: &Data) {
    let bot_id = ctx.cache.current_user().id.get();
    let guild_count = ctx.cache.guilds().len();

    match data.botlists.publish(bot_id, guild_count).await {
        Ok(true) => tracing::info!(guild_count, "Posted server count to bot lists"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Failed to post server count: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Get Discord bot token from environment
    let token = std::env::var("DISCORD_TOKEN").context(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    )?;

    // Search window: a message count cap (Discord pages at most 100) and an
    // optional age cap.
    let fetch_limit = std::env::var("QUOTE_FETCH_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(100)
        .clamp(1, 100);
    let max_age = std::env::var("QUOTE_MAX_AGE_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(chrono::Duration::hours);
    let quote_config = QuoteConfig {
        fetch_limit,
        max_age,
    };

    let presence = std::env::var("BOT_PRESENCE").ok().filter(|v| !v.is_empty());
    let log_guild_list = std::env::var("LOG_GUILD_LIST")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);
    let topgg_token = std::env::var("TOPGG_TOKEN").ok().filter(|v| !v.is_empty());

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // The history provider needs the HTTP client serenity builds for us, so
    // the quote service is wired up in the framework setup callback below.

    let botlist_client =
        TopGgClient::new(topgg_token).context("Failed to create Top.gg client")?;
    let botlists = Arc::new(ServerCountService::new(botlist_client));

    let settings = BotSettings {
        presence,
        log_guild_list,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Configure the poise framework with our commands and settings.

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT; // Required to read message content

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Register all our commands here
            commands: vec![
                discord::commands::help::help(),
                discord::commands::info::info(),
            ],
            // Event handler for quote requests and lifecycle events
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                // Register slash commands globally (can take up to an hour
                // to propagate)
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let history = GatewayHistory::new(ctx.http.clone());
                let quotes = Arc::new(QuoteService::new(history, quote_config));

                Ok(Data {
                    quotes,
                    botlists,
                    settings,
                })
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;

    Ok(())
}
