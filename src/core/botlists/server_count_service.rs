// Server count reporting - core logic for publishing the connected-guild
// count to bot list sites.
//
// NO Discord or HTTP dependencies here - posting goes through a port.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum BotListError {
    #[error("Bot list API error: {0}")]
    Api(String),
}

// ============================================================================
// CLIENT TRAIT (PORT)
// ============================================================================

/// Trait for posting the guild count to one bot list site.
#[async_trait]
pub trait BotListClient: Send + Sync {
    /// Whether a token is configured; a disabled client is never called.
    fn enabled(&self) -> bool;

    async fn post_server_count(&self, bot_id: u64, server_count: usize)
        -> Result<(), BotListError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Publishes guild counts, skipping reposts of an unchanged count.
pub struct ServerCountService<C: BotListClient> {
    client: C,
    last_posted: DashMap<u64, usize>,
}

impl<C: BotListClient> ServerCountService<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            last_posted: DashMap::new(),
        }
    }

    /// Post the current count. Returns `true` when a post actually went out,
    /// `false` when the client is disabled or the count has not changed
    /// since the last successful post.
    pub async fn publish(&self, bot_id: u64, server_count: usize) -> Result<bool, BotListError> {
        if !self.client.enabled() {
            return Ok(false);
        }

        if self.last_posted.get(&bot_id).map(|c| *c) == Some(server_count) {
            return Ok(false);
        }

        self.client.post_server_count(bot_id, server_count).await?;
        self.last_posted.insert(bot_id, server_count);
        Ok(true)
    }
}

// ============================================================================
// TESTS
// ============================================================================
