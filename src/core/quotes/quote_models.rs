// Domain types for quote detection.
//
// NO Discord dependencies here - just pure domain data.

use chrono::{DateTime, Duration, Utc};

/// Which marker triggered the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMarker {
    /// `>` - repost the full matched message.
    Full,
    /// `>>` - repost only the excerpt the user supplied.
    Excerpt,
}

/// A quote request extracted from a trigger message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Author restriction, already reduced from a mention string to the bare
    /// user id when the user mentioned someone. `None` means any author.
    pub author_filter: Option<String>,
    pub marker: QuoteMarker,
    /// Search text, or a literal message id prefix. Never empty.
    pub search_text: String,
}

/// A channel message as seen by the search, detached from any platform type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_username: String,
    /// Guild nickname when set, otherwise the author's display/user name.
    pub author_display_name: String,
    pub author_is_bot: bool,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

/// A successful search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMatch {
    pub message: ChannelMessage,
    /// For excerpt requests, the slice of the matched content the search text
    /// hit, with the matched message's original casing. `None` for full
    /// quotes and for id matches.
    pub excerpt: Option<String>,
}

/// Search window limits. Both caps apply; whichever is hit first ends the
/// scan.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// How many messages are fetched at most per search.
    pub fetch_limit: u8,
    /// Messages older than this (relative to the trigger) are never
    /// inspected. `None` means the count cap alone bounds the search.
    pub max_age: Option<Duration>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 100,
            max_age: None,
        }
    }
}
