// Quote detection service - core business logic for finding the quoted
// message.
//
// Given a parsed request, the service scans recent channel history, newest
// first, and returns the most recent message that satisfies the request.
//
// NO Discord dependencies here - history access goes through a port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::quote_models::{ChannelMessage, QuoteConfig, QuoteMarker, QuoteMatch, QuoteRequest};
use super::quote_parser::QuoteParser;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("History fetch failed: {0}")]
    History(String),
}

// ============================================================================
// HISTORY PORT
// ============================================================================

/// Trait for reading recent channel history.
///
/// Implementations must return messages strictly older than `before`,
/// ordered newest first; the search relies on that order for its
/// most-recent-wins rule.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    async fn messages_before(
        &self,
        channel_id: u64,
        before: u64,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, QuoteError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Quote detection over a bounded window of channel history.
pub struct QuoteService<H: MessageHistory> {
    history: H,
    config: QuoteConfig,
    parser: QuoteParser,
}

impl<H: MessageHistory> QuoteService<H> {
    pub fn new(history: H, config: QuoteConfig) -> Self {
        Self {
            history,
            config,
            parser: QuoteParser::new(),
        }
    }

    /// Parse raw message text into a quote request, if it is one.
    pub fn parse_request(&self, content: &str) -> Option<QuoteRequest> {
        self.parser.parse(content)
    }

    /// Scan the channel's history before the trigger message for the most
    /// recent message satisfying the request.
    ///
    /// A candidate matches when all of the following hold:
    /// - the author filter is absent or matches the candidate's author;
    /// - the candidate's author is not a bot;
    /// - the candidate is not itself a quote request;
    /// - the search text is a prefix of the candidate's message id (full
    ///   quotes only) or occurs case-insensitively in its content.
    ///
    /// `Ok(None)` means nothing in the window matched; that is not an error.
    pub async fn find_quote(
        &self,
        channel_id: u64,
        before: u64,
        requested_at: DateTime<Utc>,
        request: &QuoteRequest,
    ) -> Result<Option<QuoteMatch>, QuoteError> {
        let candidates = self
            .history
            .messages_before(channel_id, before, self.config.fetch_limit)
            .await?;

        let cutoff = self.config.max_age.map(|age| requested_at - age);

        for message in candidates {
            if let Some(cutoff) = cutoff {
                // Newest first, so everything from here on is too old.
                if message.created_at < cutoff {
                    return Ok(None);
                }
            }

            if let Some(filter) = &request.author_filter {
                if !author_matches(&message, filter) {
                    continue;
                }
            }

            if message.author_is_bot || message.content.starts_with('>') {
                continue;
            }

            if request.marker == QuoteMarker::Full
                && message.id.to_string().starts_with(&request.search_text)
            {
                return Ok(Some(QuoteMatch {
                    message,
                    excerpt: None,
                }));
            }

            if let Some(hit) = find_ignore_case(&message.content, &request.search_text) {
                let excerpt = match request.marker {
                    QuoteMarker::Excerpt => Some(hit.to_string()),
                    QuoteMarker::Full => None,
                };
                return Ok(Some(QuoteMatch { message, excerpt }));
            }
        }

        Ok(None)
    }
}

/// Check whether a filter string refers to a message's author.
///
/// The filter matches when it is a prefix of the author id's decimal form,
/// or a case-insensitive substring of the username or display name. Filter
/// text is always treated literally.
pub fn author_matches(message: &ChannelMessage, filter: &str) -> bool {
    if message.author_id.to_string().starts_with(filter) {
        return true;
    }

    let filter_lower = filter.to_lowercase();
    message
        .author_username
        .to_lowercase()
        .contains(&filter_lower)
        || message
            .author_display_name
            .to_lowercase()
            .contains(&filter_lower)
}

/// Case-insensitive substring search that returns the matching slice with
/// the haystack's original casing.
///
/// Lowercasing can change byte lengths (e.g. 'İ' grows by a byte), so the
/// lowered text is built alongside a per-byte map back to the original
/// character offsets and the match is translated through it.
fn find_ignore_case<'a>(haystack: &'a str, needle: &str) -> Option<&'a str> {
    let needle_lower = needle.to_lowercase();

    let mut lowered = String::with_capacity(haystack.len());
    let mut back_map = Vec::with_capacity(haystack.len());
    for (offset, ch) in haystack.char_indices() {
        for folded in ch.to_lowercase() {
            for _ in 0..folded.len_utf8() {
                back_map.push(offset);
            }
            lowered.push(folded);
        }
    }

    let start_lower = lowered.find(&needle_lower)?;
    let end_lower = start_lower + needle_lower.len();

    let start = *back_map.get(start_lower)?;
    // The last matched byte pins the final original character; the slice
    // runs to the end of that character.
    let last = *back_map.get(end_lower.checked_sub(1)?)?;
    let end = last + haystack.get(last..)?.chars().next()?.len_utf8();

    haystack.get(start..end)
}

// ============================================================================
// TESTS
// ============================================================================
