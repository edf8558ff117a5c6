// Recognises quote requests in raw message text.
//
// The grammar is `[author] > text` for a full quote and `[author] >> text`
// for an excerpt, where the author part is either a mention string or a
// plain name fragment. The whole message must match; anything else is not a
// request.

use regex::Regex;

use super::quote_models::{QuoteMarker, QuoteRequest};

pub struct QuoteParser {
    re_full: Regex,
    re_excerpt: Regex,
    re_mention: Regex,
}

impl QuoteParser {
    pub fn new() -> Self {
        Self {
            re_full: Regex::new(r"\A\s*(?P<author>(?:<.*?>)|(?:.*?))\s*>\s*(?P<content>.+)\z")
                .expect("full quote pattern is valid"),
            re_excerpt: Regex::new(r"\A\s*(?P<author>(?:<.*?>)|(?:.*?))\s*>>\s*(?P<content>.+)\z")
                .expect("excerpt quote pattern is valid"),
            re_mention: Regex::new(r"<@!?(?P<id>.*?)>").expect("mention pattern is valid"),
        }
    }

    /// Try to parse `content` as a quote request. The excerpt marker wins
    /// when both forms could match. Whitespace-only search text counts as
    /// malformed and yields `None`.
    pub fn parse(&self, content: &str) -> Option<QuoteRequest> {
        if let Some(caps) = self.re_excerpt.captures(content) {
            return self.build_request(&caps, QuoteMarker::Excerpt);
        }
        if let Some(caps) = self.re_full.captures(content) {
            return self.build_request(&caps, QuoteMarker::Full);
        }
        None
    }

    fn build_request(&self, caps: &regex::Captures, marker: QuoteMarker) -> Option<QuoteRequest> {
        let search_text = caps.name("content")?.as_str().trim();
        if search_text.is_empty() {
            return None;
        }

        let author = caps.name("author").map(|m| m.as_str().trim()).unwrap_or("");
        let author_filter = if author.is_empty() {
            None
        } else if let Some(mention) = self.re_mention.captures(author) {
            // A mention string collapses to the bare user id it carries.
            Some(mention["id"].to_string())
        } else {
            Some(author.to_string())
        };

        Some(QuoteRequest {
            author_filter,
            marker,
            search_text: search_text.to_string(),
        })
    }
}

impl Default for QuoteParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> QuoteParser {
        QuoteParser::new()
    }

    #[test]
    fn plain_quote_has_no_author_filter() {
        let request = parser().parse("> hello world").unwrap();
        assert_eq!(request.marker, QuoteMarker::Full);
        assert_eq!(request.author_filter, None);
        assert_eq!(request.search_text, "hello world");
    }

    #[test]
    fn author_prefix_becomes_filter() {
        let request = parser().parse("sample_user > hello").unwrap();
        assert_eq!(request.author_filter.as_deref(), Some("sample_user"));
        assert_eq!(request.search_text, "hello");
    }

    #[test]
    fn double_marker_is_excerpt() {
        let request = parser().parse(">> just this part").unwrap();
        assert_eq!(request.marker, QuoteMarker::Excerpt);
        assert_eq!(request.search_text, "just this part");
    }

    #[test]
    fn excerpt_with_author() {
        let request = parser().parse("alice >> bit of text").unwrap();
        assert_eq!(request.marker, QuoteMarker::Excerpt);
        assert_eq!(request.author_filter.as_deref(), Some("alice"));
        assert_eq!(request.search_text, "bit of text");
    }

    #[test]
    fn mention_author_reduces_to_id() {
        let request = parser().parse("<@123456> > hello").unwrap();
        assert_eq!(request.author_filter.as_deref(), Some("123456"));

        let request = parser().parse("<@!123456> > hello").unwrap();
        assert_eq!(request.author_filter.as_deref(), Some("123456"));
    }

    #[test]
    fn search_text_keeps_later_markers() {
        let request = parser().parse("a > b > c").unwrap();
        assert_eq!(request.author_filter.as_deref(), Some("a"));
        assert_eq!(request.search_text, "b > c");
    }

    #[test]
    fn empty_search_text_is_malformed() {
        assert_eq!(parser().parse(">"), None);
        assert_eq!(parser().parse("> "), None);
        assert_eq!(parser().parse("someone >>  "), None);
    }

    #[test]
    fn ordinary_messages_are_not_requests() {
        assert_eq!(parser().parse("hello world"), None);
        assert_eq!(parser().parse(""), None);
        assert_eq!(parser().parse("1 < 2"), None);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let request = parser().parse("   > hello").unwrap();
        assert_eq!(request.search_text, "hello");
        assert_eq!(request.author_filter, None);
    }
}
