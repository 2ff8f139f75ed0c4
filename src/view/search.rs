//! Per-page text search with highlight spans.
//!
//! Matching is a case-insensitive literal substring test against message text.
//! The query is escaped before it is turned into a regex, so `a.b` only
//! matches the three characters `a.b`. Visibility and highlights come from the
//! same scan, so a visible message always has at least one highlight.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::models::Message;

/// Longest query accepted from the search box
pub const MAX_QUERY_LEN: usize = 256;

/// Search outcome for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMatch {
    pub visible: bool,
    /// Byte ranges into the message text, ascending and non-overlapping
    pub highlights: Vec<Range<usize>>,
}

impl MessageMatch {
    pub fn unfiltered() -> Self {
        Self { visible: true, highlights: Vec::new() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: String,
    matcher: Option<Regex>,
}

impl SearchFilter {
    /// Build a filter; a blank query produces an inactive filter
    pub fn new(query: &str) -> Self {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Self::default();
        }
        let matcher = RegexBuilder::new(&regex::escape(&query))
            .case_insensitive(true)
            .build()
            .map_err(|e| warn!(error = %e, "search query could not be compiled"))
            .ok();
        Self { query, matcher }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// All non-overlapping occurrences of the query in `text`
    pub fn highlight_spans(&self, text: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
            None => Vec::new(),
        }
    }

    pub fn match_message(&self, message: &Message) -> MessageMatch {
        if !self.is_active() {
            return MessageMatch::unfiltered();
        }
        let highlights = self.highlight_spans(message.text());
        MessageMatch { visible: !highlights.is_empty(), highlights }
    }

    /// Evaluate the filter against every rendered message, in order
    pub fn apply(&self, messages: &[Message]) -> Vec<MessageMatch> {
        messages.iter().map(|m| self.match_message(m)).collect()
    }
}

/// Convenience wrapper: `filter(query, messages)`
pub fn filter(query: &str, messages: &[Message]) -> Vec<MessageMatch> {
    SearchFilter::new(query).apply(messages)
}

/// Split `text` into `(segment, highlighted)` pieces along `spans`
pub fn segments<'a>(text: &'a str, spans: &[Range<usize>]) -> Vec<(&'a str, bool)> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut pos = 0;
    for span in spans {
        if span.start < pos || span.end > text.len() {
            continue;
        }
        if span.start > pos {
            out.push((&text[pos..span.start], false));
        }
        out.push((&text[span.clone()], true));
        pos = span.end;
    }
    if pos < text.len() {
        out.push((&text[pos..], false));
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HTML for a message body with `<mark>` around each span.
///
/// Every segment is escaped before wrapping, so markup inside the message
/// (or inside a match) is shown literally.
pub fn highlight_html(text: &str, spans: &[Range<usize>]) -> String {
    segments(text, spans)
        .into_iter()
        .map(|(segment, marked)| {
            let escaped = escape_html(segment);
            if marked { format!("<mark>{}</mark>", escaped) } else { escaped }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{Attachment, AttachmentKind, Author, Role};

    fn msg(text: Option<&str>) -> Message {
        Message {
            id: None,
            datetime: NaiveDateTime::parse_from_str("2021-01-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            author: Author { name: "A".to_string(), role: Role::Other, vk_id: None },
            text: text.map(str::to_string),
            attachments: vec![],
            edited: false,
        }
    }

    fn visible(results: &[MessageMatch]) -> Vec<bool> {
        results.iter().map(|r| r.visible).collect()
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let filter = SearchFilter::new("a.b");
        let text = "a.b and axb";
        let spans = filter.highlight_spans(text);
        assert_eq!(spans, vec![0..3]);
        assert_eq!(&text[spans[0].clone()], "a.b");
    }

    #[test]
    fn test_other_metacharacters() {
        for query in ["(", "[x]", "a+", "^$", "\\d", "*"] {
            let filter = SearchFilter::new(query);
            let text = format!("prefix {} suffix", query);
            assert_eq!(filter.highlight_spans(&text).len(), 1, "query {:?}", query);
            assert!(filter.highlight_spans("nothing here").is_empty());
        }
    }

    #[test]
    fn test_case_insensitive_all_occurrences() {
        let filter = SearchFilter::new("Hello");
        let text = "hello HELLO hElLo";
        assert_eq!(filter.highlight_spans(text), vec![0..5, 6..11, 12..17]);
    }

    #[test]
    fn test_cyrillic_case_insensitive() {
        let filter = SearchFilter::new("привет");
        let text = "Привет, ПРИВЕТ";
        assert_eq!(filter.highlight_spans(text).len(), 2);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let messages = vec![msg(Some("one")), msg(None), msg(Some("two"))];
        for query in ["", "   ", "\t\n"] {
            let results = filter(query, &messages);
            assert_eq!(visible(&results), vec![true, true, true]);
            assert!(results.iter().all(|r| r.highlights.is_empty()));
        }
    }

    #[test]
    fn test_hides_non_matching_and_textless() {
        let messages = vec![msg(Some("Cat picture")), msg(None), msg(Some("dog"))];
        let results = filter("cat", &messages);
        assert_eq!(visible(&results), vec![true, false, false]);
        assert_eq!(results[0].highlights, vec![0..3]);
    }

    #[test]
    fn test_attachments_are_not_searched() {
        let mut m = msg(Some("look"));
        m.attachments.push(Attachment {
            kind: AttachmentKind::Photo,
            local_path: Some("media/cat.jpg".to_string()),
            label: Some("cat".to_string()),
            source_url: None,
        });
        assert!(!filter("cat", &[m])[0].visible);
    }

    #[test]
    fn test_query_is_trimmed() {
        let filter = SearchFilter::new("  dog ");
        assert_eq!(filter.query(), "dog");
        assert_eq!(filter.highlight_spans("hotdog"), vec![3..6]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let messages = vec![msg(Some("abc")), msg(Some("xyz")), msg(Some("ABCabc"))];
        let once = filter("abc", &messages);
        let twice = filter("abc", &messages);
        assert_eq!(once, twice);
        assert_eq!(visible(&once), vec![true, false, true]);
    }

    #[test]
    fn test_highlight_html_escapes_markup() {
        let text = "<b>bold</b> & <script>x</script>";
        let filter = SearchFilter::new("bold");
        let html = highlight_html(text, &filter.highlight_spans(text));
        assert_eq!(
            html,
            "&lt;b&gt;<mark>bold</mark>&lt;/b&gt; &amp; &lt;script&gt;x&lt;/script&gt;"
        );
    }

    #[test]
    fn test_match_containing_markup_is_escaped() {
        let text = "press <enter> now";
        let filter = SearchFilter::new("<enter>");
        let html = highlight_html(text, &filter.highlight_spans(text));
        assert_eq!(html, "press <mark>&lt;enter&gt;</mark> now");
    }

    #[test]
    fn test_highlight_html_without_spans() {
        assert_eq!(highlight_html("a \"q\" 'x'", &[]), "a &quot;q&quot; &#39;x&#39;");
    }

    #[test]
    fn test_segments_cover_whole_text() {
        let text = "abcabc";
        let parts = segments(text, &[1..2, 4..5]);
        assert_eq!(
            parts,
            vec![("a", false), ("b", true), ("ca", false), ("b", true), ("c", false)]
        );
        let joined: String = parts.iter().map(|(s, _)| *s).collect();
        assert_eq!(joined, text);
    }
}
