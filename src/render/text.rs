use super::timestamps::{format_day, format_meta_time};
use super::{Block, MessageView};
use crate::utils::strip_ansi_codes;

const HIGHLIGHT_OPEN: &str = "«";
const HIGHLIGHT_CLOSE: &str = "»";

/// Plain-text rendition of a page for non-interactive output.
///
/// Outgoing messages are indented; matches are wrapped in `«»`.
pub fn render_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::DaySeparator(date) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("──── {} ────\n", format_day(*date)));
            }
            Block::Message(view) => render_message(&mut out, view),
        }
    }
    out
}

fn render_message(out: &mut String, view: &MessageView) {
    let indent = if view.outgoing { "        " } else { "" };
    if view.group.show_meta {
        out.push_str(indent);
        out.push_str(&meta_line(view));
        out.push('\n');
    }

    let body: String = view
        .sanitized_segments()
        .into_iter()
        .map(|(segment, marked)| {
            if marked { format!("{}{}{}", HIGHLIGHT_OPEN, segment, HIGHLIGHT_CLOSE) } else { segment }
        })
        .collect();
    for line in body.lines() {
        out.push_str(indent);
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    for attachment in &view.attachments {
        out.push_str(indent);
        out.push_str("  ");
        out.push_str(&attachment.summary());
        out.push('\n');
    }
}

/// "Alice · 08 Mar 2021, 14:05", with an "(edited)" suffix when applicable
pub fn meta_line(view: &MessageView) -> String {
    let mut line = format!(
        "{} · {}",
        strip_ansi_codes(&view.message.author.name),
        format_meta_time(&view.message.datetime)
    );
    if view.message.edited {
        line.push_str(" (edited)");
    }
    line
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{Author, Message, Role};
    use crate::render::build_blocks;
    use crate::view::grouping::group;
    use crate::view::search::filter;

    fn msg(name: &str, role: Role, datetime: &str, text: &str) -> Message {
        Message {
            id: None,
            datetime: NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S").unwrap(),
            author: Author { name: name.to_string(), role, vk_id: None },
            text: Some(text.to_string()),
            attachments: vec![],
            edited: false,
        }
    }

    #[test]
    fn test_render_text_layout() {
        let messages = vec![
            msg("Alice", Role::Other, "2021-03-08T14:05:00", "hi"),
            msg("Alice", Role::Other, "2021-03-08T14:06:00", "again"),
            msg("Me", Role::Me, "2021-03-08T14:07:00", "hello"),
        ];
        let groups = group(&messages);
        let matches = filter("", &messages);
        let blocks = build_blocks(&messages, &groups, &matches, Path::new("/x/export"));

        let text = render_text(&blocks);
        let expected = "──── 8 March 2021 ────\n\
                        Alice · 08 Mar 2021, 14:05\n  hi\n  again\n        \
                        Me · 08 Mar 2021, 14:07\n          hello\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_marks_matches() {
        let messages = vec![msg("A", Role::Other, "2021-03-08T14:05:00", "a.b and axb")];
        let groups = group(&messages);
        let matches = filter("a.b", &messages);
        let blocks = build_blocks(&messages, &groups, &matches, Path::new("/x/export"));

        assert!(render_text(&blocks).contains("  «a.b» and axb\n"));
    }
}
