//! Static HTML snapshot of one page
//!
//! All message-derived strings pass through [`escape_html`]; highlights are
//! the only markup inserted into message bodies.

use super::timestamps::{format_day, format_meta_time};
use super::{AttachmentView, Block, MessageView};
use crate::models::AttachmentKind;
use crate::prefs::Theme;
use crate::view::search::{escape_html, highlight_html};

const STYLE: &str = "\
body{font-family:sans-serif;max-width:48rem;margin:0 auto;padding:1rem}\
body.dark{background:#18181b;color:#fafafa}\
.day-separator{text-align:center;color:#71717a;margin:1rem 0}\
.message-wrapper{display:flex;flex-direction:column;margin:.1rem 0}\
.message-wrapper.self{align-items:flex-end}\
.message-wrapper.start{margin-top:.6rem}\
.message-meta{font-size:.75rem;color:#71717a}\
.message{padding:.4rem .7rem;border-radius:.8rem;background:#e4e4e7;white-space:pre-wrap;max-width:75%}\
.message.self{background:#10b981;color:#fafafa}\
body.dark .message.other{background:#3f3f46}\
.attachments img{max-width:100%;display:block}\
mark{background:#fde047}";

/// Full HTML document for a rendered page
pub fn render_html(title: &str, blocks: &[Block], theme: Theme) -> String {
    let body_class = match theme {
        Theme::Dark => " class=\"dark\"",
        Theme::Light => "",
    };
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str(&format!("<style>{}</style>\n", STYLE));
    out.push_str(&format!("</head>\n<body{}>\n<div id=\"messages\">\n", body_class));
    for block in blocks {
        match block {
            Block::DaySeparator(date) => {
                out.push_str(&format!(
                    "<div class=\"day-separator\">{}</div>\n",
                    escape_html(&format_day(*date))
                ));
            }
            Block::Message(view) => out.push_str(&render_message(view)),
        }
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_message(view: &MessageView) -> String {
    let role = view.message.author.role.as_str();
    let run = if view.group.show_meta { " start" } else { "" };
    let mut out = format!("<div class=\"message-wrapper {}{}\">\n", role, run);

    if view.group.show_meta {
        let edited = if view.message.edited { " (edited)" } else { "" };
        out.push_str(&format!(
            "<div class=\"message-meta\">{} · {}{}</div>\n",
            escape_html(&view.message.author.name),
            escape_html(&format_meta_time(&view.message.datetime)),
            edited
        ));
    }

    out.push_str(&format!(
        "<div class=\"message {}\">{}",
        role,
        highlight_html(view.message.text(), view.highlights)
    ));
    let attachments: Vec<String> = view.attachments.iter().filter_map(render_attachment).collect();
    if !attachments.is_empty() {
        out.push_str("<div class=\"attachments\">");
        out.push_str(&attachments.concat());
        out.push_str("</div>");
    }
    out.push_str("</div>\n</div>\n");
    out
}

fn render_attachment(attachment: &AttachmentView) -> Option<String> {
    let src = attachment.path.as_ref().map(|p| escape_html(&p.display().to_string()));
    match (attachment.kind, src) {
        (AttachmentKind::Photo, Some(src)) => Some(format!("<img src=\"{}\">", src)),
        (AttachmentKind::VoiceMessage, Some(src)) => {
            Some(format!("<audio controls src=\"{}\"></audio>", src))
        }
        (kind, src) => {
            let label = attachment.label.as_deref().unwrap_or(kind.label());
            let href = src.or_else(|| attachment.source_url.as_deref().map(escape_html))?;
            Some(format!("<a href=\"{}\">{}</a>", href, escape_html(label)))
        }
    }
}
