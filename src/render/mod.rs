//! Output-independent render model for one page
//!
//! [`build_blocks`] flattens a grouped page plus its search results into the
//! sequence of things a surface draws: day separators and message bubbles.
//! The terminal UI, the plain-text printer and the HTML snapshot all consume
//! the same blocks, so they agree on what is shown and where.

pub mod html;
pub mod text;
pub mod timestamps;

use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Attachment, AttachmentKind, Message};
use crate::utils::{resolve_attachment_path, strip_ansi_codes};
use crate::view::grouping::{RenderGroup, is_outgoing};
use crate::view::search::{MessageMatch, segments};

/// An attachment ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentView {
    pub kind: AttachmentKind,
    pub label: Option<String>,
    /// Resolved on-disk location, when the file was downloaded and its path is safe
    pub path: Option<PathBuf>,
    pub source_url: Option<String>,
}

impl AttachmentView {
    pub fn resolve(attachment: &Attachment, export_dir: &Path) -> Self {
        let path = attachment.local_path.as_deref().and_then(|local| {
            resolve_attachment_path(export_dir, local)
                .map_err(|e| debug!(local_path = local, error = %e, "attachment path rejected"))
                .ok()
        });
        Self {
            kind: attachment.kind,
            label: attachment.label.clone(),
            path,
            source_url: attachment.source_url.clone(),
        }
    }

    /// "[photo] holiday.jpg -> /data/media/1.jpg"
    pub fn summary(&self) -> String {
        let mut out = format!("[{}]", self.kind.label());
        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            out.push(' ');
            out.push_str(&strip_ansi_codes(label));
        }
        if let Some(path) = &self.path {
            out.push_str(" -> ");
            out.push_str(&path.display().to_string());
        } else if let Some(url) = &self.source_url {
            out.push_str(" -> ");
            out.push_str(&strip_ansi_codes(url));
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct MessageView<'a> {
    /// Index of the message within its page
    pub index: usize,
    pub message: &'a Message,
    pub group: RenderGroup,
    pub outgoing: bool,
    pub highlights: &'a [Range<usize>],
    pub attachments: Vec<AttachmentView>,
}

impl MessageView<'_> {
    /// Message text split along highlight spans, with terminal controls removed
    pub fn sanitized_segments(&self) -> Vec<(String, bool)> {
        segments(self.message.text(), self.highlights)
            .into_iter()
            .map(|(segment, marked)| (strip_ansi_codes(segment), marked))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Block<'a> {
    DaySeparator(NaiveDate),
    Message(MessageView<'a>),
}

/// Flatten a page into drawable blocks.
///
/// `matches` must be aligned with `messages`; hidden messages are skipped but
/// day separators are kept, so the day structure stays the same while
/// searching.
pub fn build_blocks<'a>(
    messages: &'a [Message],
    groups: &[RenderGroup],
    matches: &'a [MessageMatch],
    export_dir: &Path,
) -> Vec<Block<'a>> {
    let mut blocks = Vec::with_capacity(messages.len() + 8);
    for (index, (message, group)) in messages.iter().zip(groups).enumerate() {
        if group.day_boundary {
            blocks.push(Block::DaySeparator(message.day()));
        }
        let (visible, highlights) = match matches.get(index) {
            Some(m) => (m.visible, m.highlights.as_slice()),
            None => (true, &[][..]),
        };
        if !visible {
            continue;
        }
        blocks.push(Block::Message(MessageView {
            index,
            message,
            group: *group,
            outgoing: is_outgoing(message),
            highlights,
            attachments: message
                .attachments
                .iter()
                .map(|a| AttachmentView::resolve(a, export_dir))
                .collect(),
        }));
    }
    blocks
}
