use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use super::{ExportSource, MESSAGES_FILENAME};
use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, DateRange, ExportMeta, Message, Page};
use crate::parsers::read_json_file;
use crate::view::pagination::total_pages_for;

/// Export written as one flat `messages.json`, paged in memory
#[derive(Debug, Clone)]
pub struct SingleFileExport {
    root: PathBuf,
    meta: ExportMeta,
    page_size: usize,
    messages: Vec<Message>,
}

impl SingleFileExport {
    pub fn open(root: &Path, page_size: usize) -> Result<Self> {
        let messages: Vec<Message> = read_json_file(&root.join(MESSAGES_FILENAME))?;
        Ok(Self::from_messages(root, messages, page_size))
    }

    /// Build a source from already-parsed messages (chronological ascending)
    pub fn from_messages(root: &Path, messages: Vec<Message>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        if let Some(pos) = messages.windows(2).position(|w| w[1].datetime < w[0].datetime) {
            warn!(position = pos + 1, "messages.json is not in chronological order");
        }

        let day_of = |msg: Option<&Message>| -> Option<NaiveDate> { msg.map(Message::day) };
        let meta = ExportMeta {
            total_pages: total_pages_for(messages.len(), page_size),
            total_messages: Some(messages.len()),
            page_size: Some(page_size),
            date_range: Some(DateRange {
                from: day_of(messages.first()),
                to: day_of(messages.last()),
            }),
        };

        Self { root: root.to_path_buf(), meta, page_size, messages }
    }
}

impl ExportSource for SingleFileExport {
    fn meta(&self) -> &ExportMeta {
        &self.meta
    }

    fn load_page(&self, index: usize) -> Result<Page> {
        if index >= self.meta.total_pages {
            return Err(ViewerError::PageOutOfRange { index, total: self.meta.total_pages });
        }
        let start = (index * self.page_size).min(self.messages.len());
        let end = (start + self.page_size).min(self.messages.len());
        Ok(Page { index, messages: self.messages[start..end].to_vec() })
    }

    fn load_date_index(&self) -> Result<DateIndex> {
        Ok(DateIndex::from_messages(&self.messages, self.page_size))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
