use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Export-wide metadata from `meta.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMeta {
    pub total_pages: usize,
    #[serde(default)]
    pub total_messages: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Contents of one `pages/page_NNN.json` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFile {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub count: Option<usize>,
    pub messages: Vec<Message>,
}

/// Where the first message of a calendar day lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateLocation {
    pub page: usize,
    pub offset: usize,
}

/// A loaded page: internal index plus its messages in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub messages: Vec<Message>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Date → location lookup built by the exporter (`date_index.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    entries: BTreeMap<NaiveDate, DateLocation>,
}

impl DateIndex {
    pub fn new(entries: BTreeMap<NaiveDate, DateLocation>) -> Self {
        Self { entries }
    }

    /// Build the index the same way the exporter does: first message of each date wins
    pub fn from_messages(messages: &[Message], page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let mut entries = BTreeMap::new();
        for (global_idx, msg) in messages.iter().enumerate() {
            entries.entry(msg.day()).or_insert(DateLocation {
                page: global_idx / page_size,
                offset: global_idx % page_size,
            });
        }
        Self { entries }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<DateLocation> {
        self.entries.get(date).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next_back().copied()
    }
}
