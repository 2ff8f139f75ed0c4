//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for export directories on disk.
///
/// The export lives in `<tmp>/export`, so attachment paths such as
/// `media/photo.jpg` resolve to `<tmp>/media/photo.jpg`.
pub struct ExportDirBuilder {
    temp_dir: TempDir,
}

impl ExportDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("export")).expect("Failed to create export dir");
        Self { temp_dir }
    }

    /// The directory handed to the viewer
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("export")
    }

    /// Parent of the export directory (where `media/` lives)
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a chunked export: `meta.json`, `pages/page_NNN.json`, `date_index.json`
    pub fn chunked(self, messages: &[MessageBuilder], page_size: usize) -> Self {
        let total_pages = messages.len().div_ceil(page_size).max(1);
        let first = messages.first().map(|m| m.day());
        let last = messages.last().map(|m| m.day());
        let meta = json!({
            "total_pages": total_pages,
            "total_messages": messages.len(),
            "page_size": page_size,
            "date_range": {"from": first, "to": last},
        });
        let this = self.with_file("meta.json", &meta.to_string());

        for page in 0..total_pages {
            let chunk: Vec<Value> = messages
                .iter()
                .skip(page * page_size)
                .take(page_size)
                .map(MessageBuilder::to_json)
                .collect();
            let body = json!({
                "page": page,
                "page_size": page_size,
                "count": chunk.len(),
                "messages": chunk,
            });
            this.write(&format!("pages/page_{:03}.json", page), &body.to_string());
        }

        this.with_date_index(&date_index_for(messages, page_size))
    }

    /// Write a single-file export (`messages.json`)
    pub fn single_file(self, messages: &[MessageBuilder]) -> Self {
        let body: Vec<Value> = messages.iter().map(MessageBuilder::to_json).collect();
        self.with_file("messages.json", &Value::Array(body).to_string())
    }

    pub fn with_date_index(self, index: &BTreeMap<String, (usize, usize)>) -> Self {
        let body: serde_json::Map<String, Value> = index
            .iter()
            .map(|(day, (page, offset))| (day.clone(), json!({"page": page, "offset": offset})))
            .collect();
        self.with_file("date_index.json", &Value::Object(body).to_string())
    }

    /// Write a file relative to the export directory, creating parents
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write a file next to the export directory (e.g. downloaded media)
    pub fn with_media(self, relative: &str, content: &[u8]) -> Self {
        let path = self.temp_dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create media dir");
        fs::write(path, content).expect("Failed to write media file");
        self
    }

    pub fn remove(self, relative: &str) -> Self {
        fs::remove_file(self.path().join(relative)).expect("Failed to remove file");
        self
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
        fs::write(path, content).expect("Failed to write file");
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ExportDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// First `(page, offset)` of every day, as the exporter computes it
pub fn date_index_for(
    messages: &[MessageBuilder],
    page_size: usize,
) -> BTreeMap<String, (usize, usize)> {
    let mut index = BTreeMap::new();
    for (i, message) in messages.iter().enumerate() {
        index.entry(message.day()).or_insert((i / page_size, i % page_size));
    }
    index
}

/// Builder for one exported message
#[derive(Clone)]
pub struct MessageBuilder {
    name: String,
    role: String,
    datetime: String,
    text: Option<String>,
    attachments: Vec<Value>,
    edited: bool,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            name: "Alice".to_string(),
            role: "other".to_string(),
            datetime: "2021-03-08T14:05:00".to_string(),
            text: Some("Hello".to_string()),
            attachments: Vec::new(),
            edited: false,
        }
    }

    /// A message from the export owner
    pub fn outgoing(mut self) -> Self {
        self.name = "Me".to_string();
        self.role = "self".to_string();
        self
    }

    pub fn author(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn at(mut self, datetime: &str) -> Self {
        self.datetime = datetime.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn no_text(mut self) -> Self {
        self.text = None;
        self
    }

    pub fn edited(mut self) -> Self {
        self.edited = true;
        self
    }

    pub fn attachment(mut self, kind: &str, local_path: Option<&str>) -> Self {
        self.attachments.push(json!({"type": kind, "local_path": local_path}));
        self
    }

    pub fn day(&self) -> String {
        self.datetime[..10].to_string()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "datetime": self.datetime,
            "author": {"name": self.name, "role": self.role},
            "text": self.text,
            "attachments": self.attachments,
            "edited": self.edited,
        })
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` messages from one author, one minute apart, spread over days of
/// `per_day` messages starting 2021-01-01
pub fn conversation(count: usize, per_day: usize) -> Vec<MessageBuilder> {
    (0..count)
        .map(|i| {
            let day = i / per_day + 1;
            let minute = i % per_day;
            let date = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
                + chrono::Duration::days(day as i64 - 1);
            MessageBuilder::new()
                .at(&format!("{}T{:02}:{:02}:00", date, 8 + minute / 60, minute % 60))
                .text(&format!("message {}", i))
        })
        .collect()
}
