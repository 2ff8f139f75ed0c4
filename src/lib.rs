//! lastseen - browse exported chat transcripts page by page
//!
//! This library reads the static output of a chat exporter and turns it into a
//! paged, grouped, searchable view. It supports:
//!
//! - Chunked (`meta.json` + `pages/`) and single-file (`messages.json`) exports
//! - Newest-first pagination with a per-page cache
//! - Chat-bubble grouping with day separators and a sticky day label
//! - Jumping to the first message of a calendar day
//! - Case-insensitive literal search with highlighted matches
//! - Text, HTML and interactive terminal rendering
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lastseen::{PageLoader, open_export};
//!
//! let source = open_export(Path::new("export"), 100)?;
//! let mut loader = PageLoader::new(source);
//! let newest = loader.meta().total_pages - 1;
//! let page = loader.load(newest)?;
//! println!("{} messages on the newest page", page.len());
//! # Ok::<(), lastseen::ViewerError>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod prefs;
pub mod render;
pub mod source;
pub mod tui;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use models::{DateIndex, ExportMeta, Message, Page};
pub use source::{ExportSource, PageLoader, open_export};
pub use utils::paths::format_path_with_tilde;
pub use view::{ViewController, ViewState};
