//! Read-only access to an exported transcript
//!
//! Two on-disk layouts are supported behind the [`ExportSource`] trait:
//!
//! - **Chunked** ([`ChunkedExport`]): `meta.json`, `date_index.json` and
//!   `pages/page_NNN.json`, written by the exporter's chunked mode.
//! - **Single file** ([`SingleFileExport`]): one flat `messages.json`, paged
//!   in memory with the configured page size.
//!
//! [`open_export`] picks the layout by looking at which files exist.
//! [`PageLoader`] adds a per-index cache on top of any source.

pub mod chunked;
pub mod loader;
pub mod single_file;

use std::path::Path;

pub use chunked::ChunkedExport;
pub use loader::PageLoader;
pub use single_file::SingleFileExport;
use tracing::info;

use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, ExportMeta, Page};

pub const META_FILENAME: &str = "meta.json";
pub const DATE_INDEX_FILENAME: &str = "date_index.json";
pub const PAGES_DIRNAME: &str = "pages";
pub const MESSAGES_FILENAME: &str = "messages.json";

/// Default number of messages per page, matching the exporter
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A frozen transcript that can be read page by page
pub trait ExportSource: Send {
    /// Export-wide metadata; `total_pages` is always at least 1
    fn meta(&self) -> &ExportMeta;

    /// Load the messages of internal page `index` (0 = oldest)
    fn load_page(&self, index: usize) -> Result<Page>;

    /// Load the date → location index
    fn load_date_index(&self) -> Result<DateIndex>;

    /// Directory the export was opened from
    fn root(&self) -> &Path;

    fn total_pages(&self) -> usize {
        self.meta().total_pages
    }
}

/// Open an export directory, detecting its layout
///
/// A directory with `meta.json` is read as chunked; otherwise `messages.json`
/// is required.
pub fn open_export(dir: &Path, page_size: usize) -> Result<Box<dyn ExportSource>> {
    if dir.join(META_FILENAME).exists() {
        let export = ChunkedExport::open(dir)?;
        info!(dir = %dir.display(), total_pages = export.total_pages(), "opened chunked export");
        return Ok(Box::new(export));
    }
    if dir.join(MESSAGES_FILENAME).exists() {
        let export = SingleFileExport::open(dir, page_size)?;
        info!(dir = %dir.display(), total_pages = export.total_pages(), "opened single-file export");
        return Ok(Box::new(export));
    }
    Err(ViewerError::missing(
        dir.join(META_FILENAME),
        format!("neither {} nor {} found", META_FILENAME, MESSAGES_FILENAME),
    ))
}

/// File name of internal page `index`, zero-padded to three digits
pub fn page_file_name(index: usize) -> String {
    format!("page_{:03}.json", index)
}
