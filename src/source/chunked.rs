use std::path::{Path, PathBuf};

use super::{DATE_INDEX_FILENAME, ExportSource, META_FILENAME, PAGES_DIRNAME, page_file_name};
use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, ExportMeta, Page, PageFile};
use crate::parsers::{parse_date_index_file, read_json_file};

/// Export split by the exporter into `pages/page_NNN.json` chunks
#[derive(Debug, Clone)]
pub struct ChunkedExport {
    root: PathBuf,
    meta: ExportMeta,
}

impl ChunkedExport {
    /// Read `meta.json`; pages and the date index are read on demand
    pub fn open(root: &Path) -> Result<Self> {
        let meta_path = root.join(META_FILENAME);
        let meta: ExportMeta = read_json_file(&meta_path)?;
        if meta.total_pages == 0 {
            return Err(ViewerError::missing(meta_path, "total_pages must be at least 1"));
        }
        Ok(Self { root: root.to_path_buf(), meta })
    }

    pub fn page_path(&self, index: usize) -> PathBuf {
        self.root.join(PAGES_DIRNAME).join(page_file_name(index))
    }
}

impl ExportSource for ChunkedExport {
    fn meta(&self) -> &ExportMeta {
        &self.meta
    }

    fn load_page(&self, index: usize) -> Result<Page> {
        if index >= self.meta.total_pages {
            return Err(ViewerError::PageOutOfRange { index, total: self.meta.total_pages });
        }
        let file: PageFile = read_json_file(&self.page_path(index))?;
        Ok(Page { index, messages: file.messages })
    }

    fn load_date_index(&self) -> Result<DateIndex> {
        parse_date_index_file(&self.root.join(DATE_INDEX_FILENAME))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
