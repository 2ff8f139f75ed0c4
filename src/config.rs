//! Runtime configuration assembled from command-line flags

use std::path::PathBuf;

use crate::source::DEFAULT_PAGE_SIZE;
use crate::source::loader::DEFAULT_CACHE_PAGES;
use crate::view::grouping::AuthorIdentity;
use crate::view::sticky::DEFAULT_STICKY_THRESHOLD;

/// Directory searched for an export when none is given
pub const DEFAULT_EXPORT_DIR: &str = "export";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub export_dir: PathBuf,
    /// Page size for single-file exports; chunked exports carry their own
    pub page_size: usize,
    pub grouping: AuthorIdentity,
    pub sticky_header: bool,
    /// Rows below the top edge at which a day separator becomes the pinned label
    pub sticky_threshold: usize,
    pub cache_pages: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            grouping: AuthorIdentity::NameAndRole,
            sticky_header: true,
            sticky_threshold: DEFAULT_STICKY_THRESHOLD,
            cache_pages: DEFAULT_CACHE_PAGES,
        }
    }
}

impl ViewerConfig {
    pub fn with_export_dir(export_dir: impl Into<PathBuf>) -> Self {
        Self { export_dir: export_dir.into(), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.grouping, AuthorIdentity::NameAndRole);
        assert!(config.sticky_header);
        assert_eq!(config.export_dir, PathBuf::from("export"));
    }

    #[test]
    fn test_with_export_dir_keeps_other_defaults() {
        let config = ViewerConfig::with_export_dir("/data/chat");
        assert_eq!(config.export_dir, PathBuf::from("/data/chat"));
        assert_eq!(config.cache_pages, DEFAULT_CACHE_PAGES);
    }
}
