//! Error types for the transcript viewer

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors surfaced by loading and navigation.
///
/// None of these are fatal to a running view: the caller shows a notice and
/// keeps whatever page was rendered before.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// An expected export file is absent or cannot be parsed
    #[error("Resource missing: {} ({reason})", path.display())]
    ResourceMissing { path: PathBuf, reason: String },

    /// The date index has no entry for the requested day
    #[error("No messages on {0}")]
    DateNotFound(String),

    /// The requested date is not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A page index outside `0..total_pages` was requested from a source
    #[error("Page {index} out of range (total pages: {total})")]
    PageOutOfRange { index: usize, total: usize },
}

impl ViewerError {
    pub fn missing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ResourceMissing { path: path.into(), reason: reason.to_string() }
    }

    /// Short machine-readable kind, used in log fields
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ResourceMissing { .. } => "RESOURCE_MISSING",
            Self::DateNotFound(_) => "DATE_NOT_FOUND",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
        }
    }
}
