//! JSON parsers for exported transcript files
//!
//! # Error Handling Strategy
//!
//! Export files are trusted, static, local data, so there is no retry logic:
//!
//! - **Whole-file failures**: an absent, oversized or unparsable file becomes
//!   [`ViewerError::ResourceMissing`](crate::error::ViewerError::ResourceMissing)
//!   for that path. The caller decides whether that is fatal (startup) or a
//!   notice (a single page).
//!
//! - **Date index keys**: malformed keys are logged and skipped; if more than half
//!   of them are malformed the file is rejected as corrupted.

pub mod date_index;
pub mod deserializers;
pub mod json_file;

pub use date_index::parse_date_index_file;
pub use json_file::read_json_file;
