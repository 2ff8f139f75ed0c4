//! Data models for exported chat transcripts.
//!
//! - [`Message`] - one chat message with author, timestamp, text and attachments
//! - [`ExportMeta`] - `meta.json`, export-wide totals
//! - [`PageFile`] / [`Page`] - one chunk of the transcript
//! - [`DateIndex`] - `date_index.json`, calendar day to page location
//!
//! Timestamps use a custom deserializer from the `deserializers` module so that
//! both naive and offset-bearing ISO-8601 strings are accepted.

pub mod export;
pub mod message;

pub use export::{DateIndex, DateLocation, DateRange, ExportMeta, Page, PageFile};
pub use message::{Attachment, AttachmentKind, Author, Message, Role};
