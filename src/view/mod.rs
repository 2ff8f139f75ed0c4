//! Terminal-independent view logic
//!
//! - [`pagination`] - internal chunk index vs. display page number
//! - [`grouping`] - day separators and same-author runs for one page
//! - [`sticky`] - which day label is pinned while scrolling
//! - [`date_jump`] - calendar day to page/offset lookups
//! - [`search`] - per-page literal text filter with highlight spans
//! - [`controller`] - the state machine tying the above to page loading

pub mod controller;
pub mod date_jump;
pub mod grouping;
pub mod pagination;
pub mod search;
pub mod sticky;

pub use controller::{
    ControllerOptions, LoadOutcome, LoadTicket, RenderedPage, ScrollTarget, ViewController,
    ViewState,
};
pub use date_jump::{DateJumpResolver, parse_date};
pub use grouping::{AuthorIdentity, DayMarker, RenderGroup, RunPosition, group, group_with};
pub use pagination::PaginationIndex;
pub use search::{MessageMatch, SearchFilter, filter};
pub use sticky::{MarkerPosition, StickyHeaderTracker};
