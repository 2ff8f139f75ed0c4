//! View state for one open transcript.
//!
//! [`ViewController`] is the single owner of "which page is shown" and "what
//! is being searched". Rendering layers hold one per view and call into it;
//! nothing here touches a terminal or a file.
//!
//! # Loading protocol
//!
//! Navigation does not load anything itself. It returns a [`LoadTicket`] that
//! the caller fulfils (synchronously or on a worker thread) and hands back to
//! [`ViewController::complete_load`]. Every new request bumps a generation
//! counter, and a completion whose ticket is not the latest one is dropped, so
//! the last navigation always wins regardless of the order results arrive in.
//!
//! ```text
//! Idle -> Loading -> Rendered <-> Filtered
//!            ^          |            |
//!            +----------+------------+   (navigation / date jump)
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use super::date_jump::DateJumpResolver;
use super::grouping::{AuthorIdentity, DayMarker, RenderGroup, day_markers, group_with};
use super::pagination::PaginationIndex;
use super::search::{MAX_QUERY_LEN, MessageMatch, SearchFilter};
use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, ExportMeta, Page};
use crate::source::PageLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Rendered,
    Filtered,
}

/// Where to scroll once a page has been rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Bottom,
    /// Index into the unfiltered page
    Message(usize),
}

/// A page load the controller is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub index: usize,
    pub scroll: ScrollTarget,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// The page is now displayed; scroll to the given target
    Applied(ScrollTarget),
    /// A newer request was issued after this one; the result was discarded
    Stale,
    /// Loading failed; the previously rendered page (if any) is still shown
    Failed(ViewerError),
}

/// Render model of the displayed page: messages plus their grouping
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Arc<Page>,
    pub groups: Vec<RenderGroup>,
    pub markers: Vec<DayMarker>,
}

impl RenderedPage {
    pub fn new(page: Arc<Page>, identity: AuthorIdentity) -> Self {
        let groups = group_with(&page.messages, identity);
        let markers = day_markers(&page.messages, &groups);
        Self { page, groups, markers }
    }

    pub fn index(&self) -> usize {
        self.page.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub identity: AuthorIdentity,
    /// Open pages scrolled to their newest message
    pub autoscroll: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { identity: AuthorIdentity::NameAndRole, autoscroll: true }
    }
}

pub struct ViewController {
    options: ControllerOptions,
    pagination: PaginationIndex,
    resolver: DateJumpResolver,
    generation: u64,
    pending: Option<LoadTicket>,
    rendered: Option<RenderedPage>,
    search: SearchFilter,
    matches: Vec<MessageMatch>,
    state: ViewState,
}

impl ViewController {
    /// Create a controller from the export metadata and date index.
    ///
    /// Both must be loaded before the first page request, since the opening
    /// page depends on `total_pages`.
    pub fn new(meta: &ExportMeta, date_index: DateIndex, options: ControllerOptions) -> Self {
        Self {
            options,
            pagination: PaginationIndex::new(meta.total_pages),
            resolver: DateJumpResolver::new(date_index),
            generation: 0,
            pending: None,
            rendered: None,
            search: SearchFilter::default(),
            matches: Vec::new(),
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn pagination(&self) -> &PaginationIndex {
        &self.pagination
    }

    pub fn rendered(&self) -> Option<&RenderedPage> {
        self.rendered.as_ref()
    }

    pub fn pending(&self) -> Option<LoadTicket> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    /// Per-message visibility and highlights, aligned with the rendered page
    pub fn matches(&self) -> &[MessageMatch] {
        &self.matches
    }

    pub fn visible_count(&self) -> usize {
        self.matches.iter().filter(|m| m.visible).count()
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn set_autoscroll(&mut self, autoscroll: bool) {
        self.options.autoscroll = autoscroll;
    }

    fn default_scroll(&self) -> ScrollTarget {
        if self.options.autoscroll { ScrollTarget::Bottom } else { ScrollTarget::Top }
    }

    /// Index navigation is relative to: the outstanding request, else the shown page
    fn anchor_index(&self) -> usize {
        self.pending.map(|t| t.index).unwrap_or_else(|| self.pagination.current())
    }

    /// Issue a load for `index`, superseding any outstanding request
    pub fn request_page(&mut self, index: usize, scroll: ScrollTarget) -> Option<LoadTicket> {
        if index >= self.pagination.total_pages() {
            debug!(index, "page request out of range ignored");
            return None;
        }
        self.generation += 1;
        if let Some(previous) = self.pending {
            debug!(superseded = previous.index, index, "superseding outstanding page load");
        }
        let ticket = LoadTicket { generation: self.generation, index, scroll };
        self.pending = Some(ticket);
        self.state = ViewState::Loading;
        Some(ticket)
    }

    /// Request the most recent page
    pub fn open_latest(&mut self) -> LoadTicket {
        let newest = self.pagination.newest_index();
        let scroll = self.default_scroll();
        self.generation += 1;
        let ticket = LoadTicket { generation: self.generation, index: newest, scroll };
        self.pending = Some(ticket);
        self.state = ViewState::Loading;
        ticket
    }

    /// "prev": one page toward newer messages; `None` at the newest page
    pub fn go_newer(&mut self) -> Option<LoadTicket> {
        let target = self.pagination.newer_than(self.anchor_index())?;
        self.request_page(target, self.default_scroll())
    }

    /// "next": one page toward older messages; `None` at the oldest page
    pub fn go_older(&mut self) -> Option<LoadTicket> {
        let target = self.pagination.older_than(self.anchor_index())?;
        self.request_page(target, self.default_scroll())
    }

    /// Jump to a 1-based display page; `None` when out of range
    pub fn goto_display_page(&mut self, display_page: usize) -> Option<LoadTicket> {
        let index = self.pagination.to_internal(display_page)?;
        self.request_page(index, self.default_scroll())
    }

    /// Jump to the first message of a calendar day.
    ///
    /// On failure nothing changes: no load is issued and the shown page stays.
    /// On success the search filter is cleared straight away, because the
    /// target offset refers to the unfiltered page.
    pub fn jump_to_date(&mut self, input: &str) -> Result<LoadTicket> {
        let location = self.resolver.resolve_str(input)?;
        let total = self.pagination.total_pages();
        if location.page >= total {
            return Err(ViewerError::PageOutOfRange { index: location.page, total });
        }
        self.clear_query();
        self.request_page(location.page, ScrollTarget::Message(location.offset))
            .ok_or(ViewerError::PageOutOfRange { index: location.page, total })
    }

    /// Apply the result of a load issued by this controller
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Arc<Page>>) -> LoadOutcome {
        if self.pending != Some(ticket) {
            debug!(
                index = ticket.index,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale page result"
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!(index = ticket.index, kind = e.kind(), error = %e, "page load failed");
                self.state = self.settled_state();
                return LoadOutcome::Failed(e);
            }
        };

        let scroll = match ticket.scroll {
            ScrollTarget::Message(offset) if page.is_empty() => {
                warn!(offset, "date jump into an empty page");
                ScrollTarget::Top
            }
            ScrollTarget::Message(offset) if offset >= page.len() => {
                warn!(offset, len = page.len(), "date index offset past end of page, clamping");
                ScrollTarget::Message(page.len() - 1)
            }
            other => other,
        };

        self.pagination.set_current(ticket.index);
        self.rendered = Some(RenderedPage::new(page, self.options.identity));
        // Switching pages always resets the query
        self.search = SearchFilter::default();
        self.refresh_matches();
        self.state = ViewState::Rendered;
        LoadOutcome::Applied(scroll)
    }

    /// Fulfil a ticket synchronously with `loader`
    pub fn load_with(&mut self, loader: &mut PageLoader, ticket: LoadTicket) -> LoadOutcome {
        let result = loader.load(ticket.index);
        self.complete_load(ticket, result)
    }

    /// Replace the search query and re-filter the rendered page.
    ///
    /// Queries longer than [`MAX_QUERY_LEN`] characters are cut to that length.
    pub fn set_query(&mut self, query: &str) {
        let query: String = query.chars().take(MAX_QUERY_LEN).collect();
        self.search = SearchFilter::new(&query);
        self.refresh_matches();
        if !self.is_loading() {
            self.state = self.settled_state();
        }
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    fn refresh_matches(&mut self) {
        self.matches = match &self.rendered {
            Some(rendered) => self.search.apply(&rendered.page.messages),
            None => Vec::new(),
        };
    }

    fn settled_state(&self) -> ViewState {
        match (&self.rendered, self.search.is_active()) {
            (None, _) => ViewState::Idle,
            (Some(_), true) => ViewState::Filtered,
            (Some(_), false) => ViewState::Rendered,
        }
    }
}
