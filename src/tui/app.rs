//! Terminal viewer state and event handling.
//!
//! The `App` owns a [`ViewController`] for page/search state and a
//! [`PageWorker`] that reads pages off the UI thread. Each loop iteration:
//!
//! - applies finished page loads (stale ones are dropped by the controller)
//! - lays the page out as rows when it or the width changed
//! - draws, updating scroll position and the pinned day label
//! - polls for one key and turns it into an [`Action`]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use tracing::{debug, warn};

use super::events::{Action, poll_event};
use super::layout::AppLayout;
use super::rendering::{RenderState, render_ui};
use super::theme::Palette;
use super::transcript::Transcript;
use super::worker::{LoadResult, PageWorker};
use crate::clipboard::copy_message;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::prefs::Preferences;
use crate::render::build_blocks;
use crate::view::search::MAX_QUERY_LEN;
use crate::view::{LoadOutcome, LoadTicket, ScrollTarget, StickyHeaderTracker, ViewController};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest date prompt input accepted
const MAX_DATE_INPUT_LEN: usize = 32;
/// The missing date index notice stays up longer than other errors
const DATE_INDEX_NOTICE_MS: u64 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    DatePrompt,
}

pub struct App {
    controller: ViewController,
    worker: PageWorker,
    config: ViewerConfig,
    prefs: Preferences,
    /// Where preference changes are written; `None` keeps them in memory
    prefs_path: Option<PathBuf>,
    title: String,
    input_mode: InputMode,
    query_input: String,
    date_input: String,
    scroll: usize,
    pending_scroll: Option<ScrollTarget>,
    transcript: Transcript,
    transcript_width: Option<u16>,
    viewport_height: usize,
    sticky: StickyHeaderTracker,
    status_message: Option<StatusMessage>,
    /// Cleared when the date index could not be read; the prompt then takes page numbers only
    dates_enabled: bool,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    /// Create the app and request the newest page
    pub fn new(
        mut controller: ViewController,
        worker: PageWorker,
        config: ViewerConfig,
        prefs: Preferences,
        prefs_path: Option<PathBuf>,
        title: String,
    ) -> Self {
        controller.set_autoscroll(prefs.autoscroll);
        let first = controller.open_latest();
        worker.submit(first);

        Self {
            controller,
            worker,
            sticky: StickyHeaderTracker::new(config.sticky_threshold),
            config,
            prefs,
            prefs_path,
            title,
            input_mode: InputMode::Search,
            query_input: String::new(),
            date_input: String::new(),
            scroll: 0,
            pending_scroll: None,
            transcript: Transcript::default(),
            transcript_width: None,
            viewport_height: 0,
            status_message: None,
            dates_enabled: true,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Turn date jumps off and tell the user why
    pub fn disable_date_jumps(&mut self, error: &ViewerError) {
        self.dates_enabled = false;
        self.set_status(
            format!("✗ Date index unavailable, date jumps disabled: {}", error),
            MessageType::Error,
            DATE_INDEX_NOTICE_MS,
        );
        self.needs_redraw = true;
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            while let Some(result) = self.worker.try_next() {
                self.apply_load(result);
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                terminal.draw(|f| self.draw(f))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }
        Ok(())
    }

    fn submit(&mut self, ticket: Option<LoadTicket>, boundary_notice: &str) {
        match ticket {
            Some(ticket) => {
                self.worker.submit(ticket);
                self.needs_redraw = true;
            }
            None => self.set_status(boundary_notice, MessageType::Success, STATUS_SUCCESS_DURATION_MS),
        }
    }

    fn apply_load(&mut self, (ticket, result): LoadResult) {
        match self.controller.complete_load(ticket, result) {
            LoadOutcome::Applied(scroll) => {
                self.query_input.clear();
                self.pending_scroll = Some(scroll);
                self.sticky.reset();
                self.invalidate_transcript();
            }
            LoadOutcome::Stale => {}
            LoadOutcome::Failed(e) => self.set_error(format!("✗ {}", e)),
        }
        self.needs_redraw = true;
    }

    fn invalidate_transcript(&mut self) {
        self.transcript_width = None;
        self.needs_redraw = true;
    }

    /// Re-lay the page as rows if the page, search, theme or width changed
    fn ensure_transcript(&mut self, width: u16) {
        if self.transcript_width == Some(width) {
            return;
        }
        let palette = Palette::for_theme(self.prefs.theme);
        self.transcript = match self.controller.rendered() {
            Some(rendered) => {
                let blocks = build_blocks(
                    &rendered.page.messages,
                    &rendered.groups,
                    self.controller.matches(),
                    &self.config.export_dir,
                );
                Transcript::build(&blocks, width, &palette)
            }
            None => Transcript::default(),
        };
        self.transcript_width = Some(width);
    }

    fn max_scroll(&self) -> usize {
        self.transcript.height().saturating_sub(self.viewport_height)
    }

    fn apply_pending_scroll(&mut self) {
        let Some(target) = self.pending_scroll.take() else {
            return;
        };
        self.scroll = match target {
            ScrollTarget::Top => 0,
            ScrollTarget::Bottom => self.max_scroll(),
            ScrollTarget::Message(index) => {
                let row = self.transcript.row_at_or_after(index).unwrap_or(0);
                // Keep the day separator of a jumped-to day in view
                let separator_above =
                    row > 0 && self.transcript.markers.iter().any(|m| m.top == row - 1);
                if separator_above { row - 1 } else { row }
            }
        };
    }

    fn draw(&mut self, frame: &mut Frame) {
        let layout = AppLayout::new(frame.area(), self.config.sticky_header);
        self.viewport_height = usize::from(layout.messages_area.height);
        self.ensure_transcript(layout.messages_area.width);
        self.apply_pending_scroll();
        self.scroll = self.scroll.min(self.max_scroll());

        let sticky_day = if self.config.sticky_header {
            self.sticky.update(self.scroll, &self.transcript.markers)
        } else {
            None
        };

        let end = (self.scroll + self.viewport_height).min(self.transcript.height());
        let page_label = self.controller.pagination().label();
        let rendered_len = self.controller.rendered().map(|r| r.page.len());
        let state = RenderState {
            title: &self.title,
            page_label: &page_label,
            loading: self.controller.is_loading(),
            sticky_day,
            visible_lines: &self.transcript.lines[self.scroll.min(end)..end],
            page_len: rendered_len,
            shown_count: self.controller.visible_count(),
            input_mode: self.input_mode,
            query_input: &self.query_input,
            date_input: &self.date_input,
            dates_enabled: self.dates_enabled,
            autoscroll: self.prefs.autoscroll,
            status_message: self.status_message.as_ref(),
            palette: Palette::for_theme(self.prefs.theme),
        };
        render_ui(frame, &layout, &state);
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => self.cancel(),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollTop => self.scroll_to(ScrollTarget::Top),
            Action::ScrollBottom => self.scroll_to(ScrollTarget::Bottom),
            Action::NewerPage => {
                let ticket = self.controller.go_newer();
                self.submit(ticket, "Already at the newest page");
            }
            Action::OlderPage => {
                let ticket = self.controller.go_older();
                self.submit(ticket, "Already at the oldest page");
            }
            Action::OpenDatePrompt => {
                self.input_mode = InputMode::DatePrompt;
                self.date_input.clear();
                self.needs_redraw = true;
            }
            Action::Submit => self.submit_input(),
            Action::ToggleTheme => {
                self.prefs.theme = self.prefs.theme.toggle();
                self.persist_prefs();
                self.invalidate_transcript();
            }
            Action::ToggleAutoscroll => {
                self.prefs.autoscroll = !self.prefs.autoscroll;
                self.controller.set_autoscroll(self.prefs.autoscroll);
                self.persist_prefs();
                let state = if self.prefs.autoscroll { "on" } else { "off" };
                self.set_status(
                    format!("Autoscroll {}", state),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Action::CopyMessage => self.copy_top_message(),
            Action::InputChar(c) => self.input_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::Resize => self.needs_redraw = true,
            Action::None => {}
        }
    }

    fn cancel(&mut self) {
        if self.input_mode == InputMode::DatePrompt {
            self.input_mode = InputMode::Search;
            self.date_input.clear();
            self.needs_redraw = true;
        } else if !self.query_input.is_empty() {
            self.query_input.clear();
            self.refresh_search();
        } else {
            self.should_quit = true;
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let old = self.scroll;
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
        if old != self.scroll {
            self.needs_redraw = true;
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.pending_scroll = Some(target);
        self.needs_redraw = true;
    }

    fn submit_input(&mut self) {
        if self.input_mode != InputMode::DatePrompt {
            return;
        }
        let input = std::mem::take(&mut self.date_input);
        self.input_mode = InputMode::Search;
        if let Ok(display_page) = input.trim().parse::<usize>() {
            let total = self.controller.pagination().total_pages();
            match self.controller.goto_display_page(display_page) {
                Some(ticket) => self.worker.submit(ticket),
                None => self.set_error(format!("✗ No page {} (pages 1-{})", display_page, total)),
            }
            self.needs_redraw = true;
            return;
        }
        if !self.dates_enabled {
            self.set_error("✗ Date index unavailable, enter a page number");
            self.needs_redraw = true;
            return;
        }
        match self.controller.jump_to_date(&input) {
            Ok(ticket) => {
                debug!(date = input.trim(), page = ticket.index, "date jump");
                // The controller already cleared the search
                self.query_input.clear();
                self.invalidate_transcript();
                self.worker.submit(ticket);
            }
            Err(e) => self.set_error(format!("✗ {}", e)),
        }
        self.needs_redraw = true;
    }

    fn input_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::DatePrompt => {
                if self.date_input.chars().count() < MAX_DATE_INPUT_LEN {
                    self.date_input.push(c);
                    self.needs_redraw = true;
                }
            }
            InputMode::Search => {
                if self.query_input.chars().count() < MAX_QUERY_LEN {
                    self.query_input.push(c);
                    self.refresh_search();
                }
            }
        }
    }

    fn delete_char(&mut self) {
        let removed = match self.input_mode {
            InputMode::DatePrompt => self.date_input.pop().is_some(),
            InputMode::Search => {
                let removed = self.query_input.pop().is_some();
                if removed {
                    self.refresh_search();
                }
                removed
            }
        };
        if removed {
            self.needs_redraw = true;
        }
    }

    fn refresh_search(&mut self) {
        self.controller.set_query(&self.query_input);
        self.pending_scroll = Some(if self.controller.search().is_active() {
            ScrollTarget::Top
        } else if self.prefs.autoscroll {
            ScrollTarget::Bottom
        } else {
            ScrollTarget::Top
        });
        self.invalidate_transcript();
    }

    fn copy_top_message(&mut self) {
        let message = self
            .transcript
            .message_at_row(self.scroll)
            .and_then(|index| self.controller.rendered().and_then(|r| r.page.messages.get(index)));
        let Some(message) = message else {
            self.set_error("✗ No message to copy");
            return;
        };
        match copy_message(message) {
            Ok(()) => self.set_status("✓ Copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS),
            Err(e) => self.set_error(format!("✗ Clipboard error: {}", e)),
        }
    }

    fn persist_prefs(&mut self) {
        let Some(path) = &self.prefs_path else {
            return;
        };
        if let Err(e) = self.prefs.save_to(path) {
            warn!(error = %e, "failed to save preferences");
            self.set_error(format!("✗ {}", e));
        }
    }
}
