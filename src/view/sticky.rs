use chrono::NaiveDate;

/// Default distance from the top edge within which a day marker counts as "reached"
pub const DEFAULT_STICKY_THRESHOLD: usize = 0;

/// A rendered day separator and the row it starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPosition {
    pub top: usize,
    pub date: NaiveDate,
}

/// Tracks which day label stays pinned above the message list.
///
/// Markers must be in document order (ascending `top`). The pinned day is the
/// last marker whose top is at or above `scroll_offset + threshold`. When no
/// marker qualifies the previous day is kept, so the header never blanks out
/// while content is on screen.
#[derive(Debug, Clone, Default)]
pub struct StickyHeaderTracker {
    threshold: usize,
    current: Option<NaiveDate>,
}

impl StickyHeaderTracker {
    pub fn new(threshold: usize) -> Self {
        Self { threshold, current: None }
    }

    /// Recompute the pinned day for a scroll position. O(log markers).
    pub fn update(&mut self, scroll_offset: usize, markers: &[MarkerPosition]) -> Option<NaiveDate> {
        let line = scroll_offset.saturating_add(self.threshold);
        let reached = markers.partition_point(|m| m.top <= line);
        if reached > 0 {
            self.current = Some(markers[reached - 1].date);
        }
        self.current
    }

    pub fn current(&self) -> Option<NaiveDate> {
        self.current
    }

    /// Forget the pinned day, e.g. when a different page is rendered
    pub fn reset(&mut self) {
        self.current = None;
    }
}
