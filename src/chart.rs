//! Department chart state: lazy loading, zoom window, and label rules.

use crate::feed::{Feed, FetchTicket};
use crate::models::ChartPoint;

/// Value labels are drawn only while at most this many categories are visible.
pub const VALUE_LABEL_TICK_LIMIT: usize = 20;

/// Bar growth animation length in seconds.
pub const ANIMATION_SECS: f32 = 1.0;

/// Smallest zoom window, in categories.
const MIN_WINDOW: f32 = 1.0;

/// Whether value labels should be shown for the given number of visible ticks.
pub fn show_value_labels(visible_ticks: usize) -> bool {
    visible_ticks <= VALUE_LABEL_TICK_LIMIT
}

/// Ease-out quartic curve on `t` in `[0, 1]`.
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Visible slice of the category axis, in fractional category units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartWindow {
    total: usize,
    start: f32,
    len: f32,
}

impl ChartWindow {
    /// Window showing all `total` categories.
    pub fn full(total: usize) -> Self {
        Self {
            total,
            start: 0.0,
            len: total as f32,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn len(&self) -> f32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Category indices at least partly inside the window.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        if self.total == 0 {
            return 0..0;
        }
        let first = self.start.floor().max(0.0) as usize;
        let last = ((self.start + self.len).ceil() as usize).min(self.total);
        first.min(last)..last
    }

    /// Number of category ticks on the axis.
    pub fn visible_ticks(&self) -> usize {
        self.visible_range().len()
    }

    /// Zoom by `factor` (< 1 zooms in) keeping the category at `anchor`
    /// (fraction of the window width) in place.
    pub fn zoom(&mut self, factor: f32, anchor: f32) {
        if self.total == 0 || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let max_len = self.total as f32;
        let min_len = MIN_WINDOW.min(max_len);
        let anchor = anchor.clamp(0.0, 1.0);
        let pivot = self.start + self.len * anchor;

        let new_len = (self.len * factor).clamp(min_len, max_len);
        self.start = pivot - new_len * anchor;
        self.len = new_len;
        self.clamp();
    }

    /// Shift the window by `delta` categories.
    pub fn pan(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.start += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max_start = (self.total as f32 - self.len).max(0.0);
        self.start = self.start.clamp(0.0, max_start);
    }
}

/// State of the department chart section.
#[derive(Debug)]
pub struct ChartState {
    /// Endpoint currently selected.
    pub endpoint: String,
    requested: Option<String>,
    in_view: bool,
    feed: Feed<ChartPoint>,
    window: ChartWindow,
    animation_start: Option<f64>,
}

impl ChartState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            requested: None,
            in_view: false,
            feed: Feed::new(),
            window: ChartWindow::full(0),
            animation_start: None,
        }
    }

    /// Record that the chart area has become visible. Never re-armed.
    ///
    /// Returns `true` the first time only.
    pub fn mark_in_view(&mut self) -> bool {
        if self.in_view {
            return false;
        }
        self.in_view = true;
        true
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Whether the current endpoint still has to be fetched.
    pub fn needs_fetch(&self) -> bool {
        self.in_view && self.requested.as_deref() != Some(self.endpoint.as_str())
    }

    /// Start fetching the current endpoint. Returns the ticket and endpoint.
    pub fn begin_fetch(&mut self) -> (FetchTicket, String) {
        self.requested = Some(self.endpoint.clone());
        (self.feed.begin(), self.endpoint.clone())
    }

    /// Apply a fetch result and reset the zoom window to the new data.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<ChartPoint>, String>) {
        if self.feed.complete(ticket, result) {
            self.window = ChartWindow::full(self.feed.rows().len());
            self.animation_start = None;
        }
    }

    /// Eased bar growth in `[0, 1]` at time `now` (seconds).
    ///
    /// Stays at 0 until the chart has been in view; the clock starts on the
    /// first call after that and restarts with each new data set.
    pub fn animation_progress(&mut self, now: f64) -> f32 {
        if !self.in_view {
            return 0.0;
        }
        let start = *self.animation_start.get_or_insert(now);
        ease_out_quart((now - start) as f32 / ANIMATION_SECS)
    }

    pub fn points(&self) -> &[ChartPoint] {
        self.feed.rows()
    }

    pub fn is_loading(&self) -> bool {
        self.feed.is_loading()
    }

    pub fn window(&self) -> &ChartWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ChartWindow {
        &mut self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, scanned: u64, not_scanned: u64) -> ChartPoint {
        ChartPoint {
            deptcode: name.to_string(),
            department: name.to_string(),
            scanned_count: scanned,
            not_scanned_count: not_scanned,
        }
    }

    #[test]
    fn test_label_threshold() {
        assert!(show_value_labels(1));
        assert!(show_value_labels(20));
        assert!(!show_value_labels(21));
    }

    #[test]
    fn test_ease_out_quart_bounds() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.5);
    }

    #[test]
    fn test_full_window() {
        let window = ChartWindow::full(30);
        assert_eq!(window.visible_range(), 0..30);
        assert_eq!(window.visible_ticks(), 30);
        assert!(ChartWindow::full(0).is_empty());
        assert_eq!(ChartWindow::full(0).visible_ticks(), 0);
    }

    #[test]
    fn test_zoom_in_reduces_ticks() {
        let mut window = ChartWindow::full(40);
        window.zoom(0.25, 0.5);

        assert_eq!(window.len(), 10.0);
        assert_eq!(window.start(), 15.0);
        assert!(show_value_labels(window.visible_ticks()));
    }

    #[test]
    fn test_zoom_limits() {
        let mut window = ChartWindow::full(10);
        window.zoom(4.0, 0.0);
        assert_eq!(window.len(), 10.0);

        window.zoom(0.001, 0.0);
        assert_eq!(window.len(), 1.0);
        assert_eq!(window.visible_ticks(), 1);
    }

    #[test]
    fn test_pan_clamps() {
        let mut window = ChartWindow::full(40);
        window.zoom(0.25, 0.0);
        assert_eq!(window.start(), 0.0);

        window.pan(100.0);
        assert_eq!(window.start(), 30.0);
        assert_eq!(window.visible_range(), 30..40);

        window.pan(-500.0);
        assert_eq!(window.start(), 0.0);
    }

    #[test]
    fn test_fetch_waits_for_visibility() {
        let mut chart = ChartState::new("/api/chart");
        assert!(!chart.needs_fetch());

        assert!(chart.mark_in_view());
        assert!(!chart.mark_in_view());
        assert!(chart.needs_fetch());
    }

    #[test]
    fn test_fetch_once_per_endpoint() {
        let mut chart = ChartState::new("/api/chart");
        chart.mark_in_view();

        let (ticket, endpoint) = chart.begin_fetch();
        assert_eq!(endpoint, "/api/chart");
        assert!(!chart.needs_fetch());

        chart.complete(ticket, Ok(vec![point("A", 1, 2), point("B", 3, 4)]));
        assert!(!chart.needs_fetch());
        assert_eq!(chart.points().len(), 2);
        assert_eq!(chart.window().visible_ticks(), 2);

        chart.endpoint = "/api/chart?date=2024-01-01".to_string();
        assert!(chart.needs_fetch());
    }

    #[test]
    fn test_animation_deferred_until_in_view() {
        let mut chart = ChartState::new("/api/chart");
        assert_eq!(chart.animation_progress(5.0), 0.0);

        chart.mark_in_view();
        assert_eq!(chart.animation_progress(10.0), 0.0);
        let mid = chart.animation_progress(10.5);
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(chart.animation_progress(12.0), 1.0);
    }

    #[test]
    fn test_animation_restarts_with_new_data() {
        let mut chart = ChartState::new("/api/chart");
        chart.mark_in_view();
        chart.animation_progress(0.0);
        assert_eq!(chart.animation_progress(3.0), 1.0);

        let (ticket, _) = chart.begin_fetch();
        chart.complete(ticket, Ok(vec![point("A", 1, 1)]));
        assert_eq!(chart.animation_progress(4.0), 0.0);
    }

    #[test]
    fn test_failed_fetch_is_empty() {
        let mut chart = ChartState::new("/api/chart");
        chart.mark_in_view();
        let (ticket, _) = chart.begin_fetch();
        chart.complete(ticket, Err("Failed to fetch data".to_string()));

        assert!(chart.points().is_empty());
        assert!(!chart.is_loading());
        assert!(!chart.needs_fetch());
    }
}
