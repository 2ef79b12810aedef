//! Top-level list controller.
//!
//! Composes the layout engine, the scroll reconciler (window + pool) and the
//! selection state, and exposes the operations a host widget drives:
//! `refresh`, `resize`, `select`, `unselect` and `on_scrolled`.
//!
//! Every operation runs to completion on the caller's thread. A later scroll
//! event simply supersedes an earlier one because the reconciler always
//! advances its remembered offset before recycling rows.

use crate::layout::{Divider, LayoutEngine};
use crate::pool::RowViewPool;
use crate::reconciler::{ScrollOutcome, ScrollReconciler};
use crate::state::{MaterializedRow, SelectionState, WindowState};
use crate::theme::Theme;
use crate::traits::{DataSource, RowIndex, ScrollHost, VisualElement};
use egui::{vec2, Vec2};

/// Notification hook for selection changes.
pub type RowCallback = Box<dyn FnMut(RowIndex)>;

/// A virtualized, recycling vertical list.
///
/// Only the rows inside the viewport (plus one) ever have a view; views that
/// scroll out are released to a pool and rebound to rows that scroll in.
pub struct ListController<S: DataSource, H: ScrollHost> {
    source: S,
    host: H,
    layout: LayoutEngine,
    reconciler: ScrollReconciler<S::View>,
    selection: SelectionState,
    theme: Theme,
    /// Viewport size the current window was built for
    size: Vec2,
    /// Last offset reported by the host
    offset: f32,
    /// Data length the current window was built for
    last_length: usize,
    /// Set when the window has to be rebuilt on the next refresh
    stale: bool,
    enabled: bool,
    on_selected: Option<RowCallback>,
    on_unselected: Option<RowCallback>,
}

impl<S: DataSource, H: ScrollHost> std::fmt::Debug for ListController<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let window = self.reconciler.window();
        f.debug_struct("ListController")
            .field("first_index", &window.first_index())
            .field("last_index", &window.last_index())
            .field("visible_count", &window.visible_count())
            .field("selected", &self.selection.selected())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl<S: DataSource, H: ScrollHost> ListController<S, H> {
    /// Creates a list over `source` hosted in `host`. Nothing is laid out
    /// until the first `refresh` or `resize`.
    pub fn new(source: S, host: H, theme: Theme) -> Self {
        let mut layout = LayoutEngine::new();
        layout.set_separators(false, theme.metrics.separator_thickness);
        Self {
            source,
            host,
            layout,
            reconciler: ScrollReconciler::new(),
            selection: SelectionState::new(),
            theme,
            size: Vec2::ZERO,
            offset: 0.0,
            last_length: 0,
            stale: true,
            enabled: true,
            on_selected: None,
            on_unselected: None,
        }
    }

    /// Enables dividers between rows.
    pub fn with_separators(mut self, enabled: bool) -> Self {
        self.layout
            .set_separators(enabled, self.theme.metrics.separator_thickness);
        self
    }

    // ===== Queries =====

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the data source. Call `refresh` after changing data.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn window(&self) -> &WindowState<S::View> {
        self.reconciler.window()
    }

    pub fn pool(&self) -> &RowViewPool<S::View> {
        self.reconciler.pool()
    }

    /// Number of row views the list owns, bound or pooled.
    pub fn constructed_views(&self) -> usize {
        self.reconciler.constructed()
    }

    /// Iterates over the materialized rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &MaterializedRow<S::View>> {
        self.reconciler.window().rows()
    }

    pub fn dividers(&self) -> &[Divider] {
        self.layout.dividers()
    }

    pub fn selected(&self) -> Option<RowIndex> {
        self.selection.selected()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current number of rows reported by the data source.
    pub fn length(&self) -> usize {
        self.source.length()
    }

    /// Returns the row under content coordinate `y`.
    pub fn row_at(&self, y: f32) -> Option<RowIndex> {
        self.layout.row_at(y, self.source.length())
    }

    // ===== Hooks =====

    pub fn set_on_selected(&mut self, callback: impl FnMut(RowIndex) + 'static) {
        self.on_selected = Some(Box::new(callback));
    }

    pub fn set_on_unselected(&mut self, callback: impl FnMut(RowIndex) + 'static) {
        self.on_unselected = Some(Box::new(callback));
    }

    fn notify_selected(&mut self, index: RowIndex) {
        if let Some(callback) = self.on_selected.as_mut() {
            callback(index);
        }
    }

    fn notify_unselected(&mut self, index: RowIndex) {
        if let Some(callback) = self.on_unselected.as_mut() {
            callback(index);
        }
    }

    // ===== Layout =====

    /// Adopts a new viewport size. Returns true if it differed.
    fn apply_size(&mut self, size: Vec2) -> bool {
        if size == self.size {
            return false;
        }
        let width_changed = size.x != self.size.x;
        self.size = size;
        self.layout.set_viewport_size(size);
        if width_changed {
            self.reconciler.resize_views(&mut self.layout);
        }
        self.stale = true;
        true
    }

    /// Rebuilds the window for the current size and length, or collapses it.
    fn layout_pass(&mut self, length: usize) {
        if length == 0 || self.layout.is_degenerate() {
            let window = self.reconciler.window();
            if !window.is_empty() || window.visible_count() > 0 {
                self.reconciler.collapse(&mut self.layout);
                self.host.request_repaint();
            }
            if length == 0 && self.offset != 0.0 {
                self.offset = 0.0;
                self.host.set_offset(0.0);
            }
        } else {
            self.reconciler
                .relayout(&self.source, &mut self.layout, &self.selection, self.offset);
        }
        self.last_length = length;
        self.stale = false;
    }

    fn publish_content_size(&mut self, length: usize) {
        let content = self.layout.content_size(length);
        self.host.set_content_size(content);
    }

    /// Re-derives row metrics, relays out if the structure is stale and
    /// re-binds every visible row.
    ///
    /// Picks up data-length changes (including a collapse to zero) and the
    /// host's current viewport size.
    pub fn refresh(&mut self) {
        let measured = if self.layout.needs_measure() {
            let min_size = self.reconciler.measure_template(&self.source);
            self.layout.set_row_min_size(min_size);
            log::debug!("row size measured: {:?}", min_size);
            true
        } else {
            false
        };
        let size = self.host.viewport_size();
        self.apply_size(size);

        let length = self.source.length();
        if let Some(dropped) = self.selection.retain_below(length) {
            log::debug!("selection {} dropped, data now has {} rows", dropped, length);
        }

        let structural = measured
            || self.stale
            || length != self.last_length
            || self.reconciler.window().is_empty();
        if structural {
            self.layout_pass(length);
        } else {
            self.reconciler.rebind_all(&self.source, &self.selection);
        }
        self.publish_content_size(length);
        self.host.request_repaint();
    }

    /// Resizes the list to a new viewport size.
    ///
    /// Rows keep their height; a width change stretches them in place. The
    /// window grows or shrinks to the new visible count, reusing pooled views.
    pub fn resize(&mut self, size: Vec2) {
        if !self.apply_size(size) && !self.stale {
            return;
        }
        if self.layout.needs_measure() {
            let min_size = self.reconciler.measure_template(&self.source);
            self.layout.set_row_min_size(min_size);
        }
        let length = self.source.length();
        self.layout_pass(length);
        self.publish_content_size(length);
        self.host.request_repaint();
    }

    /// Host callback: the viewport's vertical offset changed.
    pub fn on_scrolled(&mut self, offset: f32) -> ScrollOutcome {
        if offset == self.offset {
            return ScrollOutcome::Unchanged;
        }
        self.offset = offset;
        let outcome =
            self.reconciler
                .scroll_to(offset, &self.source, &mut self.layout, &self.selection);
        if outcome != ScrollOutcome::Unchanged {
            self.host.request_repaint();
        }
        outcome
    }

    // ===== Selection =====

    /// Selects row `index`, replacing any previous selection, and scrolls it into view.
    ///
    /// Out-of-range indices are ignored. Returns true if the selection changed.
    pub fn select(&mut self, index: RowIndex) -> bool {
        if self.selection.is_selected(index) {
            return false;
        }
        let length = self.source.length();
        if index >= length {
            log::debug!("select({}) ignored, data has {} rows", index, length);
            return false;
        }
        let previous = self.selection.select(index);
        if let Some(previous) = previous {
            self.notify_unselected(previous);
        }
        self.notify_selected(index);
        self.reconciler.sync_selection(&self.selection);

        if !self.layout.is_degenerate() {
            self.scroll_into_view(index);
        }
        self.host.request_repaint();
        true
    }

    /// Moves the viewport the least amount that makes row `index` fully visible.
    fn scroll_into_view(&mut self, index: RowIndex) {
        let top = self.layout.row_top(index);
        let bottom = top + self.layout.row_height();
        let height = self.layout.viewport_size().y;
        let mut offset = self.offset;
        if top < offset {
            offset = top;
        } else if bottom > offset + height {
            offset = bottom - height;
        }
        self.host.set_offset(offset);
        self.on_scrolled(offset);
    }

    /// Clears the selection and reports `index` as unselected.
    ///
    /// Does nothing if nothing is selected; otherwise the notification carries
    /// the caller's index as given.
    pub fn unselect(&mut self, index: RowIndex) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.reconciler.sync_selection(&self.selection);
        self.host.request_repaint();
        self.notify_unselected(index);
    }

    // ===== Pointer =====

    /// Single tap handler for every row: selects the row the tapped view is bound to.
    pub fn row_tapped(&mut self, index: RowIndex) {
        if !self.enabled {
            return;
        }
        if self.reconciler.window().row(index).is_some() {
            self.select(index);
        }
    }

    pub fn pointer_entered(&mut self, index: RowIndex) {
        if self.enabled && self.reconciler.set_hovered(index, true) {
            self.host.request_repaint();
        }
    }

    pub fn pointer_exited(&mut self, index: RowIndex) {
        if self.reconciler.set_hovered(index, false) {
            self.host.request_repaint();
        }
    }

    /// Enables or disables pointer interaction. Disabling clears hover.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled && self.reconciler.clear_hovered() {
            self.host.request_repaint();
        }
    }

    // ===== Appearance =====

    /// Switches theme; the row height is re-measured on the spot.
    pub fn set_theme(&mut self, theme: Theme) {
        log::debug!("applying theme '{}'", theme.name);
        self.source.apply_theme(&theme);
        self.layout
            .set_separators(self.layout.separators_enabled(), theme.metrics.separator_thickness);
        self.layout.invalidate_row_height();
        self.reconciler.refresh_views();
        self.theme = theme;
        self.stale = true;
        self.refresh();
    }

    /// Turns row dividers on or off.
    pub fn set_separators(&mut self, enabled: bool) {
        if self.layout.separators_enabled() == enabled {
            return;
        }
        self.layout
            .set_separators(enabled, self.theme.metrics.separator_thickness);
        self.stale = true;
        self.refresh();
    }
}

impl<S: DataSource, H: ScrollHost> VisualElement for ListController<S, H> {
    fn resize(&mut self, size: Vec2) {
        ListController::resize(self, size);
    }

    /// A list needs room for at least one row.
    fn min_size(&self) -> Vec2 {
        vec2(self.layout.row_min_width(), self.layout.row_height())
    }

    fn refresh(&mut self) {
        ListController::refresh(self);
    }
}
