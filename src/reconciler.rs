//! Scroll reconciliation for the materialized window.
//!
//! Owns the window and the view pool, and moves rows between them as the
//! viewport relays out or scrolls. Every loop is bounded by the data edges
//! (`first_index > 0`, `last_index + 1 < length`) so the window can never leave
//! `[0, length - 1]`, even when the data shrank since the last layout.

use crate::layout::LayoutEngine;
use crate::pool::RowViewPool;
use crate::state::{MaterializedRow, RowFlags, SelectionState, WindowState};
use crate::traits::{DataSource, RowIndex, VisualElement};
use egui::{vec2, Vec2};

/// Which way the last reconciliation moved the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

/// Result of delivering one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The offset did not cross a row boundary (or was already applied).
    Unchanged,
    /// Rows were recycled.
    Shifted { direction: ScrollDirection, rows: usize },
}

/// Keeps the materialized window in step with the scroll offset.
#[derive(Debug)]
pub struct ScrollReconciler<V> {
    window: WindowState<V>,
    pool: RowViewPool<V>,
    /// Views built through the data source and still owned (bound or pooled)
    constructed: usize,
    /// Row under the pointer; re-applied when that row is materialized again
    hovered: Option<RowIndex>,
}

impl<V> Default for ScrollReconciler<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ScrollReconciler<V> {
    pub fn new() -> Self {
        Self {
            window: WindowState::new(),
            pool: RowViewPool::new(),
            constructed: 0,
            hovered: None,
        }
    }

    pub fn window(&self) -> &WindowState<V> {
        &self.window
    }

    pub fn pool(&self) -> &RowViewPool<V> {
        &self.pool
    }

    /// Returns how many views built through the data source are still owned.
    ///
    /// At every quiescent point this equals `window().len() + pool().len()`.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Releases every row, clears dividers and zeroes the window.
    pub fn collapse(&mut self, layout: &mut LayoutEngine) {
        let released = self.window.len();
        for view in self.window.take_views() {
            self.pool.release(view);
        }
        self.window.reset();
        layout.clear_dividers();
        log::debug!("window collapsed, {} views returned to pool", released);
    }
}

impl<V: VisualElement> ScrollReconciler<V> {
    /// Builds a fresh template view and returns its natural size.
    ///
    /// The template joins the pool only while the current window still lacks
    /// views; once enough exist (after a re-measure) it is dropped, so the
    /// pool never grows by re-measuring alone.
    pub fn measure_template<S>(&mut self, source: &S) -> Vec2
    where
        S: DataSource<View = V>,
    {
        let view = source.create_view();
        let size = view.min_size();
        let owned = self.window.len() + self.pool.len();
        if owned < self.window.visible_count() + 1 {
            self.constructed += 1;
            self.pool.release(view);
        }
        size
    }

    /// Obtains (or constructs) a view, binds it to `index` and derives its flags.
    fn materialize<S>(
        &mut self,
        index: RowIndex,
        source: &S,
        layout: &LayoutEngine,
        selection: &SelectionState,
    ) -> MaterializedRow<V>
    where
        S: DataSource<View = V>,
    {
        let mut view = match self.pool.obtain() {
            Some(view) => view,
            None => {
                self.constructed += 1;
                source.create_view()
            }
        };
        view.resize(vec2(layout.viewport_size().x, layout.row_height()));
        source.bind_row(index, &mut view);
        let mut row = MaterializedRow::new(view, index);
        let flags = RowFlags {
            hovered: self.hovered == Some(index),
            selected: selection.is_selected(index),
        };
        if row.set_flags(flags) {
            row.view_mut().refresh();
        }
        row
    }

    /// Rebuilds the window from scratch around `anchor_offset`.
    ///
    /// The first row is the one under the anchor offset (row 0 for a fresh
    /// list), pulled back if fewer than `visible_count + 1` rows follow it; rows
    /// are appended until `visible_count + 1` exist or the data ends.
    pub fn relayout<S>(
        &mut self,
        source: &S,
        layout: &mut LayoutEngine,
        selection: &SelectionState,
        anchor_offset: f32,
    ) where
        S: DataSource<View = V>,
    {
        let length = source.length();
        if length == 0 || layout.is_degenerate() {
            self.collapse(layout);
            return;
        }
        for view in self.window.take_views() {
            self.pool.release(view);
        }

        let visible_count = layout.visible_count();
        let anchor = anchor_offset.max(0.0);
        // Near the data end, start early enough to still fill the window.
        let first = ((anchor / layout.row_extent()).floor() as usize)
            .min(length.saturating_sub(visible_count + 1));
        self.window.set_visible_count(visible_count);
        self.window.set_previous_offset(anchor_offset);
        self.window.restart_at(first);

        let mut index = first;
        while self.window.len() < visible_count + 1 && index < length {
            let row = self.materialize(index, source, layout, selection);
            self.window.push_back(row);
            index += 1;
        }
        layout.place_all(&mut self.window);

        log::debug!(
            "relayout: rows {}..={} of {} (visible {}, pooled {})",
            self.window.first_index(),
            self.window.last_index(),
            length,
            visible_count,
            self.pool.len()
        );
    }

    /// Applies a new scroll offset, recycling rows that crossed the viewport edges.
    pub fn scroll_to<S>(
        &mut self,
        new_offset: f32,
        source: &S,
        layout: &mut LayoutEngine,
        selection: &SelectionState,
    ) -> ScrollOutcome
    where
        S: DataSource<View = V>,
    {
        let previous = self.window.previous_offset();
        if new_offset == previous {
            return ScrollOutcome::Unchanged;
        }
        let length = source.length();
        let extent = layout.row_extent();
        if length == 0 || self.window.is_empty() || extent <= 0.0 {
            self.window.set_previous_offset(new_offset);
            return ScrollOutcome::Unchanged;
        }

        let delta = (new_offset - previous).abs();
        if new_offset > previous {
            let content_end = match self.window.last_row() {
                Some(row) => row.rect().min.y + extent,
                None => return ScrollOutcome::Unchanged,
            };
            let viewport_end = new_offset + layout.viewport_size().y;
            let items = if content_end < viewport_end {
                ((viewport_end - content_end) / extent).ceil() as usize
            } else if delta < extent {
                return ScrollOutcome::Unchanged;
            } else {
                (delta / extent).floor() as usize
            };
            self.window.set_previous_offset(new_offset);
            let shifted = self.shift_down(items, length, source, layout, selection);
            log::trace!("scrolled down to {new_offset}: {shifted} rows recycled");
            ScrollOutcome::Shifted { direction: ScrollDirection::Down, rows: shifted }
        } else {
            let content_start = match self.window.first_row() {
                Some(row) => row.rect().min.y,
                None => return ScrollOutcome::Unchanged,
            };
            let items = if content_start > new_offset {
                ((content_start - new_offset) / extent).ceil() as usize
            } else if delta < extent {
                return ScrollOutcome::Unchanged;
            } else {
                // Step back to the row under the offset, but never so far that
                // a window parked at the data end stops reaching it.
                let target = ((new_offset / extent).floor() as usize)
                    .min(length.saturating_sub(self.window.len()));
                self.window.first_index().saturating_sub(target)
            };
            if items == 0 {
                return ScrollOutcome::Unchanged;
            }
            self.window.set_previous_offset(new_offset);
            let shifted = self.shift_up(items, source, layout, selection);
            log::trace!("scrolled up to {new_offset}: {shifted} rows recycled");
            ScrollOutcome::Shifted { direction: ScrollDirection::Up, rows: shifted }
        }
    }

    fn shift_down<S>(
        &mut self,
        items: usize,
        length: usize,
        source: &S,
        layout: &mut LayoutEngine,
        selection: &SelectionState,
    ) -> usize
    where
        S: DataSource<View = V>,
    {
        let room = (length - 1).saturating_sub(self.window.last_index());
        let steps = items.min(room);
        let len = self.window.len();
        if steps >= len {
            // Every current row would be recycled: rebuild directly at the target.
            let first = self.window.first_index() + steps;
            self.rebuild_at(first, len, source, layout, selection);
            return steps;
        }
        for _ in 0..steps {
            let next = self.window.last_index() + 1;
            if let Some(row) = self.window.pop_front() {
                self.pool.release(row.into_view());
            }
            let row = self.materialize(next, source, layout, selection);
            self.window.push_back(row);
            layout.place_appended(&mut self.window);
        }
        steps
    }

    fn shift_up<S>(
        &mut self,
        items: usize,
        source: &S,
        layout: &mut LayoutEngine,
        selection: &SelectionState,
    ) -> usize
    where
        S: DataSource<View = V>,
    {
        let steps = items.min(self.window.first_index());
        let len = self.window.len();
        if steps >= len {
            let first = self.window.first_index() - steps;
            self.rebuild_at(first, len, source, layout, selection);
            return steps;
        }
        for _ in 0..steps {
            let next = self.window.first_index() - 1;
            if let Some(row) = self.window.pop_back() {
                self.pool.release(row.into_view());
            }
            let row = self.materialize(next, source, layout, selection);
            self.window.push_front(row);
            layout.place_prepended(&mut self.window);
        }
        steps
    }

    /// Replaces the whole window with `count` rows starting at `first`.
    fn rebuild_at<S>(
        &mut self,
        first: RowIndex,
        count: usize,
        source: &S,
        layout: &mut LayoutEngine,
        selection: &SelectionState,
    ) where
        S: DataSource<View = V>,
    {
        for view in self.window.take_views() {
            self.pool.release(view);
        }
        self.window.restart_at(first);
        for index in first..first + count {
            let row = self.materialize(index, source, layout, selection);
            self.window.push_back(row);
        }
        layout.place_all(&mut self.window);
    }

    /// Re-binds the content of every materialized row without touching the pool.
    pub fn rebind_all<S>(&mut self, source: &S, selection: &SelectionState)
    where
        S: DataSource<View = V>,
    {
        for row in self.window.rows_mut() {
            let index = row.index();
            source.bind_row(index, row.view_mut());
            let flags = RowFlags {
                selected: selection.is_selected(index),
                ..row.flags()
            };
            row.set_flags(flags);
            row.view_mut().refresh();
        }
    }

    /// Re-derives the selected flag of every row from `selection`.
    pub fn sync_selection(&mut self, selection: &SelectionState) {
        for row in self.window.rows_mut() {
            let flags = RowFlags {
                selected: selection.is_selected(row.index()),
                ..row.flags()
            };
            if row.set_flags(flags) {
                row.view_mut().refresh();
            }
        }
    }

    /// Returns the row recorded as under the pointer, materialized or not.
    pub fn hovered(&self) -> Option<RowIndex> {
        self.hovered
    }

    /// Records whether the pointer is over row `index` and updates its flag.
    ///
    /// Only one row is hovered at a time. Returns false if no materialized
    /// row changed.
    pub fn set_hovered(&mut self, index: RowIndex, hovered: bool) -> bool {
        let mut changed = false;
        if hovered {
            if let Some(previous) = self.hovered.filter(|&previous| previous != index) {
                changed |= self.set_row_hovered(previous, false);
            }
            self.hovered = Some(index);
        } else if self.hovered == Some(index) {
            self.hovered = None;
        }
        changed | self.set_row_hovered(index, hovered)
    }

    /// Forgets the hovered row and clears its flag.
    pub fn clear_hovered(&mut self) -> bool {
        match self.hovered.take() {
            Some(index) => self.set_row_hovered(index, false),
            None => false,
        }
    }

    fn set_row_hovered(&mut self, index: RowIndex, hovered: bool) -> bool {
        let Some(row) = self.window.row_mut(index) else {
            return false;
        };
        let flags = RowFlags { hovered, ..row.flags() };
        let changed = row.set_flags(flags);
        if changed {
            row.view_mut().refresh();
        }
        changed
    }

    /// Resizes every in-use view to the current row size.
    pub fn resize_views(&mut self, layout: &mut LayoutEngine) {
        let size = vec2(layout.viewport_size().x, layout.row_height());
        for row in self.window.rows_mut() {
            row.view_mut().resize(size);
        }
        layout.resize_width(&mut self.window);
    }

    /// Refreshes every view, in use or pooled (after a theme change).
    pub fn refresh_views(&mut self) {
        for row in self.window.rows_mut() {
            row.view_mut().refresh();
        }
        for view in self.pool.iter_mut() {
            view.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Default)]
    struct TestView {
        bound: Option<RowIndex>,
        size: Vec2,
    }

    impl VisualElement for TestView {
        fn resize(&mut self, size: Vec2) {
            self.size = size;
        }

        fn min_size(&self) -> Vec2 {
            vec2(50.0, 10.0)
        }

        fn refresh(&mut self) {}
    }

    struct Numbers {
        length: Cell<usize>,
    }

    impl DataSource for Numbers {
        type View = TestView;

        fn length(&self) -> usize {
            self.length.get()
        }

        fn create_view(&self) -> TestView {
            TestView::default()
        }

        fn bind_row(&self, index: RowIndex, view: &mut TestView) {
            view.bound = Some(index);
        }
    }

    fn setup(length: usize, height: f32) -> (Numbers, LayoutEngine, ScrollReconciler<TestView>) {
        let source = Numbers { length: Cell::new(length) };
        let mut reconciler = ScrollReconciler::new();
        let mut layout = LayoutEngine::new();
        let size = reconciler.measure_template(&source);
        layout.set_row_min_size(size);
        layout.set_viewport_size(vec2(100.0, height));
        reconciler.relayout(&source, &mut layout, &SelectionState::new(), 0.0);
        (source, layout, reconciler)
    }

    fn bound_indices(reconciler: &ScrollReconciler<TestView>) -> Vec<RowIndex> {
        reconciler
            .window()
            .rows()
            .map(|row| row.view().bound.unwrap_or(usize::MAX))
            .collect()
    }

    #[test]
    fn test_relayout_fills_visible_plus_one() {
        let (_, _, reconciler) = setup(100, 45.0);
        let window = reconciler.window();
        assert_eq!(window.visible_count(), 5);
        assert_eq!((window.first_index(), window.last_index()), (0, 5));
        assert_eq!(bound_indices(&reconciler), vec![0, 1, 2, 3, 4, 5]);
        // The template view was reused as the first row.
        assert_eq!(reconciler.constructed(), 6);
        assert!(reconciler.pool().is_empty());
    }

    #[test]
    fn test_relayout_stops_at_data_end() {
        let (_, _, reconciler) = setup(3, 45.0);
        assert_eq!(reconciler.window().len(), 3);
        assert_eq!(reconciler.window().last_index(), 2);
    }

    #[test]
    fn test_intra_row_scroll_is_noop() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        let selection = SelectionState::new();
        let outcome = reconciler.scroll_to(5.0, &source, &mut layout, &selection);
        assert_eq!(outcome, ScrollOutcome::Unchanged);
        assert_eq!(reconciler.window().first_index(), 0);
        // The offset is only recorded once rows move.
        assert_eq!(reconciler.window().previous_offset(), 0.0);
    }

    #[test]
    fn test_scroll_down_recycles_rows() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        let selection = SelectionState::new();
        let outcome = reconciler.scroll_to(25.0, &source, &mut layout, &selection);
        assert_eq!(outcome, ScrollOutcome::Shifted { direction: ScrollDirection::Down, rows: 2 });
        assert_eq!(bound_indices(&reconciler), vec![2, 3, 4, 5, 6]);
        assert_eq!(reconciler.window().first_row().map(|r| r.rect().min.y), Some(20.0));
        assert_eq!(reconciler.constructed(), 5);
    }

    #[test]
    fn test_scroll_up_recycles_rows() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        let selection = SelectionState::new();
        reconciler.scroll_to(100.0, &source, &mut layout, &selection);
        let first = reconciler.window().first_index();
        assert!(first > 0);

        reconciler.scroll_to(60.0, &source, &mut layout, &selection);
        let window = reconciler.window();
        assert!(window.first_index() <= 6);
        assert_eq!(window.last_index() - window.first_index() + 1, window.len());
        let tops: Vec<f32> = window.rows().map(|r| r.rect().min.y).collect();
        let expected: Vec<f32> = (window.first_index()..=window.last_index())
            .map(|i| i as f32 * 10.0)
            .collect();
        assert_eq!(tops, expected);
    }

    #[test]
    fn test_large_jump_rebuilds_at_target() {
        let (source, mut layout, mut reconciler) = setup(10_000, 40.0);
        let selection = SelectionState::new();
        reconciler.scroll_to(50_000.0, &source, &mut layout, &selection);
        let window = reconciler.window();
        assert_eq!(window.len(), 5);
        assert!(window.first_index() <= 5000);
        assert!(window.last_index() >= 5003);
        assert_eq!(reconciler.constructed(), 5);
    }

    #[test]
    fn test_scroll_never_passes_data_end() {
        let (source, mut layout, mut reconciler) = setup(20, 40.0);
        let selection = SelectionState::new();
        reconciler.scroll_to(10_000.0, &source, &mut layout, &selection);
        assert_eq!(reconciler.window().last_index(), 19);
        assert_eq!(reconciler.window().first_index(), 15);

        // Data shrank without a refresh: scrolling further must not walk past it.
        source.length.set(10);
        reconciler.scroll_to(20_000.0, &source, &mut layout, &selection);
        assert_eq!(reconciler.window().last_index(), 19);
    }

    #[test]
    fn test_remeasure_does_not_grow_pool() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        for _ in 0..10 {
            layout.invalidate_row_height();
            let size = reconciler.measure_template(&source);
            layout.set_row_min_size(size);
            reconciler.relayout(&source, &mut layout, &SelectionState::new(), 0.0);
        }
        assert_eq!(reconciler.window().len(), 5);
        assert!(reconciler.pool().is_empty());
        assert_eq!(reconciler.constructed(), 5);
    }

    #[test]
    fn test_scroll_up_from_past_the_end_keeps_bottom_covered() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        let selection = SelectionState::new();
        reconciler.scroll_to(5_000.0, &source, &mut layout, &selection);
        assert_eq!(reconciler.window().first_index(), 95);

        // Rows 95..=99 already start above 980, so the window stays at the end.
        let outcome = reconciler.scroll_to(980.0, &source, &mut layout, &selection);
        assert_eq!(outcome, ScrollOutcome::Unchanged);
        assert_eq!(reconciler.window().last_index(), 99);

        reconciler.scroll_to(900.0, &source, &mut layout, &selection);
        let window = reconciler.window();
        assert_eq!((window.first_index(), window.last_index()), (90, 94));
    }

    #[test]
    fn test_collapse_returns_every_view() {
        let (_, mut layout, mut reconciler) = setup(100, 40.0);
        let in_use = reconciler.window().len();
        reconciler.collapse(&mut layout);
        assert!(reconciler.window().is_empty());
        assert_eq!(reconciler.pool().len(), in_use);
        assert_eq!(reconciler.constructed(), in_use);
    }

    #[test]
    fn test_hover_flag() {
        let (_, _, mut reconciler) = setup(100, 40.0);
        assert!(reconciler.set_hovered(2, true));
        assert!(!reconciler.set_hovered(2, true));
        let flags = reconciler.window().row(2).map(|r| r.flags());
        assert_eq!(flags, Some(RowFlags { hovered: true, selected: false }));

        // Moving onto another row clears the first one.
        assert!(reconciler.set_hovered(3, true));
        assert_eq!(reconciler.window().row(2).map(|r| r.flags().hovered), Some(false));
        assert_eq!(reconciler.hovered(), Some(3));
        assert!(reconciler.clear_hovered());
        assert_eq!(reconciler.hovered(), None);
    }

    #[test]
    fn test_hover_survives_recycling() {
        let (source, mut layout, mut reconciler) = setup(100, 40.0);
        let selection = SelectionState::new();
        reconciler.set_hovered(1, true);

        reconciler.scroll_to(100.0, &source, &mut layout, &selection);
        assert!(reconciler.window().row(1).is_none());
        reconciler.scroll_to(0.0, &source, &mut layout, &selection);
        assert_eq!(reconciler.window().row(1).map(|r| r.flags().hovered), Some(true));
        assert_eq!(reconciler.window().row(2).map(|r| r.flags().hovered), Some(false));
    }
}
