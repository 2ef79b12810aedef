//! Row and separator placement.
//!
//! All rows share one fixed height, measured once from a template view and
//! cached. Rows live in content coordinates: the row bound to index `i` spans
//! `[i * extent, i * extent + row_height)` where `extent` is the row height
//! plus the separator thickness.

use crate::state::WindowState;
use crate::traits::RowIndex;
use egui::{pos2, vec2, Rect, Vec2};

/// A divider drawn between two consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    rect: Rect,
}

impl Divider {
    /// Returns the divider's rectangle in content coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Positions materialized rows and dividers inside the viewport's content space.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    /// Cached row height, `None` until measured or after invalidation
    row_height: Option<f32>,
    /// Natural width of a row, reported as the content width
    row_min_width: f32,
    separators: bool,
    separator_thickness: f32,
    viewport: Vec2,
    dividers: Vec<Divider>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Creates a layout engine with no measured row height and no separators.
    pub fn new() -> Self {
        Self {
            row_height: None,
            row_min_width: 0.0,
            separators: false,
            separator_thickness: 0.0,
            viewport: Vec2::ZERO,
            dividers: Vec::new(),
        }
    }

    // ===== Metrics =====

    /// Returns whether the row height has to be measured before the next layout.
    pub fn needs_measure(&self) -> bool {
        self.row_height.is_none()
    }

    /// Caches the row metrics taken from a template view's minimum size.
    pub fn set_row_min_size(&mut self, min_size: Vec2) {
        self.row_height = Some(min_size.y.max(0.0));
        self.row_min_width = min_size.x.max(0.0);
    }

    /// Drops the cached row height so the next refresh re-measures it.
    pub fn invalidate_row_height(&mut self) {
        self.row_height = None;
    }

    /// Returns the shared row height (0 until measured).
    pub fn row_height(&self) -> f32 {
        self.row_height.unwrap_or(0.0)
    }

    pub fn row_min_width(&self) -> f32 {
        self.row_min_width
    }

    /// Returns the effective separator thickness (0 when separators are off).
    pub fn separator_thickness(&self) -> f32 {
        if self.separators {
            self.separator_thickness
        } else {
            0.0
        }
    }

    pub fn separators_enabled(&self) -> bool {
        self.separators
    }

    /// Turns separators on or off and sets their current thickness.
    pub fn set_separators(&mut self, enabled: bool, thickness: f32) {
        self.separators = enabled;
        self.separator_thickness = thickness.max(0.0);
        if !enabled {
            self.dividers.clear();
        }
    }

    /// Row height plus separator thickness.
    pub fn row_extent(&self) -> f32 {
        self.row_height() + self.separator_thickness()
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Returns true when no row can be laid out (no height or no extent).
    pub fn is_degenerate(&self) -> bool {
        self.viewport.y <= 0.0 || self.row_extent() <= 0.0
    }

    /// Number of rows needed to cover the viewport height.
    pub fn visible_count(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        (self.viewport.y / self.row_extent()).ceil() as usize
    }

    /// Total content size reported to the scroll container.
    ///
    /// With separators there is no trailing divider after the last row.
    pub fn content_size(&self, length: usize) -> Vec2 {
        let height = if length == 0 {
            0.0
        } else if self.separators {
            length as f32 * self.row_extent() - self.separator_thickness()
        } else {
            length as f32 * self.row_height()
        };
        vec2(self.row_min_width, height.max(0.0))
    }

    /// Y position of the top of the row bound to `index`.
    pub fn row_top(&self, index: RowIndex) -> f32 {
        index as f32 * self.row_extent()
    }

    /// Returns the row under content coordinate `y`, ignoring separator gaps.
    pub fn row_at(&self, y: f32, length: usize) -> Option<RowIndex> {
        let extent = self.row_extent();
        if y < 0.0 || extent <= 0.0 {
            return None;
        }
        let index = (y / extent).floor() as usize;
        let within = y - self.row_top(index);
        if index < length && within < self.row_height() {
            Some(index)
        } else {
            None
        }
    }

    fn row_rect(&self, top: f32) -> Rect {
        Rect::from_min_size(pos2(0.0, top), vec2(self.viewport.x, self.row_height()))
    }

    // ===== Placement =====

    /// Recomputes every row's position from scratch.
    pub fn place_all<V>(&mut self, window: &mut WindowState<V>) {
        let first = window.first_index();
        let extent = self.row_extent();
        let rects: Vec<Rect> = (0..window.len())
            .map(|i| self.row_rect((first + i) as f32 * extent))
            .collect();
        for (row, rect) in window.rows_mut().zip(rects) {
            row.set_rect(rect);
        }
        self.sync_dividers(window);
    }

    /// Places the last row right after its predecessor.
    pub fn place_appended<V>(&mut self, window: &mut WindowState<V>) {
        let extent = self.row_extent();
        let rows = window.rows_slice_mut();
        let len = rows.len();
        if len == 0 {
            return;
        }
        let top = if len > 1 {
            rows[len - 2].rect().min.y + extent
        } else {
            rows[len - 1].index() as f32 * extent
        };
        let rect = self.row_rect(top);
        rows[len - 1].set_rect(rect);
        self.sync_dividers(window);
    }

    /// Places the first row right before its successor.
    pub fn place_prepended<V>(&mut self, window: &mut WindowState<V>) {
        let extent = self.row_extent();
        let rows = window.rows_slice_mut();
        if rows.is_empty() {
            return;
        }
        let top = if rows.len() > 1 {
            rows[1].rect().min.y - extent
        } else {
            rows[0].index() as f32 * extent
        };
        let rect = self.row_rect(top);
        rows[0].set_rect(rect);
        self.sync_dividers(window);
    }

    /// Stretches every row to the current viewport width, keeping positions.
    pub fn resize_width<V>(&mut self, window: &mut WindowState<V>) {
        let size = vec2(self.viewport.x, self.row_height());
        for row in window.rows_mut() {
            let rect = Rect::from_min_size(row.rect().min, size);
            row.set_rect(rect);
        }
        self.sync_dividers(window);
    }

    // ===== Separators =====

    /// Returns the dividers between consecutive rows.
    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    pub fn clear_dividers(&mut self) {
        self.dividers.clear();
    }

    /// Resizes the divider list to `rows - 1` and moves each divider under its row.
    ///
    /// Always uses the current thickness.
    pub fn sync_dividers<V>(&mut self, window: &WindowState<V>) {
        if !self.separators {
            self.dividers.clear();
            return;
        }
        let wanted = window.len().saturating_sub(1);
        self.dividers.truncate(wanted);
        let size = vec2(self.viewport.x, self.separator_thickness);
        let tops: Vec<f32> = window
            .rows()
            .take(wanted)
            .map(|row| row.rect().max.y)
            .collect();
        for (i, top) in tops.into_iter().enumerate() {
            let rect = Rect::from_min_size(pos2(0.0, top), size);
            match self.dividers.get_mut(i) {
                Some(divider) => divider.rect = rect,
                None => self.dividers.push(Divider { rect }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MaterializedRow;

    fn engine(row_height: f32, separators: Option<f32>, viewport: Vec2) -> LayoutEngine {
        let mut layout = LayoutEngine::new();
        layout.set_row_min_size(vec2(120.0, row_height));
        if let Some(thickness) = separators {
            layout.set_separators(true, thickness);
        }
        layout.set_viewport_size(viewport);
        layout
    }

    fn window(first: usize, count: usize) -> WindowState<()> {
        let mut window = WindowState::new();
        for index in first..first + count {
            window.push_back(MaterializedRow::new((), index));
        }
        window
    }

    #[test]
    fn test_visible_count_rounds_up() {
        let layout = engine(30.0, None, vec2(200.0, 400.0));
        assert_eq!(layout.visible_count(), 14);
        let layout = engine(20.0, None, vec2(200.0, 400.0));
        assert_eq!(layout.visible_count(), 20);
    }

    #[test]
    fn test_degenerate_viewport_has_no_rows() {
        let layout = engine(20.0, None, vec2(200.0, 0.0));
        assert!(layout.is_degenerate());
        assert_eq!(layout.visible_count(), 0);
        let unmeasured = LayoutEngine::new();
        assert!(unmeasured.needs_measure());
        assert!(unmeasured.is_degenerate());
    }

    #[test]
    fn test_content_size_without_trailing_separator() {
        let plain = engine(20.0, None, vec2(200.0, 400.0));
        assert_eq!(plain.content_size(10), vec2(120.0, 200.0));

        let divided = engine(20.0, Some(1.0), vec2(200.0, 400.0));
        assert_eq!(divided.row_extent(), 21.0);
        assert_eq!(divided.content_size(10), vec2(120.0, 209.0));
        assert_eq!(divided.content_size(0), vec2(120.0, 0.0));
    }

    #[test]
    fn test_place_all_uses_content_coordinates() {
        let mut layout = engine(20.0, None, vec2(200.0, 100.0));
        let mut rows = window(5, 3);
        layout.place_all(&mut rows);
        let tops: Vec<f32> = rows.rows().map(|r| r.rect().min.y).collect();
        assert_eq!(tops, vec![100.0, 120.0, 140.0]);
        assert!(rows.rows().all(|r| r.rect().size() == vec2(200.0, 20.0)));
    }

    #[test]
    fn test_incremental_placement_follows_neighbours() {
        let mut layout = engine(20.0, None, vec2(200.0, 100.0));
        let mut rows = window(2, 2);
        layout.place_all(&mut rows);

        rows.push_back(MaterializedRow::new((), 4));
        layout.place_appended(&mut rows);
        assert_eq!(rows.last_row().map(|r| r.rect().min.y), Some(80.0));

        rows.push_front(MaterializedRow::new((), 1));
        layout.place_prepended(&mut rows);
        assert_eq!(rows.first_row().map(|r| r.rect().min.y), Some(20.0));
    }

    #[test]
    fn test_dividers_track_row_count() {
        let mut layout = engine(20.0, Some(2.0), vec2(200.0, 100.0));
        let mut rows = window(0, 4);
        layout.place_all(&mut rows);
        assert_eq!(layout.dividers().len(), 3);
        assert_eq!(layout.dividers()[0].rect().min.y, 20.0);
        assert_eq!(layout.dividers()[2].rect().min.y, 64.0);

        rows.pop_back();
        layout.sync_dividers(&rows);
        assert_eq!(layout.dividers().len(), 2);

        let mut single = window(0, 1);
        layout.place_all(&mut single);
        assert!(layout.dividers().is_empty());
    }

    #[test]
    fn test_dividers_pick_up_new_thickness() {
        let mut layout = engine(20.0, Some(1.0), vec2(200.0, 100.0));
        let mut rows = window(0, 2);
        layout.place_all(&mut rows);
        layout.set_separators(true, 3.0);
        layout.place_all(&mut rows);
        assert_eq!(layout.dividers()[0].rect().height(), 3.0);
        assert_eq!(rows.last_row().map(|r| r.rect().min.y), Some(23.0));
    }

    #[test]
    fn test_row_at_skips_separator_gap() {
        let layout = engine(20.0, Some(4.0), vec2(200.0, 100.0));
        assert_eq!(layout.row_at(0.0, 10), Some(0));
        assert_eq!(layout.row_at(22.0, 10), None);
        assert_eq!(layout.row_at(24.0, 10), Some(1));
        assert_eq!(layout.row_at(24.0 * 10.0, 10), None);
        assert_eq!(layout.row_at(-1.0, 10), None);
    }
}
