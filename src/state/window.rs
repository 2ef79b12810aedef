//! Materialized window state.
//!
//! This module tracks which contiguous range of logical rows currently has a
//! view attached, in index order, together with the scroll offset the
//! reconciler last acted on.

use crate::traits::RowIndex;
use egui::Rect;
use std::collections::VecDeque;

/// Presentation flags of a materialized row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowFlags {
    pub hovered: bool,
    pub selected: bool,
}

/// What a row looks like once both flags are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Hovered,
    Selected,
}

impl RowFlags {
    /// Selected wins over hovered.
    pub fn highlight(&self) -> Highlight {
        if self.selected {
            Highlight::Selected
        } else if self.hovered {
            Highlight::Hovered
        } else {
            Highlight::None
        }
    }
}

/// A pooled view bound to one logical row.
///
/// The bound index doubles as the row's tap command: the controller's single
/// tap handler selects whatever index the tapped row carries.
#[derive(Debug)]
pub struct MaterializedRow<V> {
    view: V,
    index: RowIndex,
    rect: Rect,
    flags: RowFlags,
}

impl<V> MaterializedRow<V> {
    pub(crate) fn new(view: V, index: RowIndex) -> Self {
        Self {
            view,
            index,
            rect: Rect::NOTHING,
            flags: RowFlags::default(),
        }
    }

    /// Returns the index this row is bound to.
    pub fn index(&self) -> RowIndex {
        self.index
    }

    /// Returns the row's rectangle in content coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn flags(&self) -> RowFlags {
        self.flags
    }

    /// Returns the bound view.
    pub fn view(&self) -> &V {
        &self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Replaces the flags, returning true if anything changed.
    pub(crate) fn set_flags(&mut self, flags: RowFlags) -> bool {
        let changed = self.flags != flags;
        self.flags = flags;
        changed
    }

    pub(crate) fn into_view(self) -> V {
        self.view
    }
}

/// State of the materialized window.
///
/// Responsibilities:
/// - Owning the materialized rows in index order
/// - Tracking the inclusive index bounds and visible row count
/// - Remembering the last scroll offset acted upon
///
/// Invariant: whenever rows exist, `last_index - first_index + 1 == len()`
/// and the row at position `i` is bound to `first_index + i`.
#[derive(Debug)]
pub struct WindowState<V> {
    first_index: RowIndex,
    last_index: RowIndex,
    visible_count: usize,
    previous_offset: f32,
    rows: VecDeque<MaterializedRow<V>>,
}

impl<V> Default for WindowState<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> WindowState<V> {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self {
            first_index: 0,
            last_index: 0,
            visible_count: 0,
            previous_offset: 0.0,
            rows: VecDeque::new(),
        }
    }

    // ===== Window Queries =====

    pub fn first_index(&self) -> RowIndex {
        self.first_index
    }

    pub fn last_index(&self) -> RowIndex {
        self.last_index
    }

    /// Returns how many rows fit in the viewport (`ceil(height / extent)`).
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Returns the scroll offset the reconciler last acted on.
    pub fn previous_offset(&self) -> f32 {
        self.previous_offset
    }

    /// Returns the number of materialized rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the materialized rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &MaterializedRow<V>> {
        self.rows.iter()
    }

    /// Returns the row bound to `index`, if it is materialized.
    pub fn row(&self, index: RowIndex) -> Option<&MaterializedRow<V>> {
        self.position_of(index).and_then(|pos| self.rows.get(pos))
    }

    pub fn first_row(&self) -> Option<&MaterializedRow<V>> {
        self.rows.front()
    }

    pub fn last_row(&self) -> Option<&MaterializedRow<V>> {
        self.rows.back()
    }

    fn position_of(&self, index: RowIndex) -> Option<usize> {
        if self.rows.is_empty() || index < self.first_index || index > self.last_index {
            None
        } else {
            Some(index - self.first_index)
        }
    }

    // ===== Window Mutations =====

    pub(crate) fn row_mut(&mut self, index: RowIndex) -> Option<&mut MaterializedRow<V>> {
        self.position_of(index).and_then(|pos| self.rows.get_mut(pos))
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut MaterializedRow<V>> {
        self.rows.iter_mut()
    }

    pub(crate) fn rows_slice_mut(&mut self) -> &mut VecDeque<MaterializedRow<V>> {
        &mut self.rows
    }

    pub(crate) fn set_visible_count(&mut self, visible_count: usize) {
        self.visible_count = visible_count;
    }

    pub(crate) fn set_previous_offset(&mut self, offset: f32) {
        self.previous_offset = offset;
    }

    /// Starts an empty window whose first appended row will be `first_index`.
    pub(crate) fn restart_at(&mut self, first_index: RowIndex) {
        debug_assert!(self.rows.is_empty());
        self.first_index = first_index;
        self.last_index = first_index;
    }

    /// Appends the row bound to `last_index + 1` (or `first_index` on an empty window).
    pub(crate) fn push_back(&mut self, row: MaterializedRow<V>) {
        if self.rows.is_empty() {
            self.first_index = row.index;
        }
        self.last_index = row.index;
        self.rows.push_back(row);
        debug_assert_eq!(self.last_index - self.first_index + 1, self.rows.len());
    }

    /// Prepends the row bound to `first_index - 1`.
    pub(crate) fn push_front(&mut self, row: MaterializedRow<V>) {
        if self.rows.is_empty() {
            self.last_index = row.index;
        }
        self.first_index = row.index;
        self.rows.push_front(row);
        debug_assert_eq!(self.last_index - self.first_index + 1, self.rows.len());
    }

    /// Removes the first row; the window's lower bound moves up by one.
    pub(crate) fn pop_front(&mut self) -> Option<MaterializedRow<V>> {
        let row = self.rows.pop_front()?;
        if self.rows.is_empty() {
            self.first_index = self.last_index;
        } else {
            self.first_index += 1;
        }
        Some(row)
    }

    /// Removes the last row; the window's upper bound moves down by one.
    pub(crate) fn pop_back(&mut self) -> Option<MaterializedRow<V>> {
        let row = self.rows.pop_back()?;
        if self.rows.is_empty() {
            self.last_index = self.first_index;
        } else {
            self.last_index -= 1;
        }
        Some(row)
    }

    /// Removes every row, handing back their views in index order.
    pub(crate) fn take_views(&mut self) -> Vec<V> {
        self.rows.drain(..).map(MaterializedRow::into_view).collect()
    }

    /// Zeroes every field. Rows must already have been taken.
    pub(crate) fn reset(&mut self) {
        debug_assert!(self.rows.is_empty());
        self.first_index = 0;
        self.last_index = 0;
        self.visible_count = 0;
        self.previous_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with(indices: std::ops::RangeInclusive<usize>) -> WindowState<u32> {
        let mut window = WindowState::new();
        for index in indices {
            window.push_back(MaterializedRow::new(index as u32, index));
        }
        window
    }

    #[test]
    fn test_bounds_follow_pushes() {
        let window = window_with(3..=7);
        assert_eq!(window.first_index(), 3);
        assert_eq!(window.last_index(), 7);
        assert_eq!(window.len(), 5);
        assert_eq!(window.row(5).map(|r| *r.view()), Some(5));
        assert!(window.row(8).is_none());
        assert!(window.row(2).is_none());
    }

    #[test]
    fn test_shift_down_by_one() {
        let mut window = window_with(0..=3);
        let dropped = window.pop_front().map(MaterializedRow::into_view);
        assert_eq!(dropped, Some(0));
        window.push_back(MaterializedRow::new(4, 4));
        assert_eq!((window.first_index(), window.last_index()), (1, 4));
        let order: Vec<usize> = window.rows().map(|r| r.index()).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shift_up_by_one() {
        let mut window = window_with(5..=8);
        window.pop_back();
        window.push_front(MaterializedRow::new(4, 4));
        assert_eq!((window.first_index(), window.last_index()), (4, 7));
        assert_eq!(window.first_row().map(|r| r.index()), Some(4));
    }

    #[test]
    fn test_take_views_and_reset() {
        let mut window = window_with(0..=2);
        window.set_visible_count(2);
        window.set_previous_offset(12.0);
        let views = window.take_views();
        window.reset();
        assert_eq!(views, vec![0, 1, 2]);
        assert!(window.is_empty());
        assert_eq!(window.visible_count(), 0);
        assert_eq!(window.previous_offset(), 0.0);
        assert_eq!((window.first_index(), window.last_index()), (0, 0));
    }

    #[test]
    fn test_selected_overrides_hovered() {
        let flags = RowFlags { hovered: true, selected: true };
        assert_eq!(flags.highlight(), Highlight::Selected);
        let flags = RowFlags { hovered: true, selected: false };
        assert_eq!(flags.highlight(), Highlight::Hovered);
        assert_eq!(RowFlags::default().highlight(), Highlight::None);
    }
}
