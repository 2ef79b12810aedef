//! Selection state management.
//!
//! This module encapsulates the list's single active selection.

use crate::traits::RowIndex;

/// State related to row selection.
///
/// Responsibilities:
/// - Tracking the selected row index (at most one)
/// - Providing intent-revealing selection queries
/// - Dropping a selection the data no longer covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Currently selected row index
    selected: Option<RowIndex>,
}

impl SelectionState {
    /// Creates a new selection state with nothing selected.
    pub fn new() -> Self {
        Self { selected: None }
    }

    // ===== Selection Queries =====

    /// Returns the currently selected row index, if any.
    pub fn selected(&self) -> Option<RowIndex> {
        self.selected
    }

    /// Returns whether `index` is the selected row.
    pub fn is_selected(&self, index: RowIndex) -> bool {
        self.selected == Some(index)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    // ===== Selection Mutations =====

    /// Makes `index` the only selected row, returning the previous selection.
    pub fn select(&mut self, index: RowIndex) -> Option<RowIndex> {
        self.selected.replace(index)
    }

    /// Clears the selection, returning what was selected.
    pub fn clear(&mut self) -> Option<RowIndex> {
        self.selected.take()
    }

    /// Clears the selection if it points at or past `length`.
    ///
    /// Returns the dropped index, if any.
    pub fn retain_below(&mut self, length: usize) -> Option<RowIndex> {
        match self.selected {
            Some(index) if index >= length => self.selected.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces_previous() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.select(3), None);
        assert_eq!(selection.select(9), Some(3));
        assert!(selection.is_selected(9));
        assert!(!selection.is_selected(3));
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionState::new();
        selection.select(1);
        assert_eq!(selection.clear(), Some(1));
        assert!(selection.is_empty());
        assert_eq!(selection.clear(), None);
    }

    #[test]
    fn test_retain_below() {
        let mut selection = SelectionState::new();
        selection.select(10);
        assert_eq!(selection.retain_below(11), None);
        assert_eq!(selection.selected(), Some(10));
        assert_eq!(selection.retain_below(10), Some(10));
        assert!(selection.is_empty());
    }
}
