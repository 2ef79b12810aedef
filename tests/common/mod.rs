//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use egui::{vec2, Vec2};
use rvlist::{DataSource, ListController, RowIndex, ScrollHost, ThemeManager, VisualElement};
use std::cell::RefCell;
use std::rc::Rc;

pub const ROW_HEIGHT: f32 = 20.0;
pub const ROW_WIDTH: f32 = 120.0;

/// Row view recording what it was bound to.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub bound: Option<RowIndex>,
    pub size: Vec2,
    pub refreshes: usize,
}

impl VisualElement for RecordingView {
    fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn min_size(&self) -> Vec2 {
        vec2(ROW_WIDTH, ROW_HEIGHT)
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Data source of `length` anonymous rows.
#[derive(Debug)]
pub struct Rows {
    pub length: usize,
}

impl DataSource for Rows {
    type View = RecordingView;

    fn length(&self) -> usize {
        self.length
    }

    fn create_view(&self) -> RecordingView {
        RecordingView::default()
    }

    fn bind_row(&self, index: RowIndex, view: &mut RecordingView) {
        view.bound = Some(index);
    }
}

/// Scroll host that records what the list asked of it.
#[derive(Debug, Default)]
pub struct MockHost {
    pub viewport: Vec2,
    pub offset: f32,
    pub content: Vec2,
    pub repaints: usize,
}

impl MockHost {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }
}

impl ScrollHost for MockHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn set_content_size(&mut self, size: Vec2) {
        self.content = size;
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Selected(RowIndex),
    Unselected(RowIndex),
}

pub type TestList = ListController<Rows, MockHost>;

/// Builds a refreshed list of `length` rows in a `width` x `height` viewport.
pub fn list(length: usize, width: f32, height: f32) -> TestList {
    list_with_separators(length, width, height, false)
}

/// Same as [`list`], with dividers between rows when `separators` is set.
pub fn list_with_separators(length: usize, width: f32, height: f32, separators: bool) -> TestList {
    let theme = ThemeManager::new().current_theme().clone();
    let host = MockHost::new(vec2(width, height));
    let mut list = ListController::new(Rows { length }, host, theme).with_separators(separators);
    list.refresh();
    list
}

/// Hooks both notifications into a shared log.
pub fn record_notifications(list: &mut TestList) -> Rc<RefCell<Vec<Notification>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let selected = Rc::clone(&log);
    list.set_on_selected(move |index| selected.borrow_mut().push(Notification::Selected(index)));
    let unselected = Rc::clone(&log);
    list.set_on_unselected(move |index| {
        unselected.borrow_mut().push(Notification::Unselected(index))
    });
    log
}

/// Indices the materialized views are bound to, in window order.
pub fn bound(list: &TestList) -> Vec<RowIndex> {
    list.rows()
        .map(|row| row.view().bound.unwrap_or(usize::MAX))
        .collect()
}

/// Resizes both the host viewport and the list.
pub fn resize(list: &mut TestList, size: Vec2) {
    list.host_mut().viewport = size;
    list.resize(size);
}
