//! Scroll host backed by an egui `ScrollArea`.
//!
//! egui owns the real scroll position, so the host only buffers what the list
//! asks for: an offset to apply on the next frame, the content size to
//! reserve, and whether a repaint is due.

use egui::Vec2;
use rvlist::ScrollHost;

#[derive(Debug, Default)]
pub struct EguiScrollHost {
    viewport: Vec2,
    pending_offset: Option<f32>,
    content_size: Vec2,
    repaint_requested: bool,
}

impl EguiScrollHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the size the scroll area will occupy this frame.
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Takes the offset the list asked for, if any, to pass to the scroll area.
    pub fn take_pending_offset(&mut self) -> Option<f32> {
        self.pending_offset.take()
    }

    pub fn content_size(&self) -> Vec2 {
        self.content_size
    }

    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }
}

impl ScrollHost for EguiScrollHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn set_offset(&mut self, offset: f32) {
        self.pending_offset = Some(offset.max(0.0));
    }

    fn set_content_size(&mut self, size: Vec2) {
        self.content_size = size;
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }
}
