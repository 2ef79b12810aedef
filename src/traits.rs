use crate::theme::Theme;
use egui::Vec2;

/// Type alias for row indices (logical positions in the data source).
pub type RowIndex = usize;

/// Shared capability of anything the list lays out: the list itself and every row view.
pub trait VisualElement {
    /// Resizes the element to exactly `size`.
    fn resize(&mut self, size: Vec2);

    /// Returns the size this element should not shrink below.
    fn min_size(&self) -> Vec2;

    /// Re-derives any cached visual state after a content or theme change.
    fn refresh(&mut self);
}

/// Trait for the data behind a list.
///
/// The engine never holds on to data; it asks for the current length at query
/// time and binds row content into pooled views on demand.
pub trait DataSource {
    type View: VisualElement;

    /// Returns the current number of logical rows.
    fn length(&self) -> usize;

    /// Constructs a fresh row view (called only when the pool is empty).
    fn create_view(&self) -> Self::View;

    /// Fills `view` with the content of the row at `index`.
    fn bind_row(&self, index: RowIndex, view: &mut Self::View);

    /// Picks up theme values that change the natural size of new views.
    fn apply_theme(&mut self, _theme: &Theme) {}
}

/// Trait for the scroll container hosting the list.
///
/// The host reports offset changes back by calling
/// [`ListController::on_scrolled`](crate::ListController::on_scrolled).
/// `set_offset` must not call back into the controller.
pub trait ScrollHost {
    /// Returns the current viewport size (width, height).
    fn viewport_size(&self) -> Vec2;

    /// Moves the viewport to a new vertical offset.
    fn set_offset(&mut self, offset: f32);

    /// Publishes the total scrollable content size.
    fn set_content_size(&mut self, size: Vec2);

    /// Asks the host to repaint the viewport.
    fn request_repaint(&mut self);
}
