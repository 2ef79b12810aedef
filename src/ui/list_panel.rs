//! List panel rendering.
//!
//! Paints the materialized rows and dividers inside a `ScrollArea` and feeds
//! the scroll offset back to the list. Rows outside the window are never
//! visited.

use crate::app::DemoState;
use egui::{vec2, Align2, FontId, ScrollArea, Sense};
use rvlist::{Highlight, RowIndex};

/// Pointer interactions collected while painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInteraction {
    RowTapped(RowIndex),
    HoverChanged(Option<RowIndex>),
}

/// Renders the list into the remaining space of `ui`.
pub fn render_list_panel(ui: &mut egui::Ui, state: &mut DemoState) -> Vec<ListInteraction> {
    let size = ui.available_size();
    state.list.host_mut().set_viewport_size(size);
    state.list.resize(size);

    let colors = state.themes.current_theme().colors.clone();
    let content = state.list.host().content_size();
    let hovered = state.hovered;
    let mut interactions = Vec::new();

    let mut scroll_area = ScrollArea::vertical()
        .id_salt("rvlist_scroll_area")
        .auto_shrink([false, false]);
    if let Some(offset) = state.list.host_mut().take_pending_offset() {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    let list = &mut state.list;
    scroll_area.show_viewport(ui, |ui, viewport| {
        ui.set_height(content.y);
        list.on_scrolled(viewport.min.y);

        let origin = ui.min_rect().min.to_vec2();
        let painter = ui.painter().clone();
        let mut now_hovered = None;

        for row in list.rows() {
            let rect = row.rect().translate(origin);
            let id = ui.id().with(("rvlist_row", row.index()));
            let response = ui.interact(rect, id, Sense::click());
            if response.hovered() {
                now_hovered = Some(row.index());
            }
            if response.clicked() {
                interactions.push(ListInteraction::RowTapped(row.index()));
            }

            let fill = match row.flags().highlight() {
                Highlight::Selected => Some(colors.selection),
                Highlight::Hovered => Some(colors.hover),
                Highlight::None => None,
            };
            if let Some(fill) = fill {
                painter.rect_filled(rect, 0.0, fill);
            }

            let view = row.view();
            let metrics = view.metrics();
            painter.text(
                rect.left_center() + vec2(metrics.padding, 0.0),
                Align2::LEFT_CENTER,
                view.text(),
                FontId::monospace(metrics.text_size),
                colors.text,
            );
        }

        for divider in list.dividers() {
            painter.rect_filled(divider.rect().translate(origin), 0.0, colors.separator);
        }

        if now_hovered != hovered {
            interactions.push(ListInteraction::HoverChanged(now_hovered));
        }
    });

    if state.list.host_mut().take_repaint_request() {
        ui.ctx().request_repaint();
    }
    interactions
}
