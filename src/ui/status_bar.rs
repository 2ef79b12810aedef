//! Status bar UI rendering
//!
//! Shows the row count, the materialized window, pool usage and the last
//! selection notification.

use eframe::egui;
use egui::RichText;
use crate::app::DemoState;

pub fn render_status_bar(ui: &mut egui::Ui, state: &DemoState) {
    let list = &state.list;
    let window = list.window();

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("Rows: {}", list.length())).strong());
        ui.label(RichText::new("|").strong());

        if window.is_empty() {
            ui.label(RichText::new("Window: empty").strong());
        } else {
            let text = format!(
                "Window: {}..={} ({} visible)",
                window.first_index(),
                window.last_index(),
                window.visible_count()
            );
            ui.label(RichText::new(text).strong());
        }
        ui.label(RichText::new("|").strong());

        let views = format!(
            "Views: {} owned, {} pooled",
            list.constructed_views(),
            list.pool().len()
        );
        ui.label(RichText::new(views).strong());

        let selected = match list.selected() {
            Some(index) => list.source().row_text(index).unwrap_or_default(),
            None => "-".to_string(),
        };
        ui.label(RichText::new("|").strong());
        ui.label(RichText::new(format!("Selected: {}", selected)).strong());

        let last_event = state.last_event.borrow();
        if !last_event.is_empty() {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(last_event.as_str()).weak());
        }
    });
}
