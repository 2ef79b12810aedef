//! Header panel UI rendering
//!
//! Handles the top bar with list toggles, the random jump button and the theme selector.

use eframe::egui;
use egui::Color32;
use crate::app::DemoState;

/// Result of user interaction with the header panel
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderInteraction {
    ThemeSelected(String),
    SeparatorsToggled(bool),
    ConcealedToggled(bool),
    /// User clicked "Random row"
    JumpRequested,
    /// User clicked "Tail" (start or stop)
    TailToggled,
}

/// Renders the application header
pub fn render_header(ui: &mut egui::Ui, state: &DemoState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        let mut separators = state.list.layout().separators_enabled();
        if ui.checkbox(&mut separators, "Separators").changed() {
            interaction = Some(HeaderInteraction::SeparatorsToggled(separators));
        }

        let mut concealed = state.list.source().concealed();
        if ui.checkbox(&mut concealed, "Conceal").changed() {
            interaction = Some(HeaderInteraction::ConcealedToggled(concealed));
        }

        ui.separator();

        if ui.button("🎲 Random row").clicked() {
            interaction = Some(HeaderInteraction::JumpRequested);
        }

        let tail_label = if state.is_tailing() { "⏹ Stop tail" } else { "▶ Tail" };
        if ui.button(tail_label).clicked() {
            interaction = Some(HeaderInteraction::TailToggled);
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.themes.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.themes.list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                interaction = Some(HeaderInteraction::ThemeSelected(current_theme));
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
