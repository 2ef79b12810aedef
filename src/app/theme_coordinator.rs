//! Theme selection and persistence for the demo.
//!
//! Keeps the egui visuals, the stored preference and the list's own theme in step.

use crate::app::DemoState;
use rvlist::ThemeManager;

const THEME_KEY: &str = "theme_preference";

/// Coordinates theme management and persistence.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Loads the stored theme preference, falling back to `default`.
    pub fn load_theme_from_storage(storage: Option<&dyn eframe::Storage>, default: &str) -> String {
        storage
            .and_then(|storage| storage.get_string(THEME_KEY))
            .unwrap_or_else(|| default.to_string())
    }

    pub fn save_theme_to_storage(storage: &mut dyn eframe::Storage, theme_name: &str) {
        storage.set_string(THEME_KEY, theme_name.to_string());
        storage.flush();
    }

    /// Applies the current theme to the egui context.
    pub fn apply_current_theme(ctx: &egui::Context, themes: &ThemeManager) {
        let theme = themes.current_theme();
        let mut visuals = if theme.name == "Light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        themes.apply_theme(theme, &mut visuals);
        ctx.set_visuals(visuals);
    }

    /// Switches to `name` and hands the new theme to the list.
    ///
    /// Unknown names are logged and ignored.
    pub fn switch_theme(state: &mut DemoState, name: &str) {
        if state.themes.current_theme_name() == name {
            return;
        }
        if let Err(err) = state.themes.set_current_theme(name) {
            log::warn!("{}", err);
            return;
        }
        let theme = state.themes.current_theme().clone();
        log::info!("theme switched to {}", theme.name);
        state.list.set_theme(theme);
    }
}
