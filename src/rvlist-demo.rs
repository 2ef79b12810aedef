//! Recycling list demo
//!
//! Shows a text file (or generated rows) in a virtualized list. Only the rows
//! inside the viewport are materialized; scrolling recycles their views.
//!
//! - `app/` - Demo state, egui scroll host and coordinators
//! - `ui/` - Header, list panel and status bar rendering
//!
//! Keys: Up/Down move the selection, Escape clears it.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use rvlist::{ListConfig, ThemeManager};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

mod app;
mod ui;

use app::{ApplicationCoordinator, DemoState, SettingsCoordinator, ThemeCoordinator};
use ui::header::HeaderInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

const SEPARATORS_KEY: &str = "separators";
const CONCEALED_KEY: &str = "concealed";

fn main() -> eframe::Result {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    // Optional text file whose lines become the rows
    let text_file = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("Recycling List Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "rvlist demo",
        options,
        Box::new(move |cc| Ok(Box::new(DemoApp::new(cc, text_file)))),
    )
}

fn load_config() -> ListConfig {
    let Some(path) = ListConfig::default_path() else {
        return ListConfig::default();
    };
    match ListConfig::load_or_create(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{:#}, using defaults", err);
            ListConfig::default()
        }
    }
}

struct DemoApp {
    state: DemoState,
}

impl DemoApp {
    /// Creates the demo with config defaults overridden by stored preferences.
    fn new(cc: &eframe::CreationContext, text_file: Option<PathBuf>) -> Self {
        let mut config = load_config();
        config.separators =
            SettingsCoordinator::load_setting_or(cc.storage, SEPARATORS_KEY, config.separators);
        config.concealed =
            SettingsCoordinator::load_setting_or(cc.storage, CONCEALED_KEY, config.concealed);

        let mut themes = ThemeManager::new();
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage, &config.theme);
        if let Err(err) = themes.set_current_theme(&theme_name) {
            log::warn!("{}", err);
        }

        let mut error_message = None;
        let text = match text_file {
            Some(path) => match ApplicationCoordinator::load_text(&path) {
                Ok(text) => text,
                Err(err) => {
                    log::error!("{:#}", err);
                    error_message = Some(format!("{:#}", err));
                    ApplicationCoordinator::generated_rows(config.rows)
                }
            },
            None => ApplicationCoordinator::generated_rows(config.rows),
        };

        let mut state = DemoState::new(text, themes, config);
        state.error_message = error_message;
        Self { state }
    }

    fn handle_header(&mut self, interaction: HeaderInteraction, ctx: &egui::Context) {
        let state = &mut self.state;
        match interaction {
            HeaderInteraction::ThemeSelected(name) => ThemeCoordinator::switch_theme(state, &name),
            HeaderInteraction::SeparatorsToggled(enabled) => state.list.set_separators(enabled),
            HeaderInteraction::ConcealedToggled(concealed) => {
                state.list.source_mut().set_concealed(concealed);
                state.list.refresh();
            }
            HeaderInteraction::JumpRequested => ApplicationCoordinator::jump_to_random(state),
            HeaderInteraction::TailToggled => ApplicationCoordinator::toggle_tail(state, ctx),
        }
    }
}

impl eframe::App for DemoApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let list = &self.state.list;
        let separators = list.layout().separators_enabled();
        SettingsCoordinator::save_setting(storage, SEPARATORS_KEY, &separators);
        SettingsCoordinator::save_setting(storage, CONCEALED_KEY, &list.source().concealed());
        ThemeCoordinator::save_theme_to_storage(storage, self.state.themes.current_theme_name());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ThemeCoordinator::apply_current_theme(ctx, &self.state.themes);

        // Pick up rows appended by the tail thread
        ApplicationCoordinator::sync_data(&mut self.state);
        ApplicationCoordinator::handle_keys(ctx, &mut self.state);

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state) {
            match interaction {
                PanelInteraction::Header(header) => self.handle_header(header, ctx),
                PanelInteraction::List(list) => {
                    ApplicationCoordinator::handle_interaction(&mut self.state, list)
                }
            }
        }
    }
}
