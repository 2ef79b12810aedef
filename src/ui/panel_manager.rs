//! Panel orchestration and layout management.
//!
//! Lays out the header, status bar and list panel, and gathers their
//! interactions for the application coordinator.

use crate::app::DemoState;
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::{list_panel, status_bar, ListInteraction};

/// Interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    Header(HeaderInteraction),
    List(ListInteraction),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels, called from `eframe::App::update()`.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut DemoState) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(interaction) = header::render_header(ui, state) {
                interactions.push(PanelInteraction::Header(interaction));
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let list = list_panel::render_list_panel(ui, state);
            interactions.extend(list.into_iter().map(PanelInteraction::List));
        });

        interactions
    }
}
