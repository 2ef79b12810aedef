//! Application-level coordination for the demo.
//!
//! Turns panel interactions and key presses into list operations, loads the
//! initial text and drives the background tail writer.

use crate::app::DemoState;
use crate::ui::ListInteraction;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TAIL_INTERVAL: Duration = Duration::from_millis(400);

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Reads the text file whose lines become the list rows.
    pub fn load_text(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))
    }

    /// Generates `count` numbered rows.
    pub fn generated_rows(count: usize) -> String {
        (0..count)
            .map(|i| format!("Row {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Refreshes the list when the text changed length behind its back.
    ///
    /// Called once per frame before rendering.
    pub fn sync_data(state: &mut DemoState) {
        let length = state.list.length();
        if length != state.known_length {
            log::debug!("text now has {} rows (was {})", length, state.known_length);
            state.known_length = length;
            state.list.refresh();
        }
    }

    pub fn handle_interaction(state: &mut DemoState, interaction: ListInteraction) {
        match interaction {
            ListInteraction::RowTapped(index) => state.list.row_tapped(index),
            ListInteraction::HoverChanged(hovered) => {
                if let Some(previous) = state.hovered {
                    state.list.pointer_exited(previous);
                }
                if let Some(index) = hovered {
                    state.list.pointer_entered(index);
                }
                state.hovered = hovered;
            }
        }
    }

    /// Arrow keys move the selection, Escape clears it.
    pub fn handle_keys(ctx: &egui::Context, state: &mut DemoState) {
        let (down, up, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::Escape),
            )
        });
        let selected = state.list.selected();
        if down {
            let next = selected.map_or(0, |index| index + 1);
            state.list.select(next);
        } else if up {
            if let Some(index) = selected {
                state.list.select(index.saturating_sub(1));
            }
        } else if escape {
            if let Some(index) = selected {
                state.list.unselect(index);
            }
        }
    }

    /// Selects a random row, scrolling it into view.
    pub fn jump_to_random(state: &mut DemoState) {
        let length = state.list.length();
        if length == 0 {
            return;
        }
        let target = rand::thread_rng().gen_range(0..length);
        state.list.select(target);
    }

    /// Starts or stops a thread that keeps appending lines to the text.
    pub fn toggle_tail(state: &mut DemoState, ctx: &egui::Context) {
        if let Some(stop) = state.tail.take() {
            stop.store(true, Ordering::Relaxed);
            log::info!("tail stopped");
            return;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let handle = state.handle.clone();
        let ctx = ctx.clone();
        let flag = Arc::clone(&stop);
        let spawned = thread::Builder::new()
            .name("rvlist-tail".to_string())
            .spawn(move || {
                let mut n = 0usize;
                while !flag.load(Ordering::Relaxed) {
                    handle.push_line(&format!("tail line {}", n));
                    n += 1;
                    ctx.request_repaint();
                    thread::sleep(TAIL_INTERVAL);
                }
            });
        match spawned {
            Ok(_) => {
                log::info!("tail started");
                state.tail = Some(stop);
            }
            Err(err) => {
                state.error_message = Some(format!("Could not start tail thread: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_rows() {
        assert_eq!(ApplicationCoordinator::generated_rows(3), "Row 0\nRow 1\nRow 2");
        assert_eq!(ApplicationCoordinator::generated_rows(0), "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ApplicationCoordinator::load_text(Path::new("/nonexistent/rvlist.txt"));
        assert!(err.is_err());
    }
}
