//! UI panel rendering subsystem
//!
//! - Header panel (toggles, random jump, tail, theme selector)
//! - List panel (the virtualized list inside a scroll area)
//! - Status bar (window and pool statistics)

pub mod header;
pub mod list_panel;
pub mod status_bar;
pub mod panel_manager;

pub use list_panel::ListInteraction;
