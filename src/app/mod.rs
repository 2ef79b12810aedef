//! Application-level modules for the list demo.
//!
//! This module contains the demo state, the egui scroll host and the coordinators.

mod demo_state;
mod scroll_host;
mod application_coordinator;
mod theme_coordinator;
mod settings_coordinator;

pub use demo_state::DemoState;
pub use scroll_host::EguiScrollHost;
pub use application_coordinator::ApplicationCoordinator;
pub use theme_coordinator::ThemeCoordinator;
pub use settings_coordinator::SettingsCoordinator;
