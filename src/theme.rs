//! Theme support for the list engine
//!
//! A theme carries the row colors plus the sizing values that shape the layout:
//! text size and padding decide the natural row size, separator thickness
//! decides the row extent. Switching themes therefore invalidates the cached
//! row height.
//!
//! # Examples
//!
//! ```
//! use rvlist::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let dracula = manager.get_theme("Dracula").unwrap();
//! assert!(dracula.metrics.text_size > 0.0);
//! ```

use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Colors used when painting rows and separators
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub background: Color32,
    pub text: Color32,
    pub text_dim: Color32,

    // Row indicator colors
    pub selection: Color32,
    pub hover: Color32,

    pub separator: Color32,
}

/// Sizing values that feed the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeMetrics {
    /// Inner padding; a text row reserves three of these horizontally
    pub padding: f32,
    /// Font size of row text
    pub text_size: f32,
    /// Height of the divider between rows
    pub separator_thickness: f32,
}

/// A complete theme definition with metadata, colors and metrics
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
    pub metrics: ThemeMetrics,
}

static BUILTIN_THEMES: Lazy<Vec<Theme>> =
    Lazy::new(|| vec![light_theme(), dark_theme(), dracula_theme()]);

/// Name of the theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "Dark";

/// Centralized theme manager providing access to all available themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme_name: String,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with all built-in themes
    pub fn new() -> Self {
        let themes = BUILTIN_THEMES
            .iter()
            .map(|theme| (theme.name.clone(), theme.clone()))
            .collect();

        Self {
            themes,
            current_theme_name: DEFAULT_THEME.to_string(),
        }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Returns a list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Gets the currently selected theme
    pub fn current_theme(&self) -> &Theme {
        self.themes
            .get(&self.current_theme_name)
            .unwrap_or(&BUILTIN_THEMES[1])
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Sets the current theme by name
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), String> {
        if self.themes.contains_key(name) {
            self.current_theme_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Theme '{}' not found", name))
        }
    }

    /// Applies a theme's colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.background;
        visuals.extreme_bg_color = colors.background;
        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;
        visuals.widgets.noninteractive.bg_stroke.color = colors.separator;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the Light theme
fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light theme with egui default colors".to_string(),
        colors: ThemeColors {
            background: Color32::from_rgb(248, 248, 248),
            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),
            selection: Color32::from_rgb(40, 100, 200),
            hover: Color32::from_rgb(200, 200, 200),
            separator: Color32::from_rgb(220, 220, 220),
        },
        metrics: ThemeMetrics {
            padding: 4.0,
            text_size: 14.0,
            separator_thickness: 1.0,
        },
    }
}

/// Creates the Dark theme
fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark theme with egui default colors".to_string(),
        colors: ThemeColors {
            background: Color32::from_rgb(39, 39, 39),
            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),
            selection: Color32::from_rgb(52, 152, 219),
            hover: Color32::from_rgb(70, 70, 70),
            separator: Color32::from_rgb(60, 60, 60),
        },
        metrics: ThemeMetrics {
            padding: 4.0,
            text_size: 14.0,
            separator_thickness: 1.0,
        },
    }
}

/// Creates the Dracula theme
///
/// Official colors from: https://draculatheme.com/spec
fn dracula_theme() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        description: "Official Dracula theme color palette".to_string(),
        colors: ThemeColors {
            // Background: #282a36
            background: hex_to_color32("#282a36"),
            // Foreground: #f8f8f2
            text: hex_to_color32("#f8f8f2"),
            // Comment: #6272a4
            text_dim: hex_to_color32("#6272a4"),
            // Purple: #bd93f9
            selection: hex_to_color32("#bd93f9"),
            // Current Line: #44475a
            hover: hex_to_color32("#44475a"),
            separator: hex_to_color32("#44475a"),
        },
        metrics: ThemeMetrics {
            padding: 6.0,
            text_size: 16.0,
            separator_thickness: 2.0,
        },
    }
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}
