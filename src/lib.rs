pub mod traits;
pub mod pool;
pub mod state;
pub mod layout;
pub mod reconciler;
pub mod controller;
pub mod theme;
pub mod text_source;
pub mod config;

// Export traits
pub use traits::{DataSource, RowIndex, ScrollHost, VisualElement};

// Export engine pieces
pub use pool::RowViewPool;
pub use state::{Highlight, MaterializedRow, RowFlags, SelectionState, WindowState};
pub use layout::{Divider, LayoutEngine};
pub use reconciler::{ScrollDirection, ScrollOutcome, ScrollReconciler};
pub use controller::{ListController, RowCallback};

// Export text-backed rows
pub use text_source::{RowMetrics, TextBuffer, TextHandle, TextRowView, TextSource};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, ThemeMetrics, hex_to_color32};

// Export configuration
pub use config::ListConfig;
