//! Text-backed data source.
//!
//! Presents the lines of a text buffer as list rows. The buffer sits behind a
//! mutex so another thread can replace the text through a [`TextHandle`] while
//! the UI thread reads rows during a refresh. Each access holds the guard only
//! for its own read or read-modify section.

use crate::theme::Theme;
use crate::traits::{DataSource, RowIndex, VisualElement};
use egui::{vec2, Vec2};
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Character shown for every source character in concealed mode.
pub const DEFAULT_PASSWORD_CHAR: char = '•';

/// Text content plus the byte range of every line.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    rows: Vec<Range<usize>>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let mut buffer = Self {
            text: text.into(),
            rows: Vec::new(),
        };
        buffer.update_row_bounds();
        buffer
    }

    /// Replaces the text and recomputes line bounds.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.update_row_bounds();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines (an empty buffer has none).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the text of line `index`.
    pub fn row(&self, index: RowIndex) -> Option<&str> {
        self.rows.get(index).map(|range| &self.text[range.clone()])
    }

    fn update_row_bounds(&mut self) {
        self.rows.clear();
        if self.text.is_empty() {
            return;
        }
        let mut start = 0;
        for (pos, _) in self.text.match_indices('\n') {
            self.rows.push(start..pos);
            start = pos + 1;
        }
        self.rows.push(start..self.text.len());
    }
}

fn lock(buffer: &Mutex<TextBuffer>) -> MutexGuard<'_, TextBuffer> {
    buffer.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        log::warn!("text buffer lock was poisoned, continuing with last written state");
        poisoned.into_inner()
    })
}

/// Cloneable, thread-safe handle used to update the text from elsewhere.
#[derive(Debug, Clone)]
pub struct TextHandle {
    buffer: Arc<Mutex<TextBuffer>>,
}

impl TextHandle {
    /// Replaces the whole text. The list picks it up on its next refresh.
    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.buffer).set_text(text);
    }

    /// Appends a line at the end of the text.
    pub fn push_line(&self, line: &str) {
        let mut buffer = lock(&self.buffer);
        let mut text = std::mem::take(&mut buffer.text);
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
        buffer.set_text(text);
    }

    /// Returns a copy of the current text.
    pub fn text(&self) -> String {
        lock(&self.buffer).text().to_string()
    }
}

/// Font-derived sizes used to compute a text row's natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub padding: f32,
    pub text_size: f32,
    /// Advance of one monospace glyph
    pub char_width: f32,
    pub line_height: f32,
}

impl RowMetrics {
    pub fn from_theme(theme: &Theme) -> Self {
        let text_size = theme.metrics.text_size;
        Self {
            padding: theme.metrics.padding,
            text_size,
            char_width: (text_size * 0.6).ceil(),
            line_height: (text_size * 1.4).ceil(),
        }
    }
}

/// Row view displaying one line of text.
#[derive(Debug, Clone)]
pub struct TextRowView {
    text: String,
    metrics: RowMetrics,
    size: Vec2,
    min_size: Vec2,
}

impl TextRowView {
    /// Placeholder content of a freshly built view (and of the template used for measuring).
    pub const PLACEHOLDER: &'static str = "Place Holder";

    pub fn new(metrics: RowMetrics) -> Self {
        let mut view = Self {
            text: Self::PLACEHOLDER.to_string(),
            metrics,
            size: Vec2::ZERO,
            min_size: Vec2::ZERO,
        };
        view.refresh();
        view
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metrics(&self) -> RowMetrics {
        self.metrics
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    fn set_content(&mut self, text: String, metrics: RowMetrics) {
        self.text = text;
        self.metrics = metrics;
        self.refresh();
    }
}

impl VisualElement for TextRowView {
    fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn min_size(&self) -> Vec2 {
        self.min_size
    }

    fn refresh(&mut self) {
        let m = self.metrics;
        let chars = self.text.chars().count() as f32;
        self.min_size = vec2(chars * m.char_width + m.padding * 3.0, m.line_height);
    }
}

/// Data source exposing each line of a shared text buffer as a row.
#[derive(Debug)]
pub struct TextSource {
    buffer: Arc<Mutex<TextBuffer>>,
    metrics: RowMetrics,
    concealed: bool,
    password_char: char,
}

impl TextSource {
    pub fn new(text: impl Into<String>, theme: &Theme) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(TextBuffer::new(text))),
            metrics: RowMetrics::from_theme(theme),
            concealed: false,
            password_char: DEFAULT_PASSWORD_CHAR,
        }
    }

    /// Returns a handle that can update the text from any thread.
    pub fn handle(&self) -> TextHandle {
        TextHandle {
            buffer: Arc::clone(&self.buffer),
        }
    }

    /// Shows every row as password characters.
    pub fn set_concealed(&mut self, concealed: bool) {
        self.concealed = concealed;
    }

    pub fn concealed(&self) -> bool {
        self.concealed
    }

    pub fn set_password_char(&mut self, password_char: char) {
        self.password_char = password_char;
    }

    pub fn metrics(&self) -> RowMetrics {
        self.metrics
    }

    /// Returns the displayed text of row `index` (concealed if requested).
    pub fn row_text(&self, index: RowIndex) -> Option<String> {
        let buffer = lock(&self.buffer);
        let row = buffer.row(index)?;
        Some(if self.concealed {
            std::iter::repeat(self.password_char)
                .take(row.chars().count())
                .collect()
        } else {
            row.to_string()
        })
    }
}

impl DataSource for TextSource {
    type View = TextRowView;

    fn length(&self) -> usize {
        lock(&self.buffer).rows()
    }

    fn create_view(&self) -> TextRowView {
        TextRowView::new(self.metrics)
    }

    fn bind_row(&self, index: RowIndex, view: &mut TextRowView) {
        // A row removed concurrently binds as empty until the next refresh.
        let text = self.row_text(index).unwrap_or_default();
        view.set_content(text, self.metrics);
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.metrics = RowMetrics::from_theme(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeManager;
    use std::thread;

    fn theme() -> Theme {
        ThemeManager::new().current_theme().clone()
    }

    #[test]
    fn test_row_bounds() {
        let buffer = TextBuffer::new("alpha\nbeta\n\ngamma");
        assert_eq!(buffer.rows(), 4);
        assert_eq!(buffer.row(0), Some("alpha"));
        assert_eq!(buffer.row(2), Some(""));
        assert_eq!(buffer.row(3), Some("gamma"));
        assert_eq!(buffer.row(4), None);
    }

    #[test]
    fn test_trailing_newline_adds_empty_row() {
        assert_eq!(TextBuffer::new("a\n").rows(), 2);
        assert_eq!(TextBuffer::new("").rows(), 0);
    }

    #[test]
    fn test_bind_row_and_conceal() {
        let mut source = TextSource::new("secret\nxy", &theme());
        let mut view = source.create_view();
        assert_eq!(view.text(), TextRowView::PLACEHOLDER);

        source.bind_row(1, &mut view);
        assert_eq!(view.text(), "xy");

        source.set_concealed(true);
        source.set_password_char('*');
        source.bind_row(0, &mut view);
        assert_eq!(view.text(), "******");
    }

    #[test]
    fn test_min_size_follows_text_and_metrics() {
        let source = TextSource::new("abc", &theme());
        let m = source.metrics();
        let mut view = source.create_view();
        source.bind_row(0, &mut view);
        assert_eq!(view.min_size(), vec2(3.0 * m.char_width + 3.0 * m.padding, m.line_height));
    }

    #[test]
    fn test_theme_changes_metrics() {
        let manager = ThemeManager::new();
        let mut source = TextSource::new("abc", manager.current_theme());
        let before = source.create_view().min_size().y;
        if let Some(dracula) = manager.get_theme("Dracula") {
            source.apply_theme(dracula);
        }
        let after = source.create_view().min_size().y;
        assert!(after > before);
    }

    #[test]
    fn test_handle_updates_from_another_thread() {
        let source = TextSource::new("one", &theme());
        let handle = source.handle();
        let worker = thread::spawn(move || {
            handle.set_text("one\ntwo\nthree");
            handle.push_line("four");
        });
        worker.join().expect("writer thread panicked");
        assert_eq!(source.length(), 4);
        assert_eq!(source.row_text(3).as_deref(), Some("four"));
        assert_eq!(source.handle().text(), "one\ntwo\nthree\nfour");
    }
}
