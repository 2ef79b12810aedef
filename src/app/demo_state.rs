//! Centralized state for the list demo.

use crate::app::EguiScrollHost;
use rvlist::{ListConfig, ListController, RowIndex, TextHandle, TextSource, ThemeManager};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type DemoList = ListController<TextSource, EguiScrollHost>;

/// Everything the demo window needs between frames.
pub struct DemoState {
    pub themes: ThemeManager,
    pub list: DemoList,
    /// Writer side of the list's text, shared with the tail thread
    pub handle: TextHandle,

    // ===== Interaction =====
    /// Row currently under the pointer
    pub hovered: Option<RowIndex>,
    /// Last selection notification, shown in the status bar
    pub last_event: Rc<RefCell<String>>,
    /// Row count the list was last refreshed with
    pub known_length: usize,
    /// Stop flag of the running tail thread
    pub tail: Option<Arc<AtomicBool>>,

    pub error_message: Option<String>,
}

impl DemoState {
    /// Builds the list over `text` using the theme and toggles already resolved.
    pub fn new(text: String, themes: ThemeManager, config: ListConfig) -> Self {
        let theme = themes.current_theme().clone();
        let mut source = TextSource::new(text, &theme);
        source.set_concealed(config.concealed);
        source.set_password_char(config.password_char);
        let handle = source.handle();

        let mut list = ListController::new(source, EguiScrollHost::new(), theme)
            .with_separators(config.separators);

        let last_event = Rc::new(RefCell::new(String::new()));
        let events = Rc::clone(&last_event);
        list.set_on_selected(move |index| {
            log::info!("row {} selected", index);
            *events.borrow_mut() = format!("selected row {}", index);
        });
        let events = Rc::clone(&last_event);
        list.set_on_unselected(move |index| {
            log::info!("row {} unselected", index);
            *events.borrow_mut() = format!("unselected row {}", index);
        });

        Self {
            themes,
            list,
            handle,
            hovered: None,
            last_event,
            known_length: 0,
            tail: None,
            error_message: None,
        }
    }

    pub fn is_tailing(&self) -> bool {
        self.tail.is_some()
    }
}

impl Drop for DemoState {
    fn drop(&mut self) {
        // Let the tail thread finish on its next tick.
        if let Some(stop) = self.tail.take() {
            stop.store(true, Ordering::Relaxed);
        }
    }
}
