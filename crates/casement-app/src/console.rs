//! Console chrome: widget implementations that log instead of drawing.

use std::cell::RefCell;
use std::rc::Rc;

use casement_core::{AddressBar, NavigationChrome, WindowHost};

/// What the chrome currently shows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChromeView {
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub stop_shown: bool,
    pub url: String,
    pub title: String,
    pub input_focused: bool,
    pub window_closed: bool,
}

/// Navigation buttons, address bar and window host in one.
///
/// Clones share the same [`ChromeView`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleChrome {
    view: Rc<RefCell<ChromeView>>,
}

impl ConsoleChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChromeView {
        self.view.borrow().clone()
    }

    /// One-line summary: `[<] [>] [x] url | title`.
    pub fn status_line(&self) -> String {
        let v = self.view.borrow();
        format!(
            "[{}] [{}] [{}] {} | {}",
            if v.back_enabled { "<" } else { " " },
            if v.forward_enabled { ">" } else { " " },
            if v.stop_shown { "x" } else { "r" },
            if v.url.is_empty() { "-" } else { v.url.as_str() },
            v.title
        )
    }
}

impl NavigationChrome for ConsoleChrome {
    fn set_back_enabled(&mut self, enabled: bool) {
        self.view.borrow_mut().back_enabled = enabled;
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        self.view.borrow_mut().forward_enabled = enabled;
    }

    fn show_stop_control(&mut self) {
        self.view.borrow_mut().stop_shown = true;
    }

    fn show_reload_control(&mut self) {
        self.view.borrow_mut().stop_shown = false;
    }
}

impl AddressBar for ConsoleChrome {
    fn set_url(&mut self, url: &str) {
        log::debug!("Address bar: {url}");
        self.view.borrow_mut().url = url.to_string();
    }

    fn set_window_title(&mut self, title: &str) {
        log::info!("Window title: {title}");
        self.view.borrow_mut().title = title.to_string();
    }

    fn focus_input(&mut self) {
        self.view.borrow_mut().input_focused = true;
    }

    fn is_input_focused(&self) -> bool {
        self.view.borrow().input_focused
    }
}

impl WindowHost for ConsoleChrome {
    fn close_window(&mut self) {
        log::info!("Host window closed");
        self.view.borrow_mut().window_closed = true;
    }
}
