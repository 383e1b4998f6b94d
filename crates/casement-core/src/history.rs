//! Session history: the back/forward stacks of one content surface.

/// A single entry in a tab's session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
}

/// Back/forward stacks around the current entry.
#[derive(Debug, Default)]
pub struct SessionHistory {
    back_stack: Vec<HistoryEntry>,
    forward_stack: Vec<HistoryEntry>,
    current: Option<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry. The current entry moves to the back stack and the
    /// forward stack is cleared.
    pub fn push(&mut self, url: &str) {
        if let Some(entry) = self.current.take() {
            self.back_stack.push(entry);
        }
        self.forward_stack.clear();
        self.current = Some(HistoryEntry {
            url: url.to_string(),
            title: String::new(),
        });
    }

    /// Step back. Returns the entry to load, or None.
    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        let prev = self.back_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.forward_stack.push(current);
        }
        self.current = Some(prev);
        self.current.as_ref()
    }

    /// Step forward. Returns the entry to load, or None.
    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        let next = self.forward_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.back_stack.push(current);
        }
        self.current = Some(next);
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.current.as_ref()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.url.as_str())
    }

    /// Update the current entry's title (after its load completes).
    pub fn update_title(&mut self, title: &str) {
        if let Some(entry) = self.current.as_mut() {
            entry.title = title.to_string();
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}
