//! Back/forward navigation of a web browser, simulated with two stacks.

use crate::{error::CollectionError, linked_list::SinglyLinkedList, stack::LinkedListStack};

#[derive(Debug, Default)]
pub struct WebBrowser {
    current: Option<String>,
    back: LinkedListStack<String>,
    forward: LinkedListStack<String>,
}

impl WebBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a browser from a history list ordered from the most recently
    /// visited page to the oldest one. The first page becomes the current page.
    pub fn with_history(history: &SinglyLinkedList<String>) -> Self {
        let mut browser = Self::new();
        let pages: Vec<_> = history.iter().collect();
        for page in pages.into_iter().rev() {
            browser.visit(page.clone());
        }
        browser
    }

    /// Opens `page`. Any pages that could be reached with `forward` are dropped.
    pub fn visit(&mut self, page: impl Into<String>) {
        if let Some(current) = self.current.replace(page.into()) {
            self.back.push(current);
        }
        self.forward.clear();
    }

    pub fn back(&mut self) -> Result<&str, CollectionError> {
        let previous = self
            .back
            .pop()
            .map_err(|_| CollectionError::empty("back history"))?;
        if let Some(current) = self.current.replace(previous) {
            self.forward.push(current);
        }
        Ok(self.current())
    }

    pub fn forward(&mut self) -> Result<&str, CollectionError> {
        let next = self
            .forward
            .pop()
            .map_err(|_| CollectionError::empty("forward history"))?;
        if let Some(current) = self.current.replace(next) {
            self.back.push(current);
        }
        Ok(self.current())
    }

    /// The page being shown, or an empty string before the first visit.
    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or_default()
    }

    /// The current page followed by the pages reachable with `back`,
    /// most recent first.
    pub fn history(&self) -> SinglyLinkedList<String> {
        self.current
            .iter()
            .chain(self.back.iter())
            .cloned()
            .collect()
    }
}
