//! Client-side navigation. [`Navigator`] is the narrow interface the auth layer
//! uses to move the user; [`MemoryHistory`] implements it with browser history
//! semantics so redirects behave the same in a CLI or a test as in a tab.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Navigation collaborator.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    /// Adds a new history entry.
    fn push(&self, path: &str);

    /// Replaces the current history entry, so back-navigation skips it.
    fn replace(&self, path: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum NavigationEvent {
    Push(String),
    Replace(String),
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
    events: Vec<NavigationEvent>,
}

/// In-memory browser history.
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    inner: Arc<Mutex<History>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(History {
                entries: vec![initial.to_string()],
                index: 0,
                events: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves one entry back. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let mut history = self.lock();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    /// Moves one entry forward. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    /// Entries reachable with back/forward, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    /// Every push and replace performed, in order.
    #[must_use]
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.lock().events.clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryHistory {
    fn current_path(&self) -> String {
        let history = self.lock();
        history.entries[history.index].clone()
    }

    fn push(&self, path: &str) {
        let mut history = self.lock();
        let next = history.index + 1;
        // pushing drops any forward entries, like a browser
        history.entries.truncate(next);
        history.entries.push(path.to_string());
        history.index = next;
        history.events.push(NavigationEvent::Push(path.to_string()));
        debug!(path, "history push");
    }

    fn replace(&self, path: &str) {
        let mut history = self.lock();
        let index = history.index;
        history.entries[index] = path.to_string();
        history.events.push(NavigationEvent::Replace(path.to_string()));
        debug!(path, "history replace");
    }
}
