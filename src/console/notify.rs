use std::sync::{Mutex, PoisonError};

/// Where the console sends the text it would show in a blocking alert.
pub trait Notifier: Send + Sync {
    fn alert(&self, text: &str);
}

/// Holds alerts until the next page render picks them up.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: Mutex<Vec<String>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }
}

impl Notifier for NoticeBoard {
    fn alert(&self, text: &str) {
        tracing::debug!(notice = text, "notice posted");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
