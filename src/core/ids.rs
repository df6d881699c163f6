use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source for repeatable sub-entries (education, experience, skills).
///
/// Clones share the same counter, so one generator handed to every step never
/// produces the same id twice within a session.
#[derive(Debug, Clone, Default)]
pub struct EntryIdGenerator {
    next: Arc<AtomicU64>,
}

impl EntryIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }

    /// Like [`next_id`](Self::next_id) but skips ids already present, e.g. ids
    /// that arrived with seeded data.
    pub fn next_unique(&self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.next_id(prefix);
            if !taken(&id) {
                return id;
            }
        }
    }
}
