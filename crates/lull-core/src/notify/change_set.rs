// ── Pending change accumulator ──
//
// Latest value per key plus a "changed since last drain" timestamp.
// Producers only ever write here; the monitor is the only drainer.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::ChangeBatch;

/// Thread-safe map of pending changes with atomic extract-and-clear.
///
/// The timestamp answers "anything new since the last drain?" without
/// walking the map; it is `Some` only while the map is non-empty.
pub struct ChangeSet<K, V> {
    pending: Mutex<Pending<K, V>>,
}

struct Pending<K, V> {
    entries: HashMap<K, V>,
    last_changed: Option<DateTime<Utc>>,
}

impl<K: Eq + Hash, V> ChangeSet<K, V> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Pending {
                entries: HashMap::new(),
                last_changed: None,
            }),
        }
    }

    /// Overwrite the latest value for `key` and mark the set pending.
    pub fn record(&self, key: K, value: V) {
        let mut pending = self.pending.lock();
        pending.entries.insert(key, value);
        pending.last_changed = Some(Utc::now());
    }

    /// Take every pending change and clear the set in one step.
    ///
    /// Returns `None` when nothing was recorded since the previous
    /// extraction, so an unchanged set is never delivered twice.
    pub fn extract(&self) -> Option<ChangeBatch<K, V>> {
        let mut pending = self.pending.lock();
        let changed_at = pending.last_changed.take()?;
        let changes: Vec<(K, V)> = pending.entries.drain().collect();
        Some(ChangeBatch::new(changes, changed_at))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock().last_changed.is_some()
    }

    /// Number of distinct keys waiting for the next drain.
    pub fn len(&self) -> usize {
        self.pending.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V> Default for ChangeSet<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extract_without_changes_is_none() {
        let changes: ChangeSet<&str, i32> = ChangeSet::new();
        assert!(changes.extract().is_none());
        assert!(!changes.is_pending());
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let changes = ChangeSet::new();
        changes.record("a", 99);
        changes.record("a", 88);
        changes.record("a", 77);
        assert_eq!(changes.len(), 1);

        let batch = changes.extract().unwrap();
        assert_eq!(batch.to_vec(), vec![("a", 77)]);
    }

    #[test]
    fn extract_clears_pending_state() {
        let changes = ChangeSet::new();
        changes.record("a", 1);
        changes.record("b", 2);
        assert!(changes.is_pending());

        let batch = changes.extract().unwrap();
        assert_eq!(batch.len(), 2);
        assert!(!changes.is_pending());
        assert!(changes.is_empty());
        assert!(changes.extract().is_none(), "unchanged set must not drain twice");
    }

    #[test]
    fn new_change_after_extract_is_pending_again() {
        let changes = ChangeSet::new();
        changes.record("a", 1);
        let first = changes.extract().unwrap();

        changes.record("a", 2);
        let second = changes.extract().unwrap();
        assert_eq!(second.get(&"a"), Some(&2));
        assert!(second.changed_at() >= first.changed_at());
    }

    #[test]
    fn concurrent_producers_keep_each_keys_last_write() {
        let changes = ChangeSet::new();
        std::thread::scope(|scope| {
            for producer in 0..8u32 {
                let changes = &changes;
                scope.spawn(move || {
                    for step in 0..500u32 {
                        changes.record(producer, step);
                    }
                });
            }
        });

        let mut batch = changes.extract().unwrap().to_vec();
        batch.sort_unstable();
        let expected: Vec<(u32, u32)> = (0..8).map(|producer| (producer, 499)).collect();
        assert_eq!(batch, expected);
    }
}
