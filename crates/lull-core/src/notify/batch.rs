use chrono::{DateTime, Utc};

/// One drained set of changes: the latest value per key at drain time.
///
/// Immutable once built. The monitor wraps each batch in a single `Arc`
/// and hands the same snapshot to every observer. Pair order is
/// unspecified.
#[derive(Debug, Clone)]
pub struct ChangeBatch<K, V> {
    changes: Vec<(K, V)>,
    changed_at: DateTime<Utc>,
}

impl<K, V> ChangeBatch<K, V> {
    pub(crate) fn new(changes: Vec<(K, V)>, changed_at: DateTime<Utc>) -> Self {
        Self {
            changes,
            changed_at,
        }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// When the most recent change folded into this batch was recorded.
    pub fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.changes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.changes.iter().map(|(key, _)| key)
    }

    /// Latest value recorded for `key`, if it is part of this batch.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: PartialEq,
    {
        self.changes
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

impl<K: Clone, V: Clone> ChangeBatch<K, V> {
    /// Copy the pairs out, e.g. to keep them past the observer call.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.changes.clone()
    }
}

impl<'a, K, V> IntoIterator for &'a ChangeBatch<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
