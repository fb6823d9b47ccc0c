use std::collections::HashMap;
use std::collections::hash_map::{self, RandomState};
use std::hash::{BuildHasher, Hash};

/// Read-only view over a map that may not exist yet.
///
/// Lookups on a missing map behave like lookups on an empty one.
#[derive(Debug)]
pub struct DictionaryView<'a, K, V, S = RandomState> {
    source: Option<&'a HashMap<K, V, S>>,
}

impl<'a, K, V, S> DictionaryView<'a, K, V, S> {
    pub fn new(source: Option<&'a HashMap<K, V, S>>) -> Self {
        Self { source }
    }

    pub fn empty() -> Self {
        Self { source: None }
    }

    pub fn len(&self) -> usize {
        self.source.map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter {
            inner: self.source.map(HashMap::iter),
        }
    }
}

impl<'a, K: Eq + Hash, V, S: BuildHasher> DictionaryView<'a, K, V, S> {
    pub fn get(&self, key: &K) -> Option<&'a V> {
        self.source.and_then(|map| map.get(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.source.is_some_and(|map| map.contains_key(key))
    }
}

impl<'a, K, V, S> From<&'a HashMap<K, V, S>> for DictionaryView<'a, K, V, S> {
    fn from(source: &'a HashMap<K, V, S>) -> Self {
        Self::new(Some(source))
    }
}

impl<K, V, S> Clone for DictionaryView<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for DictionaryView<'_, K, V, S> {}

/// Iterator over a [`DictionaryView`]'s pairs, in map order.
pub struct Iter<'a, K, V> {
    inner: Option<hash_map::Iter<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<'a, K, V, S> IntoIterator for &DictionaryView<'a, K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
