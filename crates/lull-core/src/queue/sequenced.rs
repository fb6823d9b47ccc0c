// ── Composite ordering key ──
//
// `(value, sequence)` ordered by value first, then by insertion sequence,
// so equal values leave the queue in the order they arrived.

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A queued value tagged with its insertion sequence number.
#[derive(Debug, Clone)]
pub struct Sequenced<T> {
    value: T,
    sequence: u64,
}

impl<T> Sequenced<T> {
    pub(crate) fn new(value: T, sequence: u64) -> Self {
        Self { value, sequence }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Ord> Ord for Sequenced<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl<T: Ord> PartialOrd for Sequenced<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> PartialEq for Sequenced<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Sequenced<T> {}

/// Sorted storage plus the sequence counter that feeds it.
///
/// Both live behind the same guard so a sequence number is drawn and
/// inserted in one step.
#[derive(Debug)]
pub struct Entries<T> {
    set: BTreeSet<Sequenced<T>>,
    last_sequence: u64,
}

impl<T: Ord> Entries<T> {
    pub(crate) fn new() -> Self {
        Self {
            set: BTreeSet::new(),
            last_sequence: 0,
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.last_sequence += 1;
        self.set.insert(Sequenced::new(value, self.last_sequence));
    }

    /// Take the head only if `accept` says so. `accept` sees the head and
    /// nothing else.
    pub(crate) fn pop_first_if(&mut self, accept: impl FnOnce(&T) -> bool) -> Option<T> {
        let take = self.set.first().is_some_and(|head| accept(head.value()));
        if take {
            self.set.pop_first().map(Sequenced::into_value)
        } else {
            None
        }
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.set.first().map(Sequenced::value)
    }

    pub(crate) fn len(&self) -> usize {
        self.set.len()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.set.iter().map(Sequenced::value)
    }
}
