// ── Ordered queue ──
//
// A priority queue with stable tie-breaking: values leave in ascending
// order, and equal values leave in the order they were added.

mod access;
mod sequenced;

use std::fmt;
use std::marker::PhantomData;

pub use access::{Local, QueueAccess, Shared};

use sequenced::Entries;

/// A sorted queue over `(value, insertion sequence)`.
///
/// `A` selects the guard: [`Shared`] (default) makes the queue `Sync` and
/// runs every operation as one critical section; [`Local`] drops the lock
/// for single-threaded use.
///
/// Reads (`len`, `peek`, `snapshot`, iteration) go through the same guard as
/// writes, so a reader never observes a half-applied mutation.
///
/// Predicates passed to [`try_dequeue_if`](Self::try_dequeue_if) run inside
/// the critical section and must not touch the same queue.
pub struct OrderedQueue<T, A: QueueAccess = Shared> {
    entries: A::Cell<T>,
    _access: PhantomData<A>,
}

impl<T: Ord> OrderedQueue<T, Shared> {
    /// Create an empty mutex-guarded queue.
    pub fn new() -> Self {
        Self::from_values(std::iter::empty())
    }
}

impl<T: Ord> OrderedQueue<T, Local> {
    /// Create an empty single-threaded queue.
    pub fn local() -> Self {
        Self::from_values(std::iter::empty())
    }
}

impl<T: Ord, A: QueueAccess> OrderedQueue<T, A> {
    /// Create a queue seeded with `values`, sequenced in iteration order.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut entries = Entries::new();
        for value in values {
            entries.push(value);
        }
        Self {
            entries: A::wrap(entries),
            _access: PhantomData,
        }
    }

    pub fn add(&self, value: T) {
        A::with(&self.entries, |entries| entries.push(value));
    }

    /// Add a batch of values in one critical section.
    pub fn add_range(&self, values: impl IntoIterator<Item = T>) {
        A::with(&self.entries, |entries| {
            for value in values {
                entries.push(value);
            }
        });
    }

    /// Remove and return the smallest value, if any.
    pub fn try_dequeue(&self) -> Option<T> {
        self.try_dequeue_if(|_| true)
    }

    /// Remove and return the smallest value only if `predicate` accepts it.
    ///
    /// Only the head is ever tested. When the queue is empty or the head is
    /// rejected, the queue is left untouched, even if a later value would
    /// have passed.
    pub fn try_dequeue_if(&self, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
        A::with(&self.entries, |entries| entries.pop_first_if(predicate))
    }

    pub fn len(&self) -> usize {
        A::with(&self.entries, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Ord + Clone, A: QueueAccess> OrderedQueue<T, A> {
    /// The smallest value without removing it.
    pub fn peek(&self) -> Option<T> {
        A::with(&self.entries, |entries| entries.first().cloned())
    }

    /// All values in dequeue order, copied out at call time.
    pub fn snapshot(&self) -> Vec<T> {
        A::with(&self.entries, |entries| entries.values().cloned().collect())
    }

    /// Iterate a fresh snapshot. Later mutations do not affect it.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.snapshot().into_iter()
    }
}

impl<T: Ord> Default for OrderedQueue<T, Shared> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Default for OrderedQueue<T, Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<T: Ord, A: QueueAccess> FromIterator<T> for OrderedQueue<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: Ord, A: QueueAccess> Extend<T> for OrderedQueue<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<'a, T: Ord + Clone, A: QueueAccess> IntoIterator for &'a OrderedQueue<T, A> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord + fmt::Debug, A: QueueAccess> fmt::Debug for OrderedQueue<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        A::with(&self.entries, |entries| f.debug_list().entries(entries.values()).finish())
    }
}
