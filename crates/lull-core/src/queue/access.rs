// ── Access strategies ──
//
// The queue's guard is chosen in the type rather than by a runtime flag:
// `Shared` wraps the entries in a mutex and is `Sync`; `Local` wraps them
// in a `RefCell`, costs nothing to enter, and cannot cross threads.

use std::cell::RefCell;

use parking_lot::Mutex;

use super::sequenced::Entries;

mod sealed {
    pub trait Sealed {}
}

/// How an [`OrderedQueue`](super::OrderedQueue) guards its entries.
///
/// Implemented by [`Shared`] and [`Local`] only.
pub trait QueueAccess: sealed::Sealed {
    #[doc(hidden)]
    type Cell<T>;

    #[doc(hidden)]
    fn wrap<T>(entries: Entries<T>) -> Self::Cell<T>;

    /// Run `f` as one critical section over the entries.
    #[doc(hidden)]
    fn with<T, R>(cell: &Self::Cell<T>, f: impl FnOnce(&mut Entries<T>) -> R) -> R;
}

/// Mutex-guarded access. Every operation is a single critical section.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shared;

/// Unguarded single-threaded access.
#[derive(Debug, Clone, Copy, Default)]
pub struct Local;

impl sealed::Sealed for Shared {}
impl sealed::Sealed for Local {}

impl QueueAccess for Shared {
    type Cell<T> = Mutex<Entries<T>>;

    fn wrap<T>(entries: Entries<T>) -> Self::Cell<T> {
        Mutex::new(entries)
    }

    fn with<T, R>(cell: &Self::Cell<T>, f: impl FnOnce(&mut Entries<T>) -> R) -> R {
        f(&mut cell.lock())
    }
}

impl QueueAccess for Local {
    type Cell<T> = RefCell<Entries<T>>;

    fn wrap<T>(entries: Entries<T>) -> Self::Cell<T> {
        RefCell::new(entries)
    }

    fn with<T, R>(cell: &Self::Cell<T>, f: impl FnOnce(&mut Entries<T>) -> R) -> R {
        f(&mut cell.borrow_mut())
    }
}
