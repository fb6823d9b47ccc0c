//! In-process ordering and change-notification primitives.
//!
//! The two concurrency-bearing pieces of this crate:
//!
//! - **[`OrderedQueue`]**: a sorted queue keyed by `(value, insertion
//!   sequence)`. Equal values leave in insertion order. The access strategy
//!   is chosen in the type: [`Shared`] serializes every operation through a
//!   mutex and is `Sync`; [`Local`] skips the lock and stays on one thread.
//!
//! - **[`DebounceChangeNotifier`]**: coalesces bursts of per-key updates
//!   into one batch per interval and fans each batch out to a dynamic set of
//!   [`ChangeObserver`]s. A single background task drains the pending
//!   [`ChangeSet`]; it starts when the first observer registers and stops on
//!   its own once the last one leaves.
//!
//! Smaller helpers ride along: [`DictionaryView`] (read-only view over an
//! optional map), [`PropertyBag`] (dictionary-backed dynamic properties) and
//! [`calendar::find_date`] (day-of-month / weekday navigation).

pub mod calendar;
pub mod collections;
pub mod config;
pub mod error;
pub mod notify;
pub mod queue;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collections::{DictionaryView, PropertyBag};
pub use config::NotifierConfig;
pub use error::CoreError;
pub use notify::{
    CallbackObserver, ChangeBatch, ChangeObserver, ChangeSet, ChangeSubscription,
    DebounceChangeNotifier, DeliveryReport, ObserverError, ObserverRegistry, ObserverResult,
};
pub use queue::{Local, OrderedQueue, QueueAccess, Shared};
