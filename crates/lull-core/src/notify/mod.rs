//! Debounced change notification.
//!
//! [`ChangeSet`] accumulates the latest value per key, [`ObserverRegistry`]
//! tracks who is listening, and [`DebounceChangeNotifier`] owns the
//! background loop that drains one into the other on a fixed interval.

mod batch;
mod change_set;
mod monitor;
mod notifier;
mod observer;
mod registry;
mod subscription;

pub use batch::ChangeBatch;
pub use change_set::ChangeSet;
pub use notifier::DebounceChangeNotifier;
pub use observer::{CallbackObserver, ChangeObserver, ObserverError, ObserverResult};
pub use registry::{DeliveryReport, ObserverRegistry};
pub use subscription::ChangeSubscription;
