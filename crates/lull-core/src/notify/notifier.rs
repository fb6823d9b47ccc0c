// ── Debounced change notifier ──
//
// Producers record changes; one background task per notifier drains them
// every interval and fans each batch out to the registered observers. The
// task exists only while someone is listening.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::monitor::Monitor;
use super::subscription::ChangeSubscription;
use super::{CallbackObserver, ChangeBatch, ChangeObserver, ChangeSet, ObserverRegistry, ObserverResult};
use crate::config::NotifierConfig;
use crate::error::CoreError;

/// Coalesces per-key updates and delivers them in periodic batches.
///
/// Dropping the notifier (or calling [`shutdown`](Self::shutdown)) stops
/// the background task for good.
pub struct DebounceChangeNotifier<K, V> {
    inner: Arc<NotifierInner<K, V>>,
}

pub(super) struct NotifierInner<K, V> {
    interval: Duration,
    changes: ChangeSet<K, V>,
    pub(super) observers: ObserverRegistry<K, V>,
    monitor: Monitor,
}

impl<K, V> DebounceChangeNotifier<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create a notifier driven by the ambient tokio runtime, if any.
    pub fn new(config: NotifierConfig) -> Result<Self, CoreError> {
        Self::build(config, Handle::try_current().ok())
    }

    pub fn with_interval(interval: Duration) -> Result<Self, CoreError> {
        Self::new(NotifierConfig::with_interval(interval))
    }

    /// Create a notifier whose background task runs on `runtime`.
    pub fn with_runtime(config: NotifierConfig, runtime: Handle) -> Result<Self, CoreError> {
        Self::build(config, Some(runtime))
    }

    fn build(config: NotifierConfig, runtime: Option<Handle>) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(NotifierInner {
                interval: config.interval,
                changes: ChangeSet::new(),
                observers: ObserverRegistry::new(),
                monitor: Monitor::new(runtime),
            }),
        })
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Record the latest value for `key`. Never blocks on observers.
    pub fn notify_changed(&self, key: K, value: V) {
        self.inner.changes.record(key, value);
        trace!("change recorded");
    }

    /// Register `observer` and make sure the monitor is running.
    ///
    /// Returns `false` if this exact `Arc` was already registered or the
    /// notifier has been shut down.
    pub fn add_observer(&self, observer: Arc<dyn ChangeObserver<K, V>>) -> bool {
        let added = self.inner.observers.add(Arc::clone(&observer));
        // Checked after adding so a concurrent `shutdown` cannot miss it.
        if self.inner.monitor.is_shut_down() {
            self.inner.observers.remove(&observer);
            debug!("observer refused, notifier is shut down");
            return false;
        }
        self.inner.ensure_monitoring();
        added
    }

    /// Unregister `observer`. The monitor notices an empty registry on its
    /// next cycle and stops by itself.
    pub fn remove_observer(&self, observer: &Arc<dyn ChangeObserver<K, V>>) -> bool {
        self.inner.observers.remove(observer)
    }

    /// Forward batches to `callback` until `cancel` fires.
    ///
    /// Registers a transient observer, waits one interval at a time until
    /// cancellation, then unregisters it. The observer is also unregistered
    /// if the returned future is dropped early. A delivery already in flight
    /// when `cancel` fires still completes.
    pub async fn watch<F, Fut>(&self, callback: F, cancel: CancellationToken)
    where
        F: Fn(Arc<ChangeBatch<K, V>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ObserverResult> + Send + 'static,
    {
        let observer: Arc<dyn ChangeObserver<K, V>> = Arc::new(CallbackObserver::new(callback));
        if !self.add_observer(Arc::clone(&observer)) {
            return;
        }
        let _registration = Registration {
            observers: &self.inner.observers,
            observer,
        };

        while !cancel.is_cancelled() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(self.inner.interval) => {}
            }
        }
    }

    /// Receive batches as a `Stream`. Dropping the subscription unregisters it.
    ///
    /// On a shut-down notifier the stream ends immediately.
    pub fn subscribe(&self) -> ChangeSubscription<K, V> {
        let (subscription, observer) = ChangeSubscription::new(Arc::downgrade(&self.inner));
        // A refused observer is dropped with its sender, ending the stream.
        self.add_observer(observer);
        subscription
    }

    /// Stop the background task regardless of registered observers.
    ///
    /// Observers are released and the monitor never restarts. A batch
    /// drained but not yet delivered is dropped.
    pub fn shutdown(&self) {
        self.inner.monitor.shutdown();
        self.inner.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.inner.changes.is_pending()
    }

    pub fn is_monitoring(&self) -> bool {
        self.inner.monitor.is_running()
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.monitor.is_shut_down()
    }
}

impl<K, V> NotifierInner<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn ensure_monitoring(self: &Arc<Self>) {
        let inner = Arc::clone(self);
        self.monitor
            .ensure_started(move |run, cancel| monitor_task(inner, run, cancel));
    }
}

/// Unregisters a transient observer when dropped.
struct Registration<'a, K, V> {
    observers: &'a ObserverRegistry<K, V>,
    observer: Arc<dyn ChangeObserver<K, V>>,
}

impl<K, V> Drop for Registration<'_, K, V> {
    fn drop(&mut self) {
        self.observers.remove(&self.observer);
    }
}

impl<K, V> Drop for DebounceChangeNotifier<K, V> {
    fn drop(&mut self) {
        self.inner.monitor.shutdown();
        self.inner.observers.clear();
    }
}

impl<K, V> fmt::Debug for DebounceChangeNotifier<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceChangeNotifier")
            .field("interval", &self.inner.interval)
            .field("observers", &self.inner.observers.len())
            .field("monitor", &self.inner.monitor)
            .finish_non_exhaustive()
    }
}

/// The monitor loop: sleep, drain, fan out, until nobody listens.
async fn monitor_task<K, V>(inner: Arc<NotifierInner<K, V>>, run: u64, cancel: CancellationToken)
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    debug!(run, interval_ms = inner.interval.as_millis(), "change monitor started");

    while !cancel.is_cancelled() && !inner.observers.is_empty() {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(inner.interval) => {}
        }

        // Leave pending changes for the next listener rather than draining
        // them into an empty registry.
        if inner.observers.is_empty() {
            break;
        }

        if let Some(batch) = inner.changes.extract() {
            let batch = Arc::new(batch);
            let report = inner.observers.deliver(Arc::clone(&batch), &cancel).await;
            debug!(
                run,
                changes = batch.len(),
                delivered = report.delivered,
                failed = report.failed,
                "change batch flushed"
            );
        }
    }

    inner.monitor.finish(run);
    debug!(run, "change monitor stopped");

    // An observer may have registered after the emptiness check but before
    // `finish`; its own start attempt saw this run and backed off.
    if !cancel.is_cancelled() && !inner.observers.is_empty() {
        inner.ensure_monitoring();
    }
}
