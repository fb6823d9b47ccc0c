// ── Observer registry ──
//
// Identity-based set of observers plus the isolated fan-out that delivers
// one batch to all of them.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::{ChangeBatch, ChangeObserver};

/// Outcome of delivering one batch to a registry snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Thread-safe set of active observers.
pub struct ObserverRegistry<K, V> {
    observers: Mutex<Vec<Arc<dyn ChangeObserver<K, V>>>>,
}

impl<K, V> ObserverRegistry<K, V> {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register `observer`. Returns `false` if this exact `Arc` is already
    /// registered.
    pub fn add(&self, observer: Arc<dyn ChangeObserver<K, V>>) -> bool {
        let mut observers = self.observers.lock();
        if observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Unregister `observer`. Returns `false` if it was not registered.
    pub fn remove(&self, observer: &Arc<dyn ChangeObserver<K, V>>) -> bool {
        let mut observers = self.observers.lock();
        match observers.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                observers.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.observers.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    /// Copy of the current observer set. The lock is released on return.
    pub fn snapshot(&self) -> Vec<Arc<dyn ChangeObserver<K, V>>> {
        self.observers.lock().clone()
    }

    /// Deliver `batch` to every observer registered right now.
    ///
    /// Each observer is its own bulkhead: an error or panic is logged and
    /// skipped, and the rest still receive the batch. Stops early once
    /// `cancel` fires.
    pub async fn deliver(
        &self,
        batch: Arc<ChangeBatch<K, V>>,
        cancel: &CancellationToken,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for observer in self.snapshot() {
            if cancel.is_cancelled() {
                break;
            }

            let call = async { observer.on_changed(Arc::clone(&batch), cancel.clone()).await };
            match AssertUnwindSafe(call).catch_unwind().await {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    warn!(error = %e, "change observer failed; skipping it for this batch");
                    report.failed += 1;
                }
                Err(_) => {
                    warn!("change observer panicked; skipping it for this batch");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

impl<K, V> Default for ObserverRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
