use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::ChangeBatch;

/// Error an observer may return from a delivery. It is logged and dropped.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

pub type ObserverResult = Result<(), ObserverError>;

/// A registered receiver of drained change batches.
///
/// Observers are compared by `Arc` identity: registering the same `Arc`
/// twice is a no-op, and removal needs the same `Arc` back. A failing or
/// panicking observer never affects the others.
pub trait ChangeObserver<K, V>: Send + Sync {
    /// Handle one batch. `cancel` fires when the notifier shuts down.
    fn on_changed(
        &self,
        batch: Arc<ChangeBatch<K, V>>,
        cancel: CancellationToken,
    ) -> BoxFuture<'_, ObserverResult>;
}

/// Adapts an async closure into a [`ChangeObserver`].
pub struct CallbackObserver<F> {
    callback: F,
}

impl<F> CallbackObserver<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<K, V, F, Fut> ChangeObserver<K, V> for CallbackObserver<F>
where
    F: Fn(Arc<ChangeBatch<K, V>>) -> Fut + Send + Sync,
    Fut: Future<Output = ObserverResult> + Send + 'static,
{
    fn on_changed(
        &self,
        batch: Arc<ChangeBatch<K, V>>,
        _cancel: CancellationToken,
    ) -> BoxFuture<'_, ObserverResult> {
        Box::pin((self.callback)(batch))
    }
}
