// ── Stream subscription ──
//
// Channel-backed observer exposed as a `Stream` of batches, so async
// consumers can `while let Some(batch) = sub.next().await` instead of
// implementing `ChangeObserver` themselves.

use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_util::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use super::notifier::NotifierInner;
use super::{ChangeBatch, ChangeObserver, ObserverResult};

/// Stream of batches from a [`DebounceChangeNotifier`](super::DebounceChangeNotifier).
///
/// Ends once the notifier shuts down or is dropped, and right away when
/// taken from a notifier that is already shut down. Dropping the
/// subscription unregisters its observer.
pub struct ChangeSubscription<K, V> {
    receiver: UnboundedReceiverStream<Arc<ChangeBatch<K, V>>>,
    observer: Weak<dyn ChangeObserver<K, V>>,
    owner: Weak<NotifierInner<K, V>>,
}

impl<K, V> ChangeSubscription<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Build the subscription and the observer the caller must register.
    pub(super) fn new(owner: Weak<NotifierInner<K, V>>) -> (Self, Arc<dyn ChangeObserver<K, V>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let observer: Arc<dyn ChangeObserver<K, V>> = Arc::new(ChannelObserver { tx });
        let subscription = Self {
            receiver: UnboundedReceiverStream::new(rx),
            observer: Arc::downgrade(&observer),
            owner,
        };
        (subscription, observer)
    }

    /// Wait for the next batch. `None` once the notifier is gone.
    pub async fn next_batch(&mut self) -> Option<Arc<ChangeBatch<K, V>>> {
        self.receiver.next().await
    }
}

impl<K, V> Stream for ChangeSubscription<K, V> {
    type Item = Arc<ChangeBatch<K, V>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl<K, V> Drop for ChangeSubscription<K, V> {
    fn drop(&mut self) {
        if let (Some(owner), Some(observer)) = (self.owner.upgrade(), self.observer.upgrade()) {
            owner.observers.remove(&observer);
        }
    }
}

struct ChannelObserver<K, V> {
    tx: mpsc::UnboundedSender<Arc<ChangeBatch<K, V>>>,
}

impl<K, V> ChangeObserver<K, V> for ChannelObserver<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    fn on_changed(
        &self,
        batch: Arc<ChangeBatch<K, V>>,
        _cancel: CancellationToken,
    ) -> BoxFuture<'_, ObserverResult> {
        let sent = self.tx.send(batch);
        Box::pin(async move { sent.map_err(|_| "subscription receiver closed".into()) })
    }
}
