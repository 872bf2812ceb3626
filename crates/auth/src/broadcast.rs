//! Replay-latest broadcast.
//!
//! A [`LatestBroadcast`] stores the most recent value plus a list of
//! subscribers. A new subscriber immediately receives the stored value,
//! then one message per [`LatestBroadcast::publish`] call, in publish order.
//! Unlike `tokio::sync::watch`, nothing is coalesced: a subscriber that falls
//! behind still observes every transition.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

/// Receiving end of a [`LatestBroadcast`].
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::UnboundedReceiver<M>,
}

impl<M> Subscription<M> {
    /// Wait for the next value. Returns `None` once the broadcast is dropped
    /// and every buffered value has been received.
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    /// Take the next buffered value without waiting.
    pub fn try_recv(&mut self) -> Result<M, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every buffered value.
    pub fn drain(&mut self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(value) = self.receiver.try_recv() {
            out.push(value);
        }
        out
    }
}

#[derive(Debug)]
struct Inner<M> {
    latest: M,
    subscribers: Vec<mpsc::UnboundedSender<M>>,
}

/// Stored last value + subscriber list.
#[derive(Debug)]
pub struct LatestBroadcast<M> {
    inner: Mutex<Inner<M>>,
}

impl<M: Clone> LatestBroadcast<M> {
    pub fn new(initial: M) -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Clone of the stored value.
    pub fn latest(&self) -> M {
        self.lock().latest.clone()
    }

    /// Inspect the stored value without cloning it.
    pub fn with_latest<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.lock().latest)
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();

        // The receiver is alive, so the replay cannot fail.
        let _ = tx.send(inner.latest.clone());
        inner.subscribers.push(tx);

        Subscription { receiver: rx }
    }

    /// Store `value` and deliver it to every live subscriber.
    pub fn publish(&self, value: M) {
        let mut inner = self.lock();

        // Drop any dead subscribers while publishing.
        inner.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        inner.latest = value;
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .subscribers
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    // Every mutation is a single assignment or `retain`, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Inner<M>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
