//! Cancellable subscription handle for live document updates.
//!
//! A store adapter creates a pair with [`Subscription::channel`]: it keeps
//! the [`SubscriptionSink`] in whatever task receives change notifications
//! and hands the [`Subscription`] to the single consumer.
//!
//! ```text
//! store task ──SubscriptionSink──► mpsc ──► Subscription ──► consumer
//!      ▲                                         │
//!      └──────────── watch(cancelled) ◄──────────┘ cancel() / drop
//! ```
//!
//! The sequence is infinite until cancelled. The first error ends it:
//! after yielding an `Err`, the subscription yields `None` forever and the
//! consumer has to subscribe again.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, watch};

use super::StoreError;

/// Consumer half of a live subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: mpsc::Receiver<Result<T, StoreError>>,
    cancel: watch::Sender<bool>,
    finished: bool,
}

/// Producer half, held by the store adapter.
#[derive(Debug)]
pub struct SubscriptionSink<T> {
    sender: mpsc::Sender<Result<T, StoreError>>,
    cancelled: watch::Receiver<bool>,
}

impl<T> Subscription<T> {
    /// Creates a connected sink/subscription pair.
    ///
    /// `buffer` bounds how many undelivered snapshots may queue up before
    /// the producer waits.
    pub fn channel(buffer: usize) -> (SubscriptionSink<T>, Subscription<T>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let (cancel, cancelled) = watch::channel(false);
        (
            SubscriptionSink { sender, cancelled },
            Subscription {
                receiver,
                cancel,
                finished: false,
            },
        )
    }

    /// Waits for the next item.
    ///
    /// Returns `None` once cancelled, after an error was delivered, or when
    /// the producer went away.
    pub async fn next_item(&mut self) -> Option<Result<T, StoreError>> {
        if self.finished {
            return None;
        }
        let item = self.receiver.recv().await;
        self.observe(item)
    }

    /// Releases the registration with the store.
    ///
    /// Items already queued are discarded.
    pub fn cancel(&mut self) {
        if !self.finished {
            self.finished = true;
            self.cancel.send_replace(true);
            self.receiver.close();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn observe(&mut self, item: Option<Result<T, StoreError>>) -> Option<Result<T, StoreError>> {
        match item {
            Some(Ok(value)) => Some(Ok(value)),
            Some(Err(e)) => {
                self.cancel();
                Some(Err(e))
            }
            None => {
                self.cancel();
                None
            }
        }
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, StoreError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }
        match this.receiver.poll_recv(cx) {
            Poll::Ready(item) => Poll::Ready(this.observe(item)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

impl<T> SubscriptionSink<T> {
    /// Delivers an item. Returns false once the consumer is gone.
    pub async fn send(&self, item: Result<T, StoreError>) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.sender.send(item).await.is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow() || self.sender.is_closed()
    }

    /// Resolves when the consumer cancels or drops the subscription.
    pub async fn cancelled(&mut self) {
        if self.is_cancelled() {
            return;
        }
        // Err means the consumer half was dropped, which also cancels.
        let _ = self.cancelled.wait_for(|cancelled| *cancelled).await;
    }
}
