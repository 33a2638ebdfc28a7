use std::sync::{Mutex, MutexGuard, PoisonError};

use neo_logging::neo_warn;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// Number of unread transitions a subscriber may fall behind before it lags.
pub const DEFAULT_STREAM_CAPACITY: usize = 64;

/// Holds the latest state and broadcasts every replacement to subscribers.
///
/// The current value and the broadcast are updated under one lock, and new
/// subscribers are registered under the same lock, so a subscriber never
/// misses a transition between its replayed value and its first live one.
pub struct StatePublisher<S> {
    current: Mutex<S>,
    tx: broadcast::Sender<S>,
}

impl<S: Clone> StatePublisher<S> {
    pub fn new(initial: S) -> Self {
        Self::with_capacity(initial, DEFAULT_STREAM_CAPACITY)
    }

    pub fn with_capacity(initial: S, capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            current: Mutex::new(initial),
            tx,
        }
    }

    /// Snapshot of the latest published state.
    pub fn current(&self) -> S {
        self.lock().clone()
    }

    pub fn publish(&self, next: S) {
        let mut current = self.lock();
        *current = next.clone();
        // No subscribers is fine; the value is still retained for replay.
        let _ = self.tx.send(next);
    }

    /// Atomically inspects the current state and publishes the returned
    /// replacement, if any. Returns whether a state was published.
    pub fn publish_if<F>(&self, decide: F) -> bool
    where
        F: FnOnce(&S) -> Option<S>,
    {
        let mut current = self.lock();
        match decide(&current) {
            Some(next) => {
                *current = next.clone();
                let _ = self.tx.send(next);
                true
            }
            None => false,
        }
    }

    pub fn subscribe(&self) -> StateStream<S> {
        let current = self.lock();
        StateStream {
            replay: Some(current.clone()),
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A subscription that yields the latest state first, then every transition.
pub struct StateStream<S> {
    replay: Option<S>,
    rx: broadcast::Receiver<S>,
}

impl<S: Clone> StateStream<S> {
    /// Waits for the next state. Returns `None` once the publisher is gone
    /// and every published state has been received.
    ///
    /// A subscriber that falls more than the channel capacity behind skips
    /// the oldest unread states and resumes with the oldest one still
    /// buffered; a warning is logged with the number skipped.
    pub async fn next(&mut self) -> Option<S> {
        if let Some(state) = self.replay.take() {
            return Some(state);
        }
        loop {
            match self.rx.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    neo_warn!("state subscriber lagged, skipped {} transitions", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next state if one is already available. Lagging skips
    /// states the same way as [`StateStream::next`].
    pub fn try_next(&mut self) -> Option<S> {
        if let Some(state) = self.replay.take() {
            return Some(state);
        }
        loop {
            match self.rx.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    neo_warn!("state subscriber lagged, skipped {} transitions", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Collects every state that is already available without waiting.
    pub fn drain(&mut self) -> Vec<S> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
