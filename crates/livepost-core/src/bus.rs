//! Topic-keyed event bus.
//!
//! Each topic maps to a set of listeners, one bounded channel per
//! [`Subscription`]. Publishing clones the payload into every listener
//! registered at call time. The registry only owns the sending half of each
//! channel; a subscription keeps a weak handle back to the registry so it can
//! deregister itself when dropped.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Default number of undelivered events buffered per listener.
pub const DEFAULT_LISTENER_CAPACITY: usize = 64;

struct Registry<T> {
    /// Listeners keyed by topic, then by subscription ID.
    topics: RwLock<HashMap<String, HashMap<u64, mpsc::Sender<T>>>>,
    /// Next subscription ID.
    next_subscription_id: AtomicU64,
    /// Buffer size for each new listener.
    capacity: usize,
}

impl<T> Registry<T> {
    /// Remove a listener, dropping the topic entry once it is empty.
    fn remove(&self, topic: &str, subscription_id: u64) -> bool {
        let mut topics = self.topics.write();
        let Some(listeners) = topics.get_mut(topic) else {
            return false;
        };

        let removed = listeners.remove(&subscription_id).is_some();
        if listeners.is_empty() {
            topics.remove(topic);
        }
        removed
    }
}

/// In-process publish/subscribe bus.
///
/// Cloning the bus yields another handle to the same registry.
pub struct EventBus<T> {
    registry: Arc<Registry<T>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> EventBus<T> {
    /// Create a bus with [`DEFAULT_LISTENER_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LISTENER_CAPACITY)
    }

    /// Create a bus whose listeners buffer up to `capacity` events each.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Arc::new(Registry {
                topics: RwLock::new(HashMap::new()),
                next_subscription_id: AtomicU64::new(1),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Register a new listener on `topic`.
    ///
    /// The returned stream yields every payload published to `topic` from
    /// now on. Dropping it deregisters the listener.
    pub fn subscribe(&self, topic: impl Into<String>) -> Subscription<T> {
        let topic = topic.into();
        let subscription_id = self
            .registry
            .next_subscription_id
            .fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = mpsc::channel(self.registry.capacity);

        self.registry
            .topics
            .write()
            .entry(topic.clone())
            .or_default()
            .insert(subscription_id, sender);

        tracing::debug!(subscription_id, topic = %topic, "subscription created");

        Subscription {
            id: subscription_id,
            topic,
            receiver,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `payload` to every listener currently registered on `topic`.
    ///
    /// Returns how many listeners accepted the payload. With no listeners the
    /// payload is dropped. A listener with a full buffer misses this payload
    /// but does not hold up the others.
    pub fn publish(&self, topic: &str, payload: T) -> usize {
        let listeners: Vec<(u64, mpsc::Sender<T>)> = {
            let topics = self.registry.topics.read();
            match topics.get(topic) {
                Some(listeners) => listeners
                    .iter()
                    .map(|(&id, sender)| (id, sender.clone()))
                    .collect(),
                None => {
                    tracing::trace!(topic, "no listeners, event dropped");
                    return 0;
                }
            }
        };

        let mut delivered = 0;
        for (subscription_id, sender) in listeners {
            match sender.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(subscription_id, topic, "listener buffer full, event skipped");
                }
                // Only when the subscription dropped after the snapshot above;
                // its Drop has already deregistered it.
                Err(TrySendError::Closed(_)) => {
                    tracing::trace!(subscription_id, topic, "listener closed during publish");
                }
            }
        }

        tracing::trace!(topic, delivered, "published event");

        delivered
    }

    /// Number of listeners registered on `topic`.
    pub fn listener_count(&self, topic: &str) -> usize {
        self.registry
            .topics
            .read()
            .get(topic)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    /// Topics with at least one listener, sorted by name.
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.topics.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Per-listener buffer size.
    pub fn capacity(&self) -> usize {
        self.registry.capacity
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered listener. Yields payloads as a [`Stream`].
///
/// The stream ends only when the bus itself is gone.
pub struct Subscription<T> {
    id: u64,
    topic: String,
    receiver: mpsc::Receiver<T>,
    registry: Weak<Registry<T>>,
}

impl<T> Subscription<T> {
    /// Unique subscription ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Topic this listener is registered on.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next payload.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Take an already buffered payload without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(&self.topic, self.id) {
                tracing::debug!(
                    subscription_id = self.id,
                    topic = %self.topic,
                    "subscription removed"
                );
            }
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish()
    }
}
