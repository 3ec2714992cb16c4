//! Publish/subscribe channels for table state.
//!
//! Each channel keeps its own listener list. Subscribing returns a
//! [`Subscription`] whose `unsubscribe()` removes exactly that listener.
//! Dropping the handle without unsubscribing leaves the listener attached.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

struct ChannelInner<E: ?Sized> {
    next_id: u64,
    listeners: Vec<(u64, Arc<dyn Fn(&E) + Send + Sync>)>,
}

/// A notification channel delivering `&E` to every registered listener.
///
/// Cheap to clone; clones share the listener list.
pub struct Channel<E: ?Sized> {
    inner: Arc<Mutex<ChannelInner<E>>>,
}

fn lock<E: ?Sized>(inner: &Mutex<ChannelInner<E>>) -> MutexGuard<'_, ChannelInner<E>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<E: ?Sized + 'static> Channel<E> {
    /// Create a channel with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut guard = lock(&self.inner);
            let id = guard.next_id;
            let listener: Arc<dyn Fn(&E) + Send + Sync> = Arc::new(listener);
            guard.next_id += 1;
            guard.listeners.push((id, listener));
            id
        };

        let weak: Weak<Mutex<ChannelInner<E>>> = Arc::downgrade(&self.inner);
        Subscription {
            id,
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// Listeners run without the channel lock held, so they may subscribe,
    /// unsubscribe, or trigger further emits.
    pub fn emit(&self, event: &E) {
        let listeners: Vec<Arc<dyn Fn(&E) + Send + Sync>> = lock(&self.inner)
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: ?Sized + 'static> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Clone for Channel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: ?Sized> std::fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("listeners", &lock(&self.inner).listeners.len())
            .finish()
    }
}

/// Disposable handle for a registered listener.
pub struct Subscription {
    id: u64,
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Identifier of the listener within its channel.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Other listeners on the channel are unaffected.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_all_listeners() {
        let channel: Channel<usize> = Channel::new();
        let total = Arc::new(AtomicUsize::new(0));

        let a = Arc::clone(&total);
        let _s1 = channel.subscribe(move |v| {
            a.fetch_add(*v, Ordering::SeqCst);
        });
        let b = Arc::clone(&total);
        let _s2 = channel.subscribe(move |v| {
            b.fetch_add(*v * 10, Ordering::SeqCst);
        });

        channel.emit(&2);
        assert_eq!(total.load(Ordering::SeqCst), 22);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_listener() {
        let channel: Channel<str> = Channel::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&first);
        let s1 = channel.subscribe(move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let s = Arc::clone(&second);
        let _s2 = channel.subscribe(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        channel.emit("a");
        s1.unsubscribe();
        channel.emit("b");

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_unsubscribe_after_channel_dropped() {
        let channel: Channel<u8> = Channel::new();
        let sub = channel.subscribe(|_| {});
        drop(channel);
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let channel: Channel<u8> = Channel::new();
        let inner = channel.clone();
        let _sub = channel.subscribe(move |_| {
            let _ = inner.subscribe(|_| {});
        });

        channel.emit(&0);
        assert_eq!(channel.len(), 2);
    }
}
