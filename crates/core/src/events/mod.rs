//! First-spawn events
//!
//! Other plugins observe teleports through two events:
//!
//! - [`PlayerFirstSpawnEvent`] before the teleport, cancellable
//! - [`PlayerFirstSpawnedEvent`] after it, informational
//!
//! Observers run synchronously on the dispatching thread in registration
//! order. Pre-teleport dispatch stops at the first observer that leaves the
//! event cancelled.
//!
//! # Example
//!
//! ```ignore
//! use firstspawn_core::events::EventBus;
//!
//! let key = events.on_pre_teleport(|event| {
//!     if maintenance_mode() {
//!         event.cancel("maintenance");
//!     }
//! });
//!
//! // Later, unregister if needed
//! events.remove_listener(key);
//! ```

mod types;

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

pub use types::{PlayerFirstSpawnEvent, PlayerFirstSpawnedEvent};

new_key_type! {
    /// Key for registered listeners, used for removal
    pub struct ListenerKey;
}

pub type PreTeleportCallback = Arc<dyn Fn(&mut PlayerFirstSpawnEvent<'_>) + Send + Sync>;
pub type PostTeleportCallback = Arc<dyn Fn(&PlayerFirstSpawnedEvent<'_>) + Send + Sync>;

/// Which list a listener key belongs to
#[derive(Clone, Copy, Debug)]
enum ListenerType {
    PreTeleport,
    PostTeleport,
}

/// Observer lists for both events
#[derive(Default)]
pub struct EventBus {
    keys: RwLock<SlotMap<ListenerKey, ListenerType>>,
    pre_teleport: RwLock<Vec<(ListenerKey, PreTeleportCallback)>>,
    post_teleport: RwLock<Vec<(ListenerKey, PostTeleportCallback)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe teleports before they happen
    pub fn on_pre_teleport<F>(&self, callback: F) -> ListenerKey
    where
        F: Fn(&mut PlayerFirstSpawnEvent<'_>) + Send + Sync + 'static,
    {
        let key = self.keys.write().insert(ListenerType::PreTeleport);
        self.pre_teleport.write().push((key, Arc::new(callback)));
        key
    }

    /// Observe completed teleports
    pub fn on_post_teleport<F>(&self, callback: F) -> ListenerKey
    where
        F: Fn(&PlayerFirstSpawnedEvent<'_>) + Send + Sync + 'static,
    {
        let key = self.keys.write().insert(ListenerType::PostTeleport);
        self.post_teleport.write().push((key, Arc::new(callback)));
        key
    }

    /// Remove a listener by its key
    ///
    /// Returns `true` if the listener was found and removed.
    pub fn remove_listener(&self, key: ListenerKey) -> bool {
        let listener_type = self.keys.write().remove(key);

        match listener_type {
            Some(ListenerType::PreTeleport) => remove_from(&self.pre_teleport, key),
            Some(ListenerType::PostTeleport) => remove_from(&self.post_teleport, key),
            None => false,
        }
    }

    /// Number of registered listeners of both kinds
    pub fn listener_count(&self) -> usize {
        self.keys.read().len()
    }

    /// Run pre-teleport observers until one cancels.
    ///
    /// Returns whether the event ended up cancelled.
    pub fn fire_pre_teleport(&self, event: &mut PlayerFirstSpawnEvent<'_>) -> bool {
        // Snapshot so observers may register or remove listeners
        let callbacks: Vec<PreTeleportCallback> = self
            .pre_teleport
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in callbacks {
            callback(event);
            if event.is_cancelled() {
                break;
            }
        }
        event.is_cancelled()
    }

    /// Run every post-teleport observer
    pub fn fire_post_teleport(&self, event: &PlayerFirstSpawnedEvent<'_>) {
        let callbacks: Vec<PostTeleportCallback> = self
            .post_teleport
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }
}

fn remove_from<T>(list: &RwLock<Vec<(ListenerKey, T)>>, key: ListenerKey) -> bool {
    let mut list = list.write();
    let before = list.len();
    list.retain(|(k, _)| *k != key);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use firstspawn_host::MemoryPlayer;
    use firstspawn_sdk::Location;

    use crate::location::SpawnLocation;

    fn fixtures() -> (MemoryPlayer, SpawnLocation) {
        (
            MemoryPlayer::new(1, "Steve", Location::new("world", 0.0, 64.0, 0.0)),
            SpawnLocation::new("world", 100.0, 70.0, 100.0, None),
        )
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            bus.on_pre_teleport(move |_| order.lock().push(i));
        }

        let (player, target) = fixtures();
        let mut event = PlayerFirstSpawnEvent::new(&player, &target, true);
        assert!(!bus.fire_pre_teleport(&mut event));
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_dispatch_stops_at_first_cancel() {
        let bus = EventBus::new();
        let later = Arc::new(AtomicUsize::new(0));

        bus.on_pre_teleport(|event| event.cancel("busy"));
        let counter = Arc::clone(&later);
        bus.on_pre_teleport(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let (player, target) = fixtures();
        let mut event = PlayerFirstSpawnEvent::new(&player, &target, true);
        assert!(bus.fire_pre_teleport(&mut event));
        assert_eq!(event.cancel_reason(), Some("busy"));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_uncancel_lets_dispatch_continue() {
        let bus = EventBus::new();
        bus.on_pre_teleport(|event| {
            event.set_cancel_reason("ignored");
            event.set_cancelled(false);
        });

        let (player, target) = fixtures();
        let mut event = PlayerFirstSpawnEvent::new(&player, &target, false);
        assert!(!bus.fire_pre_teleport(&mut event));
        assert!(!event.is_first_join());
    }

    #[test]
    fn test_remove_listener() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let key = bus.on_post_teleport(move |event| {
            assert!(event.was_welcome_message_sent());
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.listener_count(), 1);

        let (player, target) = fixtures();
        bus.fire_post_teleport(&PlayerFirstSpawnedEvent::new(&player, &target, true, true));
        assert!(bus.remove_listener(key));
        assert!(!bus.remove_listener(key));
        bus.fire_post_teleport(&PlayerFirstSpawnedEvent::new(&player, &target, true, true));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}
