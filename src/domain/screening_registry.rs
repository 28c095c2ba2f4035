use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::id::{MovieId, TheaterId};
use crate::domain::screening_state::ScreeningState;

new_key_type! {
    pub struct ScreeningSlot;
}

/// A screening is addressed by the (movie, theater) pair it belongs to.
pub type ScreeningKey = (MovieId, TheaterId);

#[derive(Debug, Default)]
struct RegistryInner {
    /// Screening state storage; slots stay stable for the process lifetime.
    slots: SlotMap<ScreeningSlot, Arc<ScreeningState>>,

    /// Index lookup of the internal slot using the (movie, theater) pair.
    key_index: HashMap<ScreeningKey, ScreeningSlot>,
}

/// Owner of every [`ScreeningState`] in the system.
///
/// States are created lazily on first use and never removed. Callers get
/// `Arc` handles whose validity does not depend on any registry lock still
/// being held.
#[derive(Debug, Clone)]
pub struct ScreeningRegistry {
    /// Both maps are protected with a single lock.
    inner: Arc<RwLock<RegistryInner>>,
}

impl ScreeningRegistry {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(RegistryInner::default())) }
    }

    /// Read-side lookup. Never blocks other readers; returns `None` for a
    /// pair no reservation has ever touched.
    pub fn lookup(&self, key: ScreeningKey) -> Option<Arc<ScreeningState>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let slot = guard.key_index.get(&key)?;
        guard.slots.get(*slot).cloned()
    }

    /// Returns the state for `key`, creating it on first use.
    ///
    /// Double-checked: an optimistic read-only lookup first, then the write
    /// lock with a mandatory re-check, so two racing callers can never both
    /// insert a state for the same pair.
    pub fn get_or_create(&self, key: ScreeningKey) -> Arc<ScreeningState> {
        if let Some(state) = self.lookup(key) {
            return state;
        }

        let mut guard = self.inner.write().expect("RwLock poisoned");
        if let Some(slot) = guard.key_index.get(&key) {
            // Lost the race to another writer between the read and the
            // write acquisition.
            return guard.slots[*slot].clone();
        }

        let state = Arc::new(ScreeningState::new());
        let slot = guard.slots.insert(state.clone());
        guard.key_index.insert(key, slot);
        log::debug!("created screening state for movie {} / theater {}", key.0, key.1);

        state
    }

    /// Number of screenings that have state, for the front-end summary.
    pub fn len(&self) -> usize {
        self.inner.read().expect("RwLock poisoned").slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScreeningRegistry {
    fn default() -> Self {
        Self::new()
    }
}
