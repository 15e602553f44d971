//! Facility selection state.
//!
//! Tracks which facility's data the dashboard currently displays, persisted
//! across reloads. Switching facility does not reload anything itself; it
//! bumps an invalidation generation that every facility-scoped view watches
//! and reacts to by refetching.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use carelink_core::FacilityId;

use crate::store::{StateStore, SELECTED_FACILITY_KEY};
use crate::types::Facility;

/// Shared, injectable holder of the active facility.
#[derive(Clone)]
pub struct FacilitySelection {
    store: Arc<dyn StateStore>,
    current: Arc<RwLock<Option<FacilityId>>>,
    invalidation_tx: Arc<watch::Sender<u64>>,
}

impl FacilitySelection {
    /// Build over `store`, restoring a persisted selection if one exists.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let restored = store.get(SELECTED_FACILITY_KEY).map(FacilityId::new);
        let (invalidation_tx, _) = watch::channel(0);

        Self {
            store,
            current: Arc::new(RwLock::new(restored)),
            invalidation_tx: Arc::new(invalidation_tx),
        }
    }

    /// The active facility, if one is selected.
    pub fn active(&self) -> Option<FacilityId> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// First-load initialization from the facilities list.
    ///
    /// With no persisted selection and a non-empty list, selects the first
    /// entry (backend order is stable) and persists it. An empty list leaves
    /// the selection unset. An existing selection is left alone even if it no
    /// longer appears in `available`; a facility-not-found response from the
    /// API is the caller's cue to [`reset`](Self::reset) and re-initialize.
    pub fn initialize(&self, available: &[Facility]) {
        if self.active().is_some() {
            return;
        }

        let Some(first) = available.first() else {
            return;
        };

        if let Ok(mut guard) = self.current.write() {
            // Re-check under the lock; a concurrent select wins.
            if guard.is_none() {
                self.store
                    .put(SELECTED_FACILITY_KEY, first.id.as_str().to_string());
                *guard = Some(first.id.clone());
            }
        }
    }

    /// Operator-initiated facility switch: persist and invalidate every
    /// facility-scoped view.
    pub fn select(&self, facility: FacilityId) {
        if let Ok(mut guard) = self.current.write() {
            self.store
                .put(SELECTED_FACILITY_KEY, facility.as_str().to_string());
            *guard = Some(facility);
        }
        self.invalidation_tx.send_modify(|generation| *generation += 1);
    }

    /// Drop the persisted selection (e.g. after the API reports the selected
    /// facility gone), so the next `initialize` can pick again.
    pub fn reset(&self) {
        if let Ok(mut guard) = self.current.write() {
            self.store.remove(SELECTED_FACILITY_KEY);
            *guard = None;
        }
        self.invalidation_tx.send_modify(|generation| *generation += 1);
    }

    /// Subscribe to the invalidation generation; it changes on every
    /// `select`/`reset`.
    pub fn invalidations(&self) -> watch::Receiver<u64> {
        self.invalidation_tx.subscribe()
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        *self.invalidation_tx.borrow()
    }
}
