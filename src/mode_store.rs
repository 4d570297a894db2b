//! Shared mode selection store
//!
//! One store owns the `ModeSelection` for the whole process. All mutation
//! goes through the setters here; everything else holds a subscription and
//! reads snapshots. Setters update the stored value before they return, so
//! the caller (and anyone reading afterwards) observes the change
//! synchronously; subscriber wakeups follow asynchronously.

use tokio::sync::watch;
use tracing::info;

use crate::types::{Mode, ModeSelection};

/// Handle to the shared mode selection. Cheap to clone; all clones point at
/// the same store.
#[derive(Debug, Clone)]
pub struct ModeStore {
    tx: watch::Sender<ModeSelection>,
}

impl ModeStore {
    /// Creates a store with the default selection (offshore, toggles off).
    pub fn new() -> Self {
        Self::with_selection(ModeSelection::default())
    }

    /// Creates a store with an explicit initial selection.
    pub fn with_selection(initial: ModeSelection) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current selection snapshot.
    pub fn current(&self) -> ModeSelection {
        *self.tx.borrow()
    }

    /// Subscribes to selection changes. The receiver also yields the current
    /// value immediately via `borrow`.
    pub fn subscribe(&self) -> watch::Receiver<ModeSelection> {
        self.tx.subscribe()
    }

    /// Replaces the operating mode. Subscribers are only notified when the
    /// value actually changes; re-selecting the active mode is a no-op.
    pub fn set_mode(&self, mode: Mode) {
        let changed = self.tx.send_if_modified(|sel| {
            if sel.mode == mode {
                false
            } else {
                sel.mode = mode;
                true
            }
        });
        if changed {
            info!("[ModeStore] Operating mode set to {}", mode);
        }
    }

    /// Toggles simulation mode. Independent of `mode` and `demo_mode`.
    pub fn set_simulation_mode(&self, enabled: bool) {
        let changed = self.tx.send_if_modified(|sel| {
            if sel.simulation_mode == enabled {
                false
            } else {
                sel.simulation_mode = enabled;
                true
            }
        });
        if changed {
            info!("[ModeStore] Simulation mode {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    /// Toggles demo mode. Independent of `mode` and `simulation_mode`.
    pub fn set_demo_mode(&self, enabled: bool) {
        let changed = self.tx.send_if_modified(|sel| {
            if sel.demo_mode == enabled {
                false
            } else {
                sel.demo_mode = enabled;
                true
            }
        });
        if changed {
            info!("[ModeStore] Demo mode {}", if enabled { "enabled" } else { "disabled" });
        }
    }
}

impl Default for ModeStore {
    fn default() -> Self {
        Self::new()
    }
}
