//! Nullable store: thread-safe in-memory state for testing.

use ballot_store::{LedgerState, StateStore, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory [`StateStore`] that counts saves and can be told to fail.
///
/// Saves keep a clone, so later mutation by the caller never leaks in.
#[derive(Debug, Default)]
pub struct NullStore {
    state: Mutex<Option<LedgerState>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl NullStore {
    /// A store with nothing saved yet (first run).
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    /// The last saved state.
    pub fn snapshot(&self) -> Option<LedgerState> {
        self.state.lock().unwrap().clone()
    }

    /// Overwrite the stored state directly, bypassing the save counter.
    pub fn replace(&self, state: LedgerState) {
        *self.state.lock().unwrap() = Some(state);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every following save return [`StoreError::Backend`].
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl StateStore for NullStore {
    fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("save disabled".into()));
        }
        *self.state.lock().unwrap() = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
