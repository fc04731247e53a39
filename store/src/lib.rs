//! Ledger state and the abstract storage seam.
//!
//! The whole application state (users, elections, chain, vote payloads) is
//! one aggregate, [`LedgerState`], loaded and saved as a unit. Backends
//! implement [`StateStore`]; the election service depends only on the trait,
//! so the whole-file JSON backend can later give way to a transactional
//! store without touching election logic.

pub mod election;
pub mod error;
pub mod lock;
pub mod payload;
pub mod state;
pub mod user;

use std::sync::Arc;

pub use election::{Candidate, ElectionRecord, ElectionStatus};
pub use error::StoreError;
pub use lock::StoreLock;
pub use payload::VotePayload;
pub use state::LedgerState;
pub use user::{User, PLACEHOLDER_PHOTO};

/// Whole-aggregate persistence: no partial loads, no partial writes.
pub trait StateStore: Send + Sync {
    /// Load the persisted state. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<LedgerState>, StoreError>;

    /// Replace the persisted state with `state`.
    fn save(&self, state: &LedgerState) -> Result<(), StoreError>;

    /// Exclusive access to the persisted state for one load-modify-save
    /// cycle, held until the returned guard drops. Blocks while another
    /// holder, possibly another process, has it.
    ///
    /// Backends that nothing else can reach need no lock of their own.
    fn lock(&self) -> Result<StoreLock, StoreError> {
        Ok(StoreLock::unguarded())
    }
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        (**self).save(state)
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        (**self).lock()
    }
}
