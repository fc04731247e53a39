//! Guard returned by [`crate::StateStore::lock`].

use std::fmt;

/// Keeps a backend's lock alive; dropping it releases the lock.
#[must_use = "the lock is released as soon as the guard drops"]
pub struct StoreLock {
    held: Option<Box<dyn Send>>,
}

impl StoreLock {
    /// A guard that holds nothing.
    pub fn unguarded() -> Self {
        Self { held: None }
    }

    /// A guard owning `resource` (a locked file handle, say) until dropped.
    pub fn holding<T: Send + 'static>(resource: T) -> Self {
        Self {
            held: Some(Box::new(resource)),
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

impl fmt::Debug for StoreLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreLock")
            .field("held", &self.is_held())
            .finish()
    }
}
