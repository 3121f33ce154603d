//! Build-once memoizing cache.
//!
//! Dispatchers build their lookup table lazily on first use and keep it for
//! the rest of their lifetime. [`BuildOnce`] is the collaborator that makes
//! that build happen exactly once, even when the first calls race across
//! threads, and that detects the one misuse the table build allows: a
//! preparer referencing the table it is in the middle of building.

use polyvis_core::ImplementationError;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread::{self, ThreadId};

/// A single-initialization cell with re-entrancy detection.
///
/// The first caller claims the build and runs it; concurrent callers wait
/// for the published value. A re-entrant call from the building thread
/// itself returns [`ImplementationError`] instead of deadlocking. A failed
/// build releases the claim, so a later call may try again; once a value is
/// published it is never replaced.
pub struct BuildOnce<V> {
    slot: OnceLock<V>,
    owner: Mutex<Option<ThreadId>>,
}

enum Claim<'a, V> {
    /// The caller owns the build.
    Owner,
    /// Another thread published the value while we waited.
    Ready(&'a V),
}

impl<V> BuildOnce<V> {
    /// An empty, unbuilt cell.
    pub fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            owner: Mutex::new(None),
        }
    }

    /// The built value, if the build has completed.
    pub fn get(&self) -> Option<&V> {
        self.slot.get()
    }

    /// Whether the build has completed.
    pub fn is_built(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Return the built value, running `build` first if necessary.
    ///
    /// `dispatcher` names the owning dispatcher in the re-entrancy error.
    pub fn get_or_try_build<F, E>(&self, dispatcher: &str, build: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
        E: From<ImplementationError>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        match self.claim(dispatcher)? {
            Claim::Ready(value) => Ok(value),
            Claim::Owner => match build() {
                // Publish before releasing the claim: a waiter that sees the
                // claim dropped must already find the value in the slot.
                Ok(value) => {
                    let stored = self.slot.get_or_init(|| value);
                    self.release();
                    Ok(stored)
                }
                Err(err) => {
                    self.release();
                    Err(err)
                }
            },
        }
    }

    /// Claim the build, or wait until another thread publishes the value.
    fn claim(&self, dispatcher: &str) -> Result<Claim<'_, V>, ImplementationError> {
        let me = thread::current().id();
        loop {
            if let Some(value) = self.slot.get() {
                return Ok(Claim::Ready(value));
            }
            {
                let mut owner = self.lock_owner();
                match *owner {
                    Some(id) if id == me => {
                        return Err(ImplementationError::recursive_build(dispatcher));
                    }
                    Some(_) => {} // another thread is building; spin below
                    None => {
                        *owner = Some(me);
                        return Ok(Claim::Owner);
                    }
                }
            }
            thread::yield_now();
        }
    }

    fn release(&self) {
        *self.lock_owner() = None;
    }

    fn lock_owner(&self) -> std::sync::MutexGuard<'_, Option<ThreadId>> {
        // The guarded state is a plain Option; a poisoned lock is still usable.
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Default for BuildOnce<V> {
    fn default() -> Self {
        Self::new()
    }
}
