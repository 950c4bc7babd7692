//! Write-once cache slots
//!
//! A [`LazySlot`] moves from "unset" to "set" at most once. Initialization
//! uses double-checked locking so concurrent first accesses run the
//! initializer a single time. A failed initializer leaves the slot unset.

use crate::error::{Error, Result};
use crate::sync::MutexExt;
use std::sync::{Mutex, OnceLock};
use std::thread::{self, ThreadId};

pub(crate) struct LazySlot<T> {
    /// Slot name used in recursion errors
    name: &'static str,
    value: OnceLock<T>,
    /// Serializes the check-then-populate sequence
    init: Mutex<()>,
    /// Thread currently running the initializer
    owner: Mutex<Option<ThreadId>>,
}

/// Clears the owner marker even if the initializer panics
struct OwnerGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock_recovered() = None;
    }
}

impl<T> LazySlot<T> {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: OnceLock::new(),
            init: Mutex::new(()),
            owner: Mutex::new(None),
        }
    }

    pub(crate) fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.value.get().is_some()
    }

    pub(crate) fn get_or_try_init<F>(&self, init: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let current = thread::current().id();
        if *self.owner.lock_recovered() == Some(current) {
            return Err(Error::RecursiveResolution(self.name));
        }

        let _guard = self.init.lock_recovered();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        *self.owner.lock_recovered() = Some(current);
        let _owner = OwnerGuard(&self.owner);
        let value = init()?;
        Ok(self.value.get_or_init(|| value))
    }
}
