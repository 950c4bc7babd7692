//! Poison recovery extension trait for std::sync::Mutex
//!
//! A configuration constructor that panics poisons the lock guarding its
//! slot. The slot itself is still unset, so recovering the guard is safe.

use std::sync::{Mutex, MutexGuard};

/// Extension trait for Mutex with poison recovery
pub trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
