//! Sharing a chain between execution contexts
//!
//! A flush touches both the bus and the buffer, so when interrupt handlers
//! or other cores also reach the chain every access has to run as a critical
//! section. [`SharedChain`] holds the driver behind a
//! `critical_section::Mutex` so it can live in a `static`.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::chain::ShiftRegisterChain;

/// A chain slot guarded by a critical section
pub struct SharedChain<S, L, const N: usize = 32> {
    inner: Mutex<RefCell<Option<ShiftRegisterChain<S, L, N>>>>,
}

impl<S, L, const N: usize> SharedChain<S, L, N> {
    /// An empty slot, usable in a `static` initializer
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put `chain` in the slot, returning whatever was there before.
    pub fn install(
        &self,
        chain: ShiftRegisterChain<S, L, N>,
    ) -> Option<ShiftRegisterChain<S, L, N>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(chain))
    }

    /// Take the chain out of the slot.
    pub fn take(&self) -> Option<ShiftRegisterChain<S, L, N>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the chain inside a critical section.
    ///
    /// Returns `None` if no chain is installed.
    pub fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut ShiftRegisterChain<S, L, N>) -> R,
    {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<S, L, const N: usize> Default for SharedChain<S, L, N> {
    fn default() -> Self {
        Self::new()
    }
}
