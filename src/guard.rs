//! Shared resource guard
//!
//! Binary mutual exclusion around a single output device. Acquiring hands
//! back an RAII guard; dropping it releases the resource and wakes one
//! waiter, so every successful acquire is matched by exactly one release.

use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

use crate::error::Error;
use crate::types::Timeout;

/// Mutual-exclusion wrapper owning the protected resource
pub struct SharedResourceGuard<M: RawMutex, T> {
    inner: Mutex<M, T>,
}

/// Proof of exclusive access; the resource is released on drop
pub struct ResourceGuard<'a, M: RawMutex, T> {
    owner: &'a SharedResourceGuard<M, T>,
    held: MutexGuard<'a, M, T>,
}

impl<M: RawMutex, T> Deref for ResourceGuard<'_, M, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.held
    }
}

impl<M: RawMutex, T> DerefMut for ResourceGuard<'_, M, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.held
    }
}

impl<M: RawMutex, T> SharedResourceGuard<M, T> {
    /// Create a guard in the free state
    pub const fn new(resource: T) -> Self {
        Self {
            inner: Mutex::new(resource),
        }
    }

    /// Block until the resource is free or `timeout` elapses.
    ///
    /// Waiters are served in the order the executor polls them, not
    /// strictly in arrival order.
    pub async fn acquire(&self, timeout: Timeout) -> Result<ResourceGuard<'_, M, T>, Error> {
        let held = timeout
            .bound(self.inner.lock())
            .await
            .map_err(|_| Error::ResourceUnavailable)?;
        Ok(ResourceGuard { owner: self, held })
    }

    /// Take the resource only if it is free right now
    pub fn try_acquire(&self) -> Result<ResourceGuard<'_, M, T>, Error> {
        let held = self
            .inner
            .try_lock()
            .map_err(|_| Error::ResourceUnavailable)?;
        Ok(ResourceGuard { owner: self, held })
    }

    /// Give the resource back and wake one waiter.
    ///
    /// `held` must come from this guard; handing in another guard's access
    /// is a logic error caught in debug builds.
    pub fn release(&self, held: ResourceGuard<'_, M, T>) {
        debug_assert!(
            core::ptr::eq(held.owner, self),
            "released a resource through the wrong guard"
        );
        drop(held);
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn release_on_drop_frees_the_resource() {
        let guard = SharedResourceGuard::<NoopRawMutex, u32>::new(0);
        {
            let mut held = block_on(guard.acquire(Timeout::Forever)).unwrap();
            *held += 1;
            assert_eq!(guard.try_acquire().err(), Some(Error::ResourceUnavailable));
        }
        let held = guard.try_acquire().unwrap();
        assert_eq!(*held, 1);
        guard.release(held);
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "wrong guard")]
    fn release_through_another_guard_is_rejected() {
        let a = SharedResourceGuard::<NoopRawMutex, u32>::new(0);
        let b = SharedResourceGuard::<NoopRawMutex, u32>::new(0);
        let held_b = b.try_acquire().unwrap();
        a.release(held_b);
    }

    #[test]
    fn into_inner_returns_the_resource() {
        let guard = SharedResourceGuard::<NoopRawMutex, u32>::new(5);
        *guard.try_acquire().unwrap() += 2;
        assert_eq!(guard.into_inner(), 7);
    }
}
