//! An atomically-swappable reference cell.
//!
//! The primary type in this module is the [`AtomicRef`] struct. See its documentation for
//! further information.
//!
//! [`AtomicRef`]: struct.AtomicRef.html

use std::mem;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::util;

/// A cell that holds a shared reference and can swap it atomically.
///
/// The cell stores an [`Arc`] handle and shares ownership of the value it points at: [`get`]
/// hands out another handle to the same allocation, and the allocation stays alive for as long
/// as any handle does, whether the cell has moved on or not. A write made by one thread is
/// visible to every later read on any thread.
///
/// [`compare_and_set`] compares *handles*, using [`Arc::ptr_eq`]: two handles are equal only
/// when they point at the same allocation. Handles built separately from structurally equal
/// values are still distinct identities, so a compare against a lookalike fails. Callers that
/// want compare-and-set need to hold on to the handle they read, typically from [`get`] or
/// [`get_and_set`].
///
/// Unlike [`AtomicFlag`] and [`AtomicCounter`], the reference cell is backed by a mutex under
/// every build configuration: no machine compare-and-swap can update the pointer and its
/// reference count in a single indivisible step. The critical sections are a few instructions
/// long, never nest, and never run caller code, so every operation still completes in bounded
/// time.
///
/// [`get`]: #method.get
/// [`get_and_set`]: #method.get_and_set
/// [`compare_and_set`]: #method.compare_and_set
/// [`AtomicFlag`]: struct.AtomicFlag.html
/// [`AtomicCounter`]: struct.AtomicCounter.html
///
/// # Example
///
/// The following example publishes a replacement configuration to a set of running workers.
/// Readers that already took a snapshot keep using it; readers that come back to the cell see
/// the new value.
///
/// ```
/// use atomise::AtomicRef;
/// use std::sync::Arc;
/// use std::thread;
///
/// struct Config {
///     level: u32,
/// }
///
/// let config = Arc::new(AtomicRef::new(Arc::new(Config { level: 1 })));
/// let mut workers = Vec::new();
///
/// for _ in 0..4 {
///     let config = config.clone();
///     workers.push(thread::spawn(move || {
///         //a snapshot stays valid for as long as the worker holds it
///         let snapshot = config.get();
///         snapshot.level
///     }));
/// }
///
/// config.set(Arc::new(Config { level: 2 }));
///
/// for worker in workers {
///     let level = worker.join().unwrap();
///     assert!(level == 1 || level == 2);
/// }
///
/// assert_eq!(config.get().level, 2);
/// ```
pub struct AtomicRef<T> {
    value: Mutex<Arc<T>>,
}

impl<T> AtomicRef<T> {
    ///Creates a new cell holding the given value.
    pub fn new(value: Arc<T>) -> AtomicRef<T> {
        AtomicRef {
            value: Mutex::new(value),
        }
    }

    ///Returns a handle to the current value.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&util::unpoison(self.value.lock()))
    }

    ///Unconditionally stores the given value.
    pub fn set(&self, value: Arc<T>) {
        *util::unpoison(self.value.lock()) = value;
    }

    ///Stores the given value and returns the handle it replaced, in one indivisible step.
    ///
    ///Swapping in the handle the cell already holds is a valid no-op: the "previous" and the
    ///stored value are then the same handle.
    pub fn get_and_set(&self, value: Arc<T>) -> Arc<T> {
        mem::replace(&mut *util::unpoison(self.value.lock()), value)
    }

    ///Stores `update` if the current value is the same handle as `expect`, returning whether
    ///the store happened.
    ///
    ///The comparison is by identity ([`Arc::ptr_eq`]), never by the pointed-at value. This is a
    ///single attempt, not a retry loop: if another thread swapped the cell between the caller's
    ///read and this call, the cell is left alone, `update` is dropped, and `false` comes back.
    ///Callers that want to retry can loop themselves, or use [`update`].
    ///
    ///[`update`]: #method.update
    pub fn compare_and_set(&self, expect: &Arc<T>, update: Arc<T>) -> bool {
        let mut value = util::unpoison(self.value.lock());

        if Arc::ptr_eq(&value, expect) {
            *value = update;
            true
        } else {
            false
        }
    }

    ///Replaces the value with the result of the given closure, retrying until the replacement
    ///wins, and returns the handle that was stored.
    ///
    ///The closure runs outside the cell's lock, receives the value current at the time of the
    ///attempt, and runs again whenever another thread swapped the cell in the meantime - so it
    ///may be called more than once, and should be free of side effects.
    pub fn update<F>(&self, mut f: F) -> Arc<T>
    where
        F: FnMut(&T) -> T,
    {
        let mut current = self.get();

        loop {
            let next = Arc::new(f(&current));

            if self.compare_and_set(&current, Arc::clone(&next)) {
                return next;
            }

            current = self.get();
        }
    }

    ///Replaces the value with the result of the given closure, giving up if another thread got
    ///there first.
    ///
    ///This is the single-attempt form of [`update`]: the closure runs exactly once, and if the
    ///handle read at entry was already replaced by the time of the swap, the cell is left alone
    ///and [`ConcurrentUpdateError`] comes back.
    ///
    ///[`update`]: #method.update
    ///[`ConcurrentUpdateError`]: struct.ConcurrentUpdateError.html
    pub fn try_update<F>(&self, f: F) -> Result<Arc<T>, ConcurrentUpdateError>
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get();
        let next = Arc::new(f(&current));

        if self.compare_and_set(&current, Arc::clone(&next)) {
            Ok(next)
        } else {
            Err(ConcurrentUpdateError)
        }
    }
}

///The error returned by [`AtomicRef::try_update`] when another thread replaced the value
///between the read and the swap.
///
///[`AtomicRef::try_update`]: struct.AtomicRef.html#method.try_update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the value was replaced concurrently")]
pub struct ConcurrentUpdateError;
