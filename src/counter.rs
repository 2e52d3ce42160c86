//! An atomically-updated signed integer counter.
//!
//! The primary type in this module is the [`AtomicCounter`] struct. See its documentation for
//! further information.
//!
//! [`AtomicCounter`]: struct.AtomicCounter.html

/// A signed 64-bit counter that can be read and updated atomically.
///
/// Reads and writes are thread-safe and guaranteed to succeed: a write made by one thread is
/// visible to every later read on any thread, and all threads observe the same order of updates.
///
/// The arithmetic operations are fetch-and-add style: [`add`], [`subtract`], [`increment`] and
/// [`decrement`] each apply their whole read-modify-write in one indivisible step and return the
/// value after the update, so concurrent updates are never lost. [`compare_and_set`] is a single
/// attempt with no retry loop; [`update`] is the retrying form, for when the new value is
/// computed from the old one.
///
/// By default the counter sits directly on [`std::sync::atomic::AtomicI64`] with sequentially
/// consistent ordering; building the crate with `--no-default-features` switches to a
/// mutex-protected backing with the same observable behavior.
///
/// [`add`]: #method.add
/// [`subtract`]: #method.subtract
/// [`increment`]: #method.increment
/// [`decrement`]: #method.decrement
/// [`compare_and_set`]: #method.compare_and_set
/// [`update`]: #method.update
///
/// # Example
///
/// The following example counts completed units of work across several threads. Because the
/// increments are atomic, the final tally is exact no matter how the threads interleave.
///
/// ```
/// use atomise::AtomicCounter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let completed = Arc::new(AtomicCounter::new(0));
/// let mut workers = Vec::new();
///
/// for _ in 0..4 {
///     let completed = completed.clone();
///     workers.push(thread::spawn(move || {
///         for _ in 0..100 {
///             //do a unit of work, then record it
///             completed.increment();
///         }
///     }));
/// }
///
/// for worker in workers {
///     worker.join().unwrap();
/// }
///
/// assert_eq!(completed.get(), 400);
/// ```
pub struct AtomicCounter {
    value: imp::Counter,
}

impl AtomicCounter {
    ///Creates a new `AtomicCounter` with the given initial value.
    pub fn new(value: i64) -> AtomicCounter {
        AtomicCounter {
            value: imp::Counter::new(value),
        }
    }

    ///Returns the current value.
    pub fn get(&self) -> i64 {
        self.value.get()
    }

    ///Unconditionally stores the given value.
    pub fn set(&self, value: i64) {
        self.value.set(value);
    }

    ///Atomically adds the given amount to the counter, returning the value after the addition.
    ///
    ///The addition wraps around on overflow.
    pub fn add(&self, delta: i64) -> i64 {
        self.value.add(delta)
    }

    ///Atomically subtracts the given amount from the counter, returning the value after the
    ///subtraction.
    ///
    ///The subtraction wraps around on overflow.
    pub fn subtract(&self, delta: i64) -> i64 {
        self.value.add(delta.wrapping_neg())
    }

    ///Adds one to the counter, returning the value after the addition.
    ///
    ///See [`add`] for the overflow behavior.
    ///
    ///[`add`]: #method.add
    pub fn increment(&self) -> i64 {
        self.add(1)
    }

    ///Subtracts one from the counter, returning the value after the subtraction.
    ///
    ///See [`subtract`] for the overflow behavior.
    ///
    ///[`subtract`]: #method.subtract
    pub fn decrement(&self) -> i64 {
        self.subtract(1)
    }

    ///Stores `update` if the current value equals `expect`, returning whether the store
    ///happened.
    ///
    ///This is a single attempt, not a retry loop: if another thread changed the value between
    ///the caller's read and this call, the counter is left alone and `false` comes back. Callers
    ///that want to retry can loop themselves, or use [`update`].
    ///
    ///[`update`]: #method.update
    pub fn compare_and_set(&self, expect: i64, update: i64) -> bool {
        self.value.compare_and_set(expect, update)
    }

    ///Replaces the value with the result of the given closure, retrying until the replacement
    ///wins, and returns the value that was stored.
    ///
    ///The closure runs outside any lock, receives the value current at the time of the attempt,
    ///and runs again whenever another thread changed the counter in the meantime - so it may be
    ///called more than once, and should be free of side effects.
    pub fn update<F>(&self, mut f: F) -> i64
    where
        F: FnMut(i64) -> i64,
    {
        let mut current = self.get();

        loop {
            let next = f(current);

            if self.compare_and_set(current, next) {
                return next;
            }

            current = self.get();
        }
    }
}

impl Default for AtomicCounter {
    ///Creates an `AtomicCounter` with the value `0`.
    fn default() -> AtomicCounter {
        AtomicCounter::new(0)
    }
}

#[cfg(feature = "lock-free")]
use self::native as imp;
#[cfg(not(feature = "lock-free"))]
use self::fallback as imp;

#[cfg(feature = "lock-free")]
mod native {
    use std::sync::atomic::{AtomicI64, Ordering};

    pub struct Counter(AtomicI64);

    impl Counter {
        pub fn new(value: i64) -> Counter {
            Counter(AtomicI64::new(value))
        }

        pub fn get(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }

        pub fn set(&self, value: i64) {
            self.0.store(value, Ordering::SeqCst);
        }

        pub fn add(&self, delta: i64) -> i64 {
            self.0.fetch_add(delta, Ordering::SeqCst).wrapping_add(delta)
        }

        pub fn compare_and_set(&self, expect: i64, update: i64) -> bool {
            self.0
                .compare_exchange(expect, update, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        }
    }
}

#[cfg(not(feature = "lock-free"))]
mod fallback {
    use std::sync::Mutex;

    use crate::util;

    pub struct Counter(Mutex<i64>);

    impl Counter {
        pub fn new(value: i64) -> Counter {
            Counter(Mutex::new(value))
        }

        pub fn get(&self) -> i64 {
            *util::unpoison(self.0.lock())
        }

        pub fn set(&self, value: i64) {
            *util::unpoison(self.0.lock()) = value;
        }

        //the lock is held across the whole read-modify-write, so concurrent adds can't lose
        //each other's updates
        pub fn add(&self, delta: i64) -> i64 {
            let mut value = util::unpoison(self.0.lock());

            *value = value.wrapping_add(delta);
            *value
        }

        pub fn compare_and_set(&self, expect: i64, update: i64) -> bool {
            let mut value = util::unpoison(self.0.lock());

            if *value == expect {
                *value = update;
                true
            } else {
                false
            }
        }
    }
}
