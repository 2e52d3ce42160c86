//! An atomically-updated boolean flag.
//!
//! The primary type in this module is the [`AtomicFlag`] struct. See its documentation for
//! further information.
//!
//! [`AtomicFlag`]: struct.AtomicFlag.html

/// A boolean value that can be read and updated atomically.
///
/// Reads and writes are thread-safe and guaranteed to succeed: a write made by one thread is
/// visible to every later read on any thread, and all threads observe the same order of updates.
///
/// Beyond plain [`get`]/[`set`], the flag offers the one-shot transitions [`make_true`] and
/// [`make_false`]: conditional compare-and-swaps that report whether *this call* changed the
/// value. Out of any number of threads racing one of them, exactly one observes `true`, which
/// makes the flag usable as a "has this happened yet" latch without any extra locking.
///
/// By default the flag sits directly on [`std::sync::atomic::AtomicBool`] with sequentially
/// consistent ordering; building the crate with `--no-default-features` switches to a
/// mutex-protected backing with the same observable behavior.
///
/// [`get`]: #method.get
/// [`set`]: #method.set
/// [`make_true`]: #method.make_true
/// [`make_false`]: #method.make_false
///
/// # Example
///
/// The following example uses an `AtomicFlag` to let several workers race to claim a one-time
/// initialization step. Exactly one of them wins the `make_true` transition and performs the
/// setup; the others see `false` and skip it.
///
/// ```
/// use atomise::AtomicFlag;
/// use std::sync::Arc;
/// use std::thread;
///
/// let initialized = Arc::new(AtomicFlag::new(false));
/// let mut workers = Vec::new();
///
/// for i in 0..4 {
///     let initialized = initialized.clone();
///     workers.push(thread::spawn(move || {
///         if initialized.make_true() {
///             println!("worker {} ran the setup!", i);
///         }
///     }));
/// }
///
/// for worker in workers {
///     worker.join().unwrap();
/// }
///
/// assert!(initialized.is_true());
/// ```
pub struct AtomicFlag {
    value: imp::Flag,
}

impl AtomicFlag {
    ///Creates a new `AtomicFlag` with the given initial value.
    pub fn new(value: bool) -> AtomicFlag {
        AtomicFlag {
            value: imp::Flag::new(value),
        }
    }

    ///Returns the current value.
    pub fn get(&self) -> bool {
        self.value.get()
    }

    ///Unconditionally stores the given value.
    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    ///Returns `true` if the current value is `true`.
    pub fn is_true(&self) -> bool {
        self.get()
    }

    ///Returns `true` if the current value is `false`.
    pub fn is_false(&self) -> bool {
        !self.get()
    }

    ///Sets the value to `true` if it is currently `false`.
    ///
    ///Returns whether this call changed the value. Calling `make_true` on a flag that is already
    ///`true` leaves it alone and returns `false`.
    pub fn make_true(&self) -> bool {
        self.value.compare_and_set(false, true)
    }

    ///Sets the value to `false` if it is currently `true`.
    ///
    ///Returns whether this call changed the value. Calling `make_false` on a flag that is
    ///already `false` leaves it alone and returns `false`.
    pub fn make_false(&self) -> bool {
        self.value.compare_and_set(true, false)
    }
}

impl Default for AtomicFlag {
    ///Creates an `AtomicFlag` with the value `false`.
    fn default() -> AtomicFlag {
        AtomicFlag::new(false)
    }
}

#[cfg(feature = "lock-free")]
use self::native as imp;
#[cfg(not(feature = "lock-free"))]
use self::fallback as imp;

#[cfg(feature = "lock-free")]
mod native {
    use std::sync::atomic::{AtomicBool, Ordering};

    pub struct Flag(AtomicBool);

    impl Flag {
        pub fn new(value: bool) -> Flag {
            Flag(AtomicBool::new(value))
        }

        pub fn get(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }

        pub fn set(&self, value: bool) {
            self.0.store(value, Ordering::SeqCst);
        }

        pub fn compare_and_set(&self, expect: bool, update: bool) -> bool {
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

    pub struct Flag(Mutex<bool>);

    impl Flag {
        pub fn new(value: bool) -> Flag {
            Flag(Mutex::new(value))
        }

        pub fn get(&self) -> bool {
            *util::unpoison(self.0.lock())
        }

        pub fn set(&self, value: bool) {
            *util::unpoison(self.0.lock()) = value;
        }

        pub fn compare_and_set(&self, expect: bool, update: bool) -> bool {
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
