//! A one-shot "event" primitive, allowing threads to wait on a signal from another thread.
//!
//! The primary type in this module is the [`Event`] struct. See its documentation for further
//! information.
//!
//! [`Event`]: struct.Event.html

use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::util;

/// A synchronization primitive that releases every waiting thread once it is set, and stays set
/// until it is reset.
///
/// An `Event` starts out unset. Threads that call [`wait`] block until another thread calls
/// [`set`], which releases all of them in one shot. Once set, the event remains set: later calls
/// to [`wait`] return immediately without blocking, until someone re-arms the event with
/// [`reset`]. Re-arming does not affect threads that were already released.
///
/// `Event` is the classic kernel-style manual-reset event, as in
/// [Win32's `CreateEvent`][src-link] with `bManualReset` set.
///
/// [src-link]: https://learn.microsoft.com/en-us/windows/win32/api/synchapi/nf-synchapi-createeventa
///
/// [`wait`]: #method.wait
/// [`set`]: #method.set
/// [`reset`]: #method.reset
///
/// # Example
///
/// The following example uses an `Event` as a start gate: none of the workers begin until the
/// coordinator fires the signal, at which point all of them are released together.
///
/// ```
/// use atomise::Event;
/// use std::sync::Arc;
/// use std::thread;
///
/// let start = Arc::new(Event::new());
/// let mut workers = Vec::new();
///
/// for i in 0..5 {
///     let start = start.clone();
///     workers.push(thread::spawn(move || {
///         //everyone blocks here until the coordinator calls set()
///         start.wait();
///         println!("worker {} released!", i);
///     }));
/// }
///
/// start.set();
///
/// for worker in workers {
///     worker.join().unwrap();
/// }
///
/// println!("all done!");
/// ```
pub struct Event {
    signaled: Mutex<bool>,
    cond: Condvar,
}

impl Event {
    ///Creates a new `Event` in the unset state.
    pub fn new() -> Event {
        Event {
            signaled: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    ///Returns whether the event is currently set.
    pub fn is_set(&self) -> bool {
        *util::unpoison(self.signaled.lock())
    }

    ///Sets the event, releasing every thread currently blocked in [`wait`].
    ///
    ///Setting an event that is already set has no effect. Threads that call [`wait`] after this
    ///returns are not blocked until the event is re-armed with [`reset`].
    ///
    ///[`wait`]: #method.wait
    ///[`reset`]: #method.reset
    pub fn set(&self) {
        let mut signaled = util::unpoison(self.signaled.lock());

        if !*signaled {
            *signaled = true;
            self.cond.notify_all();
        }
    }

    ///Sets the event only if it is currently unset, releasing every waiting thread when it does.
    ///
    ///Returns whether this call performed the transition. Unlike [`set`], which doesn't care
    ///whether the event was already set, out of any number of threads racing `try_set` on an
    ///unset event exactly one gets `true` back.
    ///
    ///[`set`]: #method.set
    pub fn try_set(&self) -> bool {
        let mut signaled = util::unpoison(self.signaled.lock());

        if *signaled {
            false
        } else {
            *signaled = true;
            self.cond.notify_all();
            true
        }
    }

    ///Re-arms the event, so that threads calling [`wait`] block again.
    ///
    ///Threads already released by an earlier [`set`] are unaffected. Resetting an event that is
    ///not set has no effect.
    ///
    ///[`wait`]: #method.wait
    ///[`set`]: #method.set
    pub fn reset(&self) {
        *util::unpoison(self.signaled.lock()) = false;
    }

    ///Blocks the current thread until the event is set.
    ///
    ///If the event is already set, this function returns immediately without blocking. Spurious
    ///condition-variable wakeups are absorbed internally; the call only returns once the event
    ///was actually set.
    pub fn wait(&self) {
        let mut signaled = util::unpoison(self.signaled.lock());

        //loop the wait in case we spuriously wake up
        while !*signaled {
            signaled = util::unpoison(self.cond.wait(signaled));
        }
    }

    ///Blocks the current thread until the event is set, or until the given timeout elapses,
    ///returning whether the event was set in time.
    ///
    ///If the event is already set, this function returns `true` immediately. Otherwise it blocks
    ///for roughly no longer than `timeout` - the deadline is fixed once on entry, so a spurious
    ///wakeup re-waits for the remaining time rather than restarting the clock. OS scheduling can
    ///extend the wait slightly past the timeout, never shorten it.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        //a timeout too far out to represent can't elapse before the process ends
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait();
                return true;
            }
        };

        let mut signaled = util::unpoison(self.signaled.lock());

        while !*signaled {
            let now = Instant::now();

            if now >= deadline {
                return false;
            }

            let (guard, _status) =
                util::unpoison(self.cond.wait_timeout(signaled, deadline - now));
            signaled = guard;
        }

        true
    }
}

impl Default for Event {
    ///Creates a new `Event` in the unset state.
    fn default() -> Event {
        Event::new()
    }
}
