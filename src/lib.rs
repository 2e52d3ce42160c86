//! A collection of atomic primitives that build on the synchronization pieces available in the
//! standard library.
//!
//! This library contains the following special-purpose primitives:
//!
//! * [`AtomicRef`], a cell that holds a shared reference and can swap it atomically, including by
//!   compare-and-set on the handle's identity.
//! * [`AtomicFlag`], a boolean flag with one-shot `make_true`/`make_false` transitions.
//! * [`AtomicCounter`], a signed 64-bit counter with fetch-and-add style updates.
//! * [`Event`], a one-shot signal that releases every waiting thread at once and can be re-armed.
//!
//! The primitives are independent of each other, but compose naturally: a typical pattern is an
//! [`Event`] announcing that work tracked by an [`AtomicCounter`] has completed.
//!
//! All operations are sequentially consistent: every thread observes the same global order of
//! updates. By default the flag and the counter sit directly on the standard library's atomic
//! types; building with `--no-default-features` swaps in a mutex-protected backing with the same
//! observable behavior, for targets whose instruction set offers no native compare-and-swap.
//!
//! [`AtomicRef`]: struct.AtomicRef.html
//! [`AtomicFlag`]: struct.AtomicFlag.html
//! [`AtomicCounter`]: struct.AtomicCounter.html
//! [`Event`]: struct.Event.html

#![deny(missing_docs)]

#[cfg(all(
    feature = "lock-free",
    not(all(target_has_atomic = "8", target_has_atomic = "64"))
))]
compile_error!(
    "the `lock-free` feature needs native 8-bit and 64-bit atomics on the target; \
     build with `--no-default-features` to select the mutex backing instead"
);

mod cell;
mod counter;
mod event;
mod flag;
mod util;

pub use crate::cell::{AtomicRef, ConcurrentUpdateError};
pub use crate::counter::AtomicCounter;
pub use crate::event::Event;
pub use crate::flag::AtomicFlag;
