//! Some utility functions that don't need to be part of the public release.

use std::sync::LockResult;

//Unwrap a LockResult to get the guard even when the mutex is poisoned.
//
//None of the primitives hold their lock across caller code, so a panic on
//another thread can never leave the protected state half-written; the poison
//flag carries nothing worth surfacing.
pub fn unpoison<T>(res: LockResult<T>) -> T {
    match res {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}
