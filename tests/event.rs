//! Threaded tests for the `Event` primitive: blocking, timeouts, broadcast wakeup, and
//! re-arming.

use atomise::Event;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn wait_timeout_expires_after_roughly_the_timeout() {
    let event = Event::new();
    let begin = Instant::now();

    assert!(!event.wait_timeout(Duration::from_millis(100)));

    let elapsed = begin.elapsed();
    assert!(
        elapsed >= Duration::from_millis(100),
        "woke before the timeout: {:?}",
        elapsed
    );
    //generous upper bound, scheduling jitter can stretch the wait but not by seconds
    assert!(elapsed < Duration::from_secs(5), "woke far too late: {:?}", elapsed);
}

#[test]
fn wait_after_set_returns_immediately() {
    let event = Event::new();

    event.set();
    assert!(event.is_set());

    //must not block
    event.wait();
    assert!(event.wait_timeout(Duration::from_millis(0)));
}

#[test]
fn set_releases_every_waiter() {
    const WAITERS: usize = 8;

    let event = Arc::new(Event::new());
    let (ready_tx, ready_rx) = mpsc::channel();
    let mut waiters = Vec::new();

    for _ in 0..WAITERS {
        let event = event.clone();
        let ready = ready_tx.clone();
        waiters.push(thread::spawn(move || {
            ready.send(()).unwrap();
            event.wait();
        }));
    }

    for _ in 0..WAITERS {
        ready_rx.recv().unwrap();
    }
    //give the waiters a moment to actually park on the condvar
    thread::sleep(Duration::from_millis(50));

    event.set();

    for waiter in waiters {
        waiter.join().unwrap();
    }
}

#[test]
fn waiter_sees_set_from_another_thread() {
    let event = Arc::new(Event::new());

    let waiter = {
        let event = event.clone();
        thread::spawn(move || event.wait_timeout(Duration::from_secs(30)))
    };

    thread::sleep(Duration::from_millis(50));
    event.set();

    assert!(waiter.join().unwrap());
}

#[test]
fn reset_rearms_the_event() {
    let event = Event::new();

    event.set();
    assert!(event.wait_timeout(Duration::from_millis(10)));

    event.reset();
    assert!(!event.is_set());
    assert!(!event.wait_timeout(Duration::from_millis(10)));

    event.set();
    assert!(event.wait_timeout(Duration::from_millis(10)));
}

#[test]
fn reset_does_not_disturb_released_threads() {
    let event = Arc::new(Event::new());

    let waiter = {
        let event = event.clone();
        thread::spawn(move || {
            event.wait();
            //the release is already complete, a reset can't take it back
            true
        })
    };

    thread::sleep(Duration::from_millis(50));
    event.set();
    assert!(waiter.join().unwrap());

    event.reset();
    assert!(!event.is_set());
}

#[test]
fn set_is_idempotent_where_try_set_is_not() {
    let event = Event::new();

    assert!(event.try_set());
    assert!(!event.try_set());

    //setting an already-set event is a quiet no-op
    event.set();
    assert!(event.is_set());

    event.reset();
    assert!(event.try_set());
}

#[test]
fn racing_try_set_has_one_winner() {
    let event = Arc::new(Event::new());
    let mut callers = Vec::new();

    for _ in 0..8 {
        let event = event.clone();
        callers.push(thread::spawn(move || event.try_set()));
    }

    let winners = callers
        .into_iter()
        .map(|c| c.join().unwrap())
        .filter(|&won| won)
        .count();

    assert_eq!(winners, 1);
    assert!(event.is_set());
}

#[test]
fn default_starts_unset() {
    let event = Event::default();

    assert!(!event.is_set());
    assert!(!event.wait_timeout(Duration::from_millis(10)));
}
