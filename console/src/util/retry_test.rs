use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;

#[test]
fn success_on_first_attempt_does_not_sleep() {
    let calls = Cell::new(0);
    let slept = Cell::new(false);
    let result: Result<u32, &str> = block_on(retry_once(
        || {
            calls.set(calls.get() + 1);
            async { Ok(7) }
        },
        NOTIFICATION_RETRY_DELAY,
        |_| {
            slept.set(true);
            async {}
        },
    ));
    assert_eq!(result, Ok(7));
    assert_eq!(calls.get(), 1);
    assert!(!slept.get());
}

#[test]
fn failure_retries_once_after_delay() {
    let calls = Cell::new(0);
    let delays = RefCell::new(Vec::new());
    let result: Result<u32, String> = block_on(retry_once(
        || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move { if attempt == 1 { Err("offline".to_owned()) } else { Ok(3) } }
        },
        Duration::from_secs(2),
        |d| {
            delays.borrow_mut().push(d);
            async {}
        },
    ));
    assert_eq!(result, Ok(3));
    assert_eq!(calls.get(), 2);
    assert_eq!(*delays.borrow(), vec![Duration::from_secs(2)]);
}

#[test]
fn second_failure_is_returned_without_third_attempt() {
    let calls = Cell::new(0);
    let result: Result<(), String> = block_on(retry_once(
        || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move { Err(format!("attempt {attempt}")) }
        },
        Duration::ZERO,
        |_| async {},
    ));
    assert_eq!(result, Err("attempt 2".to_owned()));
    assert_eq!(calls.get(), 2);
}

#[test]
fn retry_delay_is_two_seconds() {
    assert_eq!(NOTIFICATION_RETRY_DELAY, Duration::from_secs(2));
}
