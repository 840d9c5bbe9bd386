use fluentis::{Pool, spawn};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
#[allow(dead_code)]
struct MoveOnly {
    member: i32,
}

#[test]
fn test_detached_task_completes() {
    let pool = Pool::new(1);
    let done = Arc::new(AtomicBool::new(false));

    {
        let done = done.clone();
        spawn(pool.handle(), move || {
            done.store(true, Ordering::SeqCst);
            42
        })
        .detach();
    }

    while !done.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_detached_move_only_task_completes() {
    let pool = Pool::new(1);
    let done = Arc::new(AtomicBool::new(false));

    {
        let done = done.clone();
        spawn(pool.handle(), move || {
            done.store(true, Ordering::SeqCst);
            MoveOnly { member: 42 }
        })
        .detach();
    }

    while !done.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_detached_failure_is_swallowed() {
    let pool = Pool::new(1);
    let entered = Arc::new(AtomicBool::new(false));

    {
        let entered = entered.clone();
        spawn(pool.handle(), move || {
            entered.store(true, Ordering::SeqCst);
            panic!("failure");
        })
        .detach();
    }

    while !entered.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }

    // the pool is still usable afterwards
    let sut = spawn(pool.handle(), || 1);
    sut.wait();
    assert_eq!(sut.try_get(), Ok(Some(1)));
}

#[test]
fn test_dropped_handle_does_not_cancel_the_task() {
    let pool = Pool::new(1);
    let done = Arc::new(AtomicBool::new(false));

    {
        let done = done.clone();
        drop(spawn(pool.handle(), move || {
            done.store(true, Ordering::SeqCst);
        }));
    }

    while !done.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }
}
