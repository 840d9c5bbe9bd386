use fluentis::{Executor, ExecutorHandle, Pool, Task, inline, ready, spawn};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

fn counting(pool: &Pool, counter: &Arc<AtomicUsize>) -> ExecutorHandle {
    let inner = pool.handle();
    let counter = counter.clone();

    Arc::new(move |task: Task| {
        counter.fetch_add(1, Ordering::SeqCst);
        inner.execute(task);
    })
}

#[test]
fn test_reduction_value_to_value() {
    let pool = Pool::new(2);
    let d = pool.handle();
    let inner_exec = d.clone();

    let sut = spawn(d, || 42).then(move |x| spawn(inner_exec, move || x + 42));

    assert!(sut.wait_for(Duration::from_secs(5)));
    assert_eq!(sut.try_get(), Ok(Some(84)));
}

#[test]
fn test_reduction_unit_to_unit() {
    let pool = Pool::new(2);
    let d = pool.handle();
    let inner_exec = d.clone();
    let first = Arc::new(AtomicBool::new(false));
    let second = Arc::new(AtomicBool::new(false));
    let first_task = first.clone();
    let second_task = second.clone();

    let sut = spawn(d, move || {
        first_task.store(true, Ordering::SeqCst);
    })
    .then(move |_| {
        spawn(inner_exec, move || {
            second_task.store(true, Ordering::SeqCst);
        })
    });

    assert!(sut.wait_for(Duration::from_secs(5)));
    assert!(first.load(Ordering::SeqCst));
    assert!(second.load(Ordering::SeqCst));
}

#[test]
fn test_reduction_unit_to_value() {
    let pool = Pool::new(2);
    let d = pool.handle();
    let inner_exec = d.clone();
    let first = Arc::new(AtomicBool::new(false));
    let first_task = first.clone();

    let sut = spawn(d, move || {
        first_task.store(true, Ordering::SeqCst);
    })
    .then(move |_| spawn(inner_exec, || 42));

    assert!(sut.wait_for(Duration::from_secs(5)));
    assert!(first.load(Ordering::SeqCst));
    assert_eq!(sut.try_get(), Ok(Some(42)));
}

#[test]
fn test_reduction_matches_plain_continuation() {
    let pool = Pool::new(2);

    let reduced = spawn(pool.handle(), || 21).then(|x| ready(x * 2, inline()));
    let plain = spawn(pool.handle(), || 21).map(|x| x * 2);

    reduced.wait();
    plain.wait();
    assert_eq!(reduced.try_get(), plain.try_get());
    assert_eq!(reduced.try_get(), Ok(Some(42)));
}

#[test]
fn test_flatten() {
    let pool = Pool::new(2);
    let inner_exec = pool.handle();

    let nested = spawn(pool.handle(), || 42).map(move |x| spawn(inner_exec, move || x + 1));
    let sut = nested.flatten();

    assert!(sut.wait_for(Duration::from_secs(5)));
    assert_eq!(sut.try_get(), Ok(Some(43)));
}

#[test]
fn test_reduction_inner_on_second_executor() {
    let pool = Pool::new(2);
    let used0 = Arc::new(AtomicUsize::new(0));
    let used1 = Arc::new(AtomicUsize::new(0));
    let s0 = counting(&pool, &used0);
    let s1 = counting(&pool, &used1);

    let sut = spawn(s0, || 1).then(move |x| spawn(s1, move || x + 1));

    assert!(sut.wait_for(Duration::from_secs(5)));
    assert_eq!(sut.try_get(), Ok(Some(2)));
    assert!(used0.load(Ordering::SeqCst) >= 1);
    assert!(used1.load(Ordering::SeqCst) >= 1);
}
