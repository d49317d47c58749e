use super::*;

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn defer_runs_immediately_when_unlocked() {
    let lock = InteractionLock::new();
    let log = recorder();
    {
        let log = Rc::clone(&log);
        lock.defer(move || log.borrow_mut().push("now".into()));
    }
    assert_eq!(log.borrow().as_slice(), &["now".to_string()]);
    assert_eq!(lock.pending_tasks(), 0);
}

#[test]
fn ten_deferred_tasks_run_once_in_order_after_unlock() {
    let lock = InteractionLock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    lock.lock();
    for index in 0..10 {
        let order = Rc::clone(&order);
        lock.defer(move || order.borrow_mut().push(index));
    }
    assert!(order.borrow().is_empty());
    assert_eq!(lock.pending_tasks(), 10);

    lock.unlock();
    assert_eq!(*order.borrow(), (0..10).collect::<Vec<_>>());
    assert_eq!(lock.pending_tasks(), 0);

    lock.lock();
    lock.unlock();
    assert_eq!(order.borrow().len(), 10);
}

#[test]
fn lock_is_idempotent_and_notifies_on_transitions() {
    let lock = InteractionLock::new();
    let states = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let states = Rc::clone(&states);
        lock.subscribe(move |locked| states.borrow_mut().push(locked))
    };

    lock.lock();
    lock.lock();
    assert!(lock.is_locked());
    lock.unlock();
    assert!(!lock.is_locked());
    assert_eq!(*states.borrow(), vec![true, false]);
}

#[test]
fn subscribers_hear_unlock_after_the_flush() {
    let lock = InteractionLock::new();
    let log = recorder();
    let _subscription = {
        let log = Rc::clone(&log);
        lock.subscribe(move |locked| log.borrow_mut().push(format!("locked={locked}")))
    };
    lock.lock();
    {
        let log = Rc::clone(&log);
        lock.defer(move || log.borrow_mut().push("task".into()));
    }
    lock.unlock();
    assert_eq!(
        *log.borrow(),
        vec!["locked=true".to_string(), "task".into(), "locked=false".into()]
    );
}

#[test]
fn dropped_subscription_stops_notifications() {
    let lock = InteractionLock::new();
    let count = Rc::new(Cell::new(0));
    let subscription = {
        let count = Rc::clone(&count);
        lock.subscribe(move |_| count.set(count.get() + 1))
    };
    lock.lock();
    drop(subscription);
    lock.unlock();
    assert_eq!(count.get(), 1);

    let subscription = {
        let count = Rc::clone(&count);
        lock.subscribe(move |_| count.set(count.get() + 1))
    };
    subscription.unsubscribe();
    lock.lock();
    assert_eq!(count.get(), 1);
    lock.unlock();
}

#[test]
fn failing_tasks_do_not_stop_the_batch() {
    let lock = InteractionLock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    lock.lock();
    {
        let order = Rc::clone(&order);
        lock.defer(move || order.borrow_mut().push(1));
    }
    lock.try_defer(|| Err(TaskError::new("mutation rejected")));
    lock.defer(|| panic!("task blew up"));
    {
        let order = Rc::clone(&order);
        lock.try_defer(move || {
            order.borrow_mut().push(4);
            Ok(())
        });
    }

    lock.unlock();
    assert_eq!(*order.borrow(), vec![1, 4]);
    assert!(!lock.is_locked());
    assert_eq!(lock.pending_tasks(), 0);
}

#[test]
fn tasks_deferred_during_a_flush_run_in_a_follow_up_batch() {
    let lock = InteractionLock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    lock.lock();
    {
        let order = Rc::clone(&order);
        let handle = lock.clone();
        lock.defer(move || {
            order.borrow_mut().push("first");
            let order = Rc::clone(&order);
            handle.defer(move || order.borrow_mut().push("follow-up"));
        });
    }
    {
        let order = Rc::clone(&order);
        lock.defer(move || order.borrow_mut().push("second"));
    }

    lock.unlock();
    assert_eq!(*order.borrow(), vec!["first", "second", "follow-up"]);
}

#[test]
fn relocking_during_a_flush_holds_the_rest_for_the_next_unlock() {
    let lock = InteractionLock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    lock.lock();
    {
        let order = Rc::clone(&order);
        let handle = lock.clone();
        lock.defer(move || {
            order.borrow_mut().push("relock");
            handle.lock();
            let order = Rc::clone(&order);
            handle.defer(move || order.borrow_mut().push("held"));
        });
    }

    lock.unlock();
    assert!(lock.is_locked());
    assert_eq!(*order.borrow(), vec!["relock"]);
    assert_eq!(lock.pending_tasks(), 1);

    lock.unlock();
    assert_eq!(*order.borrow(), vec!["relock", "held"]);
}

#[test]
fn relocking_mid_batch_holds_the_rest_of_the_batch_in_order() {
    let lock = InteractionLock::new();
    let log = recorder();
    lock.lock();
    {
        let log = Rc::clone(&log);
        let handle = lock.clone();
        lock.defer(move || {
            log.borrow_mut().push("relock".into());
            handle.lock();
            let log = Rc::clone(&log);
            handle.defer(move || log.borrow_mut().push("newer".into()));
        });
    }
    for name in ["second", "third"] {
        let log = Rc::clone(&log);
        let handle = lock.clone();
        lock.defer(move || {
            log.borrow_mut()
                .push(format!("{name}:locked={}", handle.is_locked()))
        });
    }

    lock.unlock();
    assert!(lock.is_locked());
    assert_eq!(log.borrow().as_slice(), &["relock".to_string()]);
    assert_eq!(lock.pending_tasks(), 3);

    lock.unlock();
    assert_eq!(
        *log.borrow(),
        vec![
            "relock".to_string(),
            "second:locked=false".into(),
            "third:locked=false".into(),
            "newer".into(),
        ]
    );
    assert_eq!(lock.pending_tasks(), 0);
}

#[test]
fn run_if_unlocked_reports_whether_it_ran() {
    let lock = InteractionLock::new();
    let ran = Cell::new(0);
    assert!(lock.run_if_unlocked(|| ran.set(ran.get() + 1)));
    lock.lock();
    assert!(!lock.run_if_unlocked(|| ran.set(ran.get() + 1)));
    assert_eq!(lock.pending_tasks(), 0);
    lock.unlock();
    assert_eq!(ran.get(), 1);
}

#[test]
fn clones_share_state() {
    let lock = InteractionLock::new();
    let other = lock.clone();
    other.lock();
    assert!(lock.is_locked());
    assert!(lock.ptr_eq(&other));
    assert!(!lock.ptr_eq(&InteractionLock::new()));
    lock.unlock();
    assert!(!other.is_locked());
}

#[test]
fn global_lock_is_shared_on_a_thread() {
    let first = global_interaction_lock();
    let second = global_interaction_lock();
    assert!(first.ptr_eq(&second));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "unlocked interaction lock")]
fn unlocking_an_unlocked_lock_asserts_in_debug() {
    InteractionLock::new().unlock();
}

#[test]
#[cfg(not(debug_assertions))]
fn unlocking_an_unlocked_lock_is_a_no_op() {
    let lock = InteractionLock::new();
    lock.unlock();
    assert!(!lock.is_locked());
}

#[test]
fn task_error_displays_its_message() {
    let error = TaskError::new("timeout");
    assert_eq!(error.message(), "timeout");
    assert_eq!(error.to_string(), "deferred task failed: timeout");
}
