//! Interaction lock: holds back application side effects while a card is
//! being dragged or animated.
//!
//! While locked, deferred tasks queue up in arrival order. `unlock()` runs the
//! queue as one batch, each task isolated from the failure of the others, and
//! then tells subscribers the lock is free.

use cardswipe_core::collections::map::IndexMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// Failure reported by a fallible deferred task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deferred task failed: {}", self.message)
    }
}

impl std::error::Error for TaskError {}

type Task = Box<dyn FnOnce() -> Result<(), TaskError>>;
type Subscriber = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct LockInner {
    locked: Cell<bool>,
    flushing: Cell<bool>,
    queue: RefCell<VecDeque<Task>>,
    subscribers: RefCell<IndexMap<u64, Subscriber>>,
    next_subscriber_id: Cell<u64>,
}

/// Shared handle; clones refer to the same lock.
#[derive(Clone, Default)]
pub struct InteractionLock {
    inner: Rc<LockInner>,
}

impl InteractionLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.inner.locked.get()
    }

    /// Tasks waiting for the next unlock.
    pub fn pending_tasks(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    pub fn ptr_eq(&self, other: &InteractionLock) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Idempotent. Subscribers hear only real transitions.
    pub fn lock(&self) {
        if self.inner.locked.replace(true) {
            log::trace!("interaction lock already held");
            return;
        }
        log::debug!("interaction locked");
        self.notify(true);
    }

    pub fn unlock(&self) {
        if !self.inner.locked.get() {
            log::warn!("unlock() called on an unlocked interaction lock");
            debug_assert!(false, "unlock() called on an unlocked interaction lock");
            return;
        }
        self.inner.locked.set(false);

        if self.inner.flushing.get() {
            // A task relocked and unlocked; the running flush picks up the queue.
            self.notify(false);
            return;
        }

        log::debug!(
            "interaction unlocked, {} deferred task(s) pending",
            self.pending_tasks()
        );
        self.flush();
        if !self.inner.locked.get() {
            self.notify(false);
        }
    }

    /// Run now when free, otherwise queue until the next unlock.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.try_defer(move || {
            task();
            Ok(())
        });
    }

    /// Like [`defer`](Self::defer) for tasks that can fail. Failures are
    /// logged and never stop other tasks.
    pub fn try_defer(&self, task: impl FnOnce() -> Result<(), TaskError> + 'static) {
        if self.is_locked() || self.inner.flushing.get() {
            self.inner.queue.borrow_mut().push_back(Box::new(task));
            log::trace!("deferred task queued ({} pending)", self.pending_tasks());
        } else {
            run_isolated(Box::new(task));
        }
    }

    /// Run `task` only if the lock is free. Returns whether it ran.
    pub fn run_if_unlocked(&self, task: impl FnOnce()) -> bool {
        if self.is_locked() {
            return false;
        }
        task();
        true
    }

    /// `listener` receives the new lock state on every transition until the
    /// returned subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> LockSubscription {
        let id = self.inner.next_subscriber_id.get();
        self.inner.next_subscriber_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .insert(id, Rc::new(listener));
        LockSubscription {
            lock: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn flush(&self) {
        self.inner.flushing.set(true);
        let mut batch_index = 0;
        // Tasks deferred by a running batch form the next batch.
        while !self.inner.locked.get() {
            let mut batch = std::mem::take(&mut *self.inner.queue.borrow_mut());
            if batch.is_empty() {
                break;
            }
            batch_index += 1;
            log::debug!(
                "flushing batch {batch_index} of {} deferred task(s)",
                batch.len()
            );
            while let Some(task) = batch.pop_front() {
                run_isolated(task);
                if self.inner.locked.get() && !batch.is_empty() {
                    log::debug!("relocked mid-flush, holding {} task(s)", batch.len());
                    self.requeue_front(std::mem::take(&mut batch));
                }
            }
        }
        self.inner.flushing.set(false);
    }

    /// Put `remaining` back ahead of anything queued since the batch began.
    fn requeue_front(&self, remaining: VecDeque<Task>) {
        let mut queue = self.inner.queue.borrow_mut();
        let newer = std::mem::replace(&mut *queue, remaining);
        queue.extend(newer);
    }

    fn notify(&self, locked: bool) {
        let subscribers: SmallVec<[Subscriber; 4]> =
            self.inner.subscribers.borrow().values().cloned().collect();
        for subscriber in subscribers {
            subscriber(locked);
        }
    }
}

impl fmt::Debug for InteractionLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionLock")
            .field("locked", &self.is_locked())
            .field("pending_tasks", &self.pending_tasks())
            .finish()
    }
}

fn run_isolated(task: Task) {
    match catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => log::error!("{error}"),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            log::error!("deferred task panicked: {message}");
        }
    }
}

/// Keeps a lock listener registered. Dropping it unsubscribes.
pub struct LockSubscription {
    lock: Weak<LockInner>,
    id: u64,
}

impl LockSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for LockSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.lock.upgrade() {
            inner.subscribers.borrow_mut().shift_remove(&self.id);
        }
    }
}

thread_local! {
    static GLOBAL_INTERACTION_LOCK: InteractionLock = InteractionLock::new();
}

/// The lock shared by everything on this thread.
pub fn global_interaction_lock() -> InteractionLock {
    GLOBAL_INTERACTION_LOCK.with(InteractionLock::clone)
}

#[cfg(test)]
#[path = "tests/interaction_lock_tests.rs"]
mod tests;
