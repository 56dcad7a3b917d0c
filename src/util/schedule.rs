//! Deferred task scheduling with cancellation handles.
//!
//! DESIGN
//! ======
//! Every timer-based continuation in the crate (toast show/hide/remove, the
//! simulated send) goes through a `Scheduler` so it has an identity that can
//! be cancelled. The browser implementation wraps gloo-timers; the manual
//! implementation runs on a virtual clock and drives the native tests.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Work deferred until a timer fires.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Runs tasks after a delay on the current thread.
pub trait Scheduler {
    /// Run `task` once `delay_ms` milliseconds have elapsed.
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle;

    /// Cancel a pending task. Returns `false` if it already ran or was cancelled.
    fn cancel(&self, handle: TaskHandle) -> bool;
}

struct PendingTask {
    handle: TaskHandle,
    due_ms: u64,
    task: Task,
}

/// Virtual-clock scheduler. Time only moves through [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<PendingTask>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of tasks that have not run or been cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Drop every pending task without running it. Returns how many were dropped.
    pub fn cancel_all(&self) -> usize {
        let dropped = std::mem::take(&mut *self.pending.borrow_mut());
        dropped.len()
    }

    /// Move the clock forward, running every task that falls due on the way.
    ///
    /// Tasks run in due-time order, ties broken by scheduling order. Tasks
    /// scheduled by a running task are picked up if they fall due inside the
    /// same window.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get().saturating_add(ms);
        while let Some(next) = self.take_next_due(target) {
            self.now_ms.set(next.due_ms);
            (next.task)();
        }
        self.now_ms.set(target);
    }

    fn take_next_due(&self, target: u64) -> Option<PendingTask> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= target)
            .min_by_key(|(_, p)| (p.due_ms, p.handle))
            .map(|(i, _)| i)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        let due_ms = self.now_ms.get() + u64::from(delay_ms);
        self.pending
            .borrow_mut()
            .push(PendingTask { handle, due_ms, task });
        handle
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|p| p.handle != handle);
        pending.len() != before
    }
}

/// Bookkeeping for live timers of type `T`.
///
/// A fired timer is retired rather than dropped, because its callback is still
/// on the stack; retired timers are released by the next `sweep`.
pub struct TimerRegistry<T> {
    pending: HashMap<TaskHandle, T>,
    retired: Vec<T>,
}

impl<T> Default for TimerRegistry<T> {
    fn default() -> Self {
        Self { pending: HashMap::new(), retired: Vec::new() }
    }
}

impl<T> TimerRegistry<T> {
    pub fn insert(&mut self, handle: TaskHandle, timer: T) {
        self.pending.insert(handle, timer);
    }

    /// Move a fired timer out of the pending set. Returns `false` if unknown.
    pub fn retire(&mut self, handle: TaskHandle) -> bool {
        let Some(timer) = self.pending.remove(&handle) else {
            return false;
        };
        self.retired.push(timer);
        true
    }

    /// Take a pending timer out so the caller can drop (clear) it.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.pending.remove(&handle)
    }

    /// Release retired timers. Returns how many were released.
    pub fn sweep(&mut self) -> usize {
        let released = self.retired.len();
        self.retired.clear();
        released
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }
}

#[cfg(feature = "csr")]
pub use browser::BrowserScheduler;

#[cfg(feature = "csr")]
mod browser {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;

    use super::{Scheduler, Task, TaskHandle, TimerRegistry};

    /// `setTimeout`-backed scheduler. Cloning shares the same registry.
    #[derive(Clone, Default)]
    pub struct BrowserScheduler {
        next_id: Rc<Cell<u64>>,
        timers: Rc<RefCell<TimerRegistry<Timeout>>>,
    }

    impl BrowserScheduler {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Scheduler for BrowserScheduler {
        fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
            // Retired timeouts have finished running, so dropping them here is safe.
            self.timers.borrow_mut().sweep();

            let handle = TaskHandle(self.next_id.get());
            self.next_id.set(handle.0 + 1);

            let timers = Rc::clone(&self.timers);
            let timeout = Timeout::new(delay_ms, move || {
                task();
                // Retire only after the task: it may schedule (and sweep) itself.
                timers.borrow_mut().retire(handle);
            });
            self.timers.borrow_mut().insert(handle, timeout);
            handle
        }

        fn cancel(&self, handle: TaskHandle) -> bool {
            // Dropping a gloo `Timeout` clears it.
            let cancelled = self.timers.borrow_mut().cancel(handle);
            cancelled.is_some()
        }
    }
}
