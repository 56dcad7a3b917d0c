use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

fn recorder() -> Rc<RefCell<Vec<&'static str>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn task_does_not_run_before_due_time() {
    let scheduler = ManualScheduler::new();
    let log = recorder();
    let sink = Rc::clone(&log);
    scheduler.schedule(100, Box::new(move || sink.borrow_mut().push("ran")));

    scheduler.advance(99);
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.advance(1);
    assert_eq!(*log.borrow(), vec!["ran"]);
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.now_ms(), 100);
}

#[test]
fn tasks_run_in_due_order_then_registration_order() {
    let scheduler = ManualScheduler::new();
    let log = recorder();
    for (delay, label) in [(30, "c"), (10, "a"), (10, "b")] {
        let sink = Rc::clone(&log);
        scheduler.schedule(delay, Box::new(move || sink.borrow_mut().push(label)));
    }

    scheduler.advance(50);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn cancelled_task_never_runs() {
    let scheduler = ManualScheduler::new();
    let log = recorder();
    let sink = Rc::clone(&log);
    let handle = scheduler.schedule(5, Box::new(move || sink.borrow_mut().push("ran")));

    assert!(scheduler.cancel(handle));
    assert!(!scheduler.cancel(handle));
    scheduler.advance(10);
    assert!(log.borrow().is_empty());
}

#[test]
fn cancel_after_run_reports_false() {
    let scheduler = ManualScheduler::new();
    let handle = scheduler.schedule(1, Box::new(|| {}));
    scheduler.advance(1);
    assert!(!scheduler.cancel(handle));
}

#[test]
fn nested_tasks_run_within_same_advance_when_due() {
    let scheduler = Rc::new(ManualScheduler::new());
    let log = recorder();

    let inner_scheduler = Rc::clone(&scheduler);
    let sink = Rc::clone(&log);
    scheduler.schedule(
        10,
        Box::new(move || {
            sink.borrow_mut().push("outer");
            let sink = Rc::clone(&sink);
            inner_scheduler.schedule(5, Box::new(move || sink.borrow_mut().push("inner")));
        }),
    );

    scheduler.advance(14);
    assert_eq!(*log.borrow(), vec!["outer"]);
    scheduler.advance(1);
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}

#[test]
fn handles_are_unique() {
    let scheduler = ManualScheduler::new();
    let a = scheduler.schedule(0, Box::new(|| {}));
    let b = scheduler.schedule(0, Box::new(|| {}));
    assert_ne!(a, b);
    assert_eq!(b.id(), a.id() + 1);
}

#[test]
fn cancel_all_drops_everything_pending() {
    let scheduler = ManualScheduler::new();
    let log = recorder();
    for label in ["a", "b"] {
        let sink = Rc::clone(&log);
        scheduler.schedule(10, Box::new(move || sink.borrow_mut().push(label)));
    }

    assert_eq!(scheduler.cancel_all(), 2);
    assert_eq!(scheduler.pending_count(), 0);
    scheduler.advance(100);
    assert!(log.borrow().is_empty());
}

// =============================================================
// TimerRegistry
// =============================================================

struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn fired_timer_is_kept_until_sweep() {
    let drops = Rc::new(Cell::new(0));
    let mut registry = TimerRegistry::default();
    let handle = TaskHandle(0);
    registry.insert(handle, DropCounter(Rc::clone(&drops)));

    assert!(registry.retire(handle));
    assert_eq!(drops.get(), 0);
    assert_eq!(registry.pending_len(), 0);
    assert_eq!(registry.retired_len(), 1);

    assert_eq!(registry.sweep(), 1);
    assert_eq!(drops.get(), 1);
    assert_eq!(registry.retired_len(), 0);
}

#[test]
fn fired_timers_do_not_accumulate_across_schedules() {
    let drops = Rc::new(Cell::new(0));
    let mut registry = TimerRegistry::default();
    for id in 0..100 {
        registry.sweep();
        let handle = TaskHandle(id);
        registry.insert(handle, DropCounter(Rc::clone(&drops)));
        registry.retire(handle);
    }
    assert_eq!(registry.retired_len(), 1);
    assert_eq!(drops.get(), 99);
}

#[test]
fn cancelled_timer_is_handed_back_for_dropping() {
    let drops = Rc::new(Cell::new(0));
    let mut registry = TimerRegistry::default();
    let handle = TaskHandle(3);
    registry.insert(handle, DropCounter(Rc::clone(&drops)));

    let cancelled = registry.cancel(handle);
    assert!(cancelled.is_some());
    drop(cancelled);
    assert_eq!(drops.get(), 1);
    assert!(registry.cancel(handle).is_none());
    assert!(!registry.retire(handle));
}
