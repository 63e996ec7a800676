//! Virtual-time scheduler.
//!
//! # Responsibility
//! - Provide a deterministic `Scheduler` whose clock only moves on `advance`.
//!
//! # Invariants
//! - Timers fire in `(due, scheduling order)` order.
//! - The timer queue is never borrowed while a callback runs, so callbacks
//!   may schedule or clear timers.
//! - Timers scheduled by a callback during `advance` fire in the same call
//!   when they fall due before the target instant.

use crate::host::{Scheduler, TimerCallback, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Single-threaded scheduler driven by explicit time advancement.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    queue: RefCell<BTreeMap<(u64, u64), TimerCallback>>,
    due_by_id: RefCell<HashMap<u64, u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since construction.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward by `delta`, running every timer that falls due.
    ///
    /// Returns the number of callbacks executed.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now_ms.get().saturating_add(duration_ms(delta));
        let mut fired = 0;
        while let Some(callback) = self.pop_due(target) {
            callback();
            fired += 1;
        }
        self.now_ms.set(target);
        fired
    }

    /// Runs every queued timer regardless of due time.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(callback) = self.pop_due(u64::MAX) {
            callback();
            fired += 1;
        }
        fired
    }

    fn pop_due(&self, target: u64) -> Option<TimerCallback> {
        let mut queue = self.queue.borrow_mut();
        let (&(due, seq), _) = queue.iter().next()?;
        if due > target {
            return None;
        }
        let callback = queue.remove(&(due, seq))?;
        self.due_by_id.borrow_mut().remove(&seq);
        if due > self.now_ms.get() {
            self.now_ms.set(due);
        }
        Some(callback)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now_ms.get().saturating_add(duration_ms(delay));
        self.queue.borrow_mut().insert((due, seq), callback);
        self.due_by_id.borrow_mut().insert(seq, due);
        TimerId(seq)
    }

    fn clear_timeout(&self, id: TimerId) {
        let Some(due) = self.due_by_id.borrow_mut().remove(&id.0) else {
            return;
        };
        self.queue.borrow_mut().remove(&(due, id.0));
    }
}

fn duration_ms(value: Duration) -> u64 {
    u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::ManualScheduler;
    use crate::host::Scheduler;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn fires_in_due_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (label, delay) in [("b", 20), ("a", 10), ("c", 20)] {
            let log = Rc::clone(&log);
            scheduler.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(15)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 2);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now_ms(), 20);
    }

    #[test]
    fn cleared_timer_never_fires() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = scheduler.set_timeout(
            Duration::from_millis(5),
            Box::new(move || *counter.borrow_mut() += 1),
        );
        scheduler.clear_timeout(id);
        scheduler.clear_timeout(id);

        assert_eq!(scheduler.advance(Duration::from_millis(10)), 0);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn callbacks_can_schedule_follow_up_timers() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hits = Rc::new(RefCell::new(Vec::new()));
        let inner_scheduler = Rc::clone(&scheduler);
        let inner_hits = Rc::clone(&hits);
        scheduler.set_timeout(
            Duration::from_millis(10),
            Box::new(move || {
                inner_hits.borrow_mut().push(inner_scheduler.now_ms());
                let nested = Rc::clone(&inner_hits);
                let clock = Rc::clone(&inner_scheduler);
                inner_scheduler.set_timeout(
                    Duration::from_millis(10),
                    Box::new(move || nested.borrow_mut().push(clock.now_ms())),
                );
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(*hits.borrow(), vec![10, 20]);
        assert_eq!(scheduler.now_ms(), 25);
    }
    #[test]
    fn run_until_idle_drains_queue_and_moves_clock_to_last_due() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(0));
        for delay in [5000, 40] {
            let counter = Rc::clone(&hits);
            scheduler.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || *counter.borrow_mut() += 1),
            );
        }

        assert_eq!(scheduler.run_until_idle(), 2);
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(scheduler.now_ms(), 5000);
    }
}
