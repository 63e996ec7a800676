//! Leading-edge throttle.

use crate::host::Scheduler;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

struct ThrottleState<A> {
    scheduler: Rc<dyn Scheduler>,
    limit: Duration,
    func: Box<dyn Fn(A)>,
    in_window: Cell<bool>,
}

/// Throttled callback handle. Clones share one window.
pub struct Throttled<A> {
    state: Rc<ThrottleState<A>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

/// Wraps `func` so it runs immediately, then ignores calls until `limit`
/// has elapsed. Dropped calls are not queued.
pub fn throttle<A, F>(scheduler: Rc<dyn Scheduler>, limit: Duration, func: F) -> Throttled<A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Throttled {
        state: Rc::new(ThrottleState {
            scheduler,
            limit,
            func: Box::new(func),
            in_window: Cell::new(false),
        }),
    }
}

impl<A: 'static> Throttled<A> {
    /// Runs the callback unless a window is open. Returns whether it ran.
    pub fn call(&self, args: A) -> bool {
        if self.state.in_window.replace(true) {
            return false;
        }
        let state = Rc::clone(&self.state);
        self.state.scheduler.set_timeout(
            self.state.limit,
            Box::new(move || state.in_window.set(false)),
        );
        (self.state.func)(args);
        true
    }

    pub fn is_throttling(&self) -> bool {
        self.state.in_window.get()
    }
}

#[cfg(test)]
mod tests {
    use super::throttle;
    use crate::host::{ManualScheduler, Scheduler};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn reentrant_call_is_dropped() {
        let scheduler = Rc::new(ManualScheduler::new());
        let calls = Rc::new(RefCell::new(0));
        let slot: Rc<RefCell<Option<super::Throttled<u8>>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let throttled = throttle(
            Rc::clone(&scheduler) as Rc<dyn Scheduler>,
            Duration::from_millis(50),
            move |_: u8| {
                *counter.borrow_mut() += 1;
                if let Some(inner) = inner_slot.borrow().as_ref() {
                    assert!(!inner.call(0));
                }
            },
        );
        *slot.borrow_mut() = Some(throttled.clone());

        assert!(throttled.call(0));
        assert_eq!(*calls.borrow(), 1);
        assert!(throttled.is_throttling());

        scheduler.advance(Duration::from_millis(50));
        assert!(!throttled.is_throttling());
        slot.borrow_mut().take();
    }
}
