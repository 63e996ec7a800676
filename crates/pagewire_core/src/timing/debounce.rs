//! Trailing-edge debounce.

use crate::host::{Scheduler, TimerId};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

struct DebounceState<A> {
    scheduler: Rc<dyn Scheduler>,
    wait: Duration,
    func: Box<dyn Fn(A)>,
    pending: Cell<Option<TimerId>>,
}

/// Debounced callback handle. Clones share one pending call.
pub struct Debounced<A> {
    state: Rc<DebounceState<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

/// Wraps `func` so it runs `wait` after the latest `call`, with that call's
/// arguments. Earlier calls inside the window are discarded.
pub fn debounce<A, F>(scheduler: Rc<dyn Scheduler>, wait: Duration, func: F) -> Debounced<A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        state: Rc::new(DebounceState {
            scheduler,
            wait,
            func: Box::new(func),
            pending: Cell::new(None),
        }),
    }
}

impl<A: 'static> Debounced<A> {
    /// Restarts the window and remembers `args` for the eventual run.
    pub fn call(&self, args: A) {
        self.cancel();
        let state = Rc::clone(&self.state);
        let timer = self.state.scheduler.set_timeout(
            self.state.wait,
            Box::new(move || {
                state.pending.set(None);
                (state.func)(args);
            }),
        );
        self.state.pending.set(Some(timer));
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        if let Some(timer) = self.state.pending.take() {
            self.state.scheduler.clear_timeout(timer);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }
}
