//! Status-region error notices.
//!
//! # Responsibility
//! - Show one validation message at a time in the status region.
//! - Reset the region automatically after a fixed delay.
//!
//! # Invariants
//! - At most one auto-clear timer is pending; showing a new message or
//!   clearing explicitly cancels the previous one.
//! - A missing status region or a dropped host turns every operation into a
//!   `false` no-op.
//! - Only weak host handles are held, including by the auto-clear timer.

use crate::host::{HostResult, HostSurface, NodeId, TimerId};
use log::{debug, warn};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Error notifier bound to one status region.
pub struct ErrorNotifier<H: HostSurface + ?Sized> {
    host: Weak<H>,
    region: Option<NodeId>,
    auto_clear: Duration,
    hidden_class: Rc<str>,
    pending_clear: Rc<Cell<Option<TimerId>>>,
}

impl<H: HostSurface + ?Sized> Clone for ErrorNotifier<H> {
    fn clone(&self) -> Self {
        Self {
            host: Weak::clone(&self.host),
            region: self.region,
            auto_clear: self.auto_clear,
            hidden_class: Rc::clone(&self.hidden_class),
            pending_clear: Rc::clone(&self.pending_clear),
        }
    }
}

impl<H: HostSurface + ?Sized + 'static> ErrorNotifier<H> {
    pub fn new(
        host: &Rc<H>,
        region: Option<NodeId>,
        auto_clear: Duration,
        hidden_class: impl Into<Rc<str>>,
    ) -> Self {
        Self {
            host: Rc::downgrade(host),
            region,
            auto_clear,
            hidden_class: hidden_class.into(),
            pending_clear: Rc::new(Cell::new(None)),
        }
    }

    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Whether an auto-clear is scheduled and has not fired yet.
    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear.get().is_some()
    }

    /// Displays `message` and schedules the auto-clear.
    ///
    /// Returns whether the status region exists on a live host.
    pub fn show_error(&self, message: &str) -> bool {
        let Some(region) = self.region else {
            return false;
        };
        let Some(host) = self.upgrade("show_error") else {
            return false;
        };
        self.cancel_pending_clear(&*host);
        if let Err(err) = self.reveal(&*host, region, message) {
            warn!("event=show_error module=notifier status=error region={region} error={err}");
        }

        let weak_host = Weak::clone(&self.host);
        let hidden_class = Rc::clone(&self.hidden_class);
        let pending_clear = Rc::clone(&self.pending_clear);
        let timer = host.set_timeout(
            self.auto_clear,
            Box::new(move || {
                pending_clear.set(None);
                let Some(host) = weak_host.upgrade() else {
                    return;
                };
                match reset_region(&*host, region, &hidden_class) {
                    Ok(()) => debug!("event=auto_clear module=notifier status=ok region={region}"),
                    Err(err) => warn!(
                        "event=auto_clear module=notifier status=error region={region} error={err}"
                    ),
                }
            }),
        );
        self.pending_clear.set(Some(timer));
        debug!(
            "event=show_error module=notifier status=ok region={region} auto_clear_ms={}",
            self.auto_clear.as_millis()
        );
        true
    }

    /// Blanks and hides the status region.
    ///
    /// Returns whether the status region exists on a live host.
    pub fn clear_error(&self) -> bool {
        let Some(region) = self.region else {
            return false;
        };
        let Some(host) = self.upgrade("clear_error") else {
            return false;
        };
        self.cancel_pending_clear(&*host);
        if let Err(err) = reset_region(&*host, region, &self.hidden_class) {
            warn!("event=clear_error module=notifier status=error region={region} error={err}");
        }
        true
    }

    fn reveal(&self, host: &H, region: NodeId, message: &str) -> HostResult<()> {
        host.set_text(region, message)?;
        host.remove_class(region, &self.hidden_class)
    }

    fn cancel_pending_clear(&self, host: &H) {
        if let Some(timer) = self.pending_clear.take() {
            host.clear_timeout(timer);
        }
    }

    fn upgrade(&self, event: &str) -> Option<Rc<H>> {
        let host = self.host.upgrade();
        if host.is_none() {
            debug!("event={event} module=notifier status=skipped reason=host_dropped");
        }
        host
    }
}

fn reset_region<H: HostSurface + ?Sized>(
    host: &H,
    region: NodeId,
    hidden_class: &str,
) -> HostResult<()> {
    host.set_text(region, "")?;
    host.add_class(region, hidden_class)
}
