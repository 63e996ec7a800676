//! Startup wiring for the page simulation.
//!
//! # Responsibility
//! - Resolve the well-known page elements once and inject them into the
//!   notifier and item manager.
//! - Attach the simulate-click and form-submit handlers.
//! - Defer initialization until the host signals document readiness.
//!
//! # Invariants
//! - Missing elements disable the matching handler; wiring never fails.
//! - The submit handler always prevents the default submission.
//! - Submissions are validated by the configured `ValidationRules` only.
//! - Handlers and the services they capture hold weak host handles only, so
//!   the host's own listeners never keep it alive.

use crate::config::PageConfig;
use crate::host::{Event, EventKind, HostSurface, NodeId};
use crate::model::validation::ValidationRules;
use crate::service::item_manager::ItemManager;
use crate::service::notifier::ErrorNotifier;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Elements resolved from the host at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageElements {
    pub simulate_button: Option<NodeId>,
    pub form: Option<NodeId>,
    pub input: Option<NodeId>,
    pub content_region: Option<NodeId>,
    pub status_region: Option<NodeId>,
}

impl PageElements {
    /// Looks up every configured element identifier on `host`.
    pub fn resolve<H: HostSurface + ?Sized>(host: &H, config: &PageConfig) -> Self {
        let ids = &config.element_ids;
        Self {
            simulate_button: host.element_by_id(&ids.simulate_click),
            form: host.element_by_id(&ids.user_form),
            input: host.element_by_id(&ids.user_input),
            content_region: host.element_by_id(&ids.dynamic_content),
            status_region: host.element_by_id(&ids.error_message),
        }
    }
}

/// Services built during initialization, exposed to the host harness.
pub struct Simulation<H: HostSurface + ?Sized> {
    pub elements: PageElements,
    pub notifier: ErrorNotifier<H>,
    pub items: ItemManager<H>,
    last_submission: Rc<RefCell<Option<SubmitOutcome>>>,
}

impl<H: HostSurface + ?Sized> Simulation<H> {
    /// Outcome of the most recent form submission, if any was handled.
    pub fn last_submission(&self) -> Option<SubmitOutcome> {
        self.last_submission.borrow().clone()
    }
}

/// Outcome of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(String),
    Rejected(String),
}

/// Wires click and submit handlers for the elements named in `config`.
pub fn initialize_simulation<H>(host: &Rc<H>, config: &PageConfig) -> Simulation<H>
where
    H: HostSurface + ?Sized + 'static,
{
    let elements = PageElements::resolve(&**host, config);
    let notifier = ErrorNotifier::new(
        host,
        elements.status_region,
        config.error_auto_clear(),
        config.hidden_class.as_str(),
    );
    let items = ItemManager::new(host, elements.content_region);
    let last_submission = Rc::new(RefCell::new(None));

    if let Some(button) = elements.simulate_button {
        let weak_host: Weak<H> = Rc::downgrade(host);
        let items = items.clone();
        let attached = host.add_listener(
            button,
            EventKind::Click,
            Rc::new(move |_event: &mut Event| {
                let Some(host) = weak_host.upgrade() else {
                    return;
                };
                items.add_click_result(&host.local_time_label());
            }),
        );
        log_attach("simulate_click", button, attached.is_ok());
    }

    if let Some(form) = elements.form {
        let handler = SubmitHandler {
            host: Rc::downgrade(host),
            input: elements.input,
            rules: config.validation,
            notifier: notifier.clone(),
            items: items.clone(),
        };
        let last_submission = Rc::clone(&last_submission);
        let attached = host.add_listener(
            form,
            EventKind::Submit,
            Rc::new(move |event: &mut Event| {
                event.prevent_default();
                if let Some(outcome) = handler.handle() {
                    *last_submission.borrow_mut() = Some(outcome);
                }
            }),
        );
        log_attach("user_form", form, attached.is_ok());
    }

    info!(
        "event=simulation_init module=simulation status=ok button={} form={} input={} content={} status_region={}",
        elements.simulate_button.is_some(),
        elements.form.is_some(),
        elements.input.is_some(),
        elements.content_region.is_some(),
        elements.status_region.is_some()
    );

    Simulation {
        elements,
        notifier,
        items,
        last_submission,
    }
}

/// Defers `initialize_simulation` to the host's `DomContentLoaded` event.
///
/// Returns `false` and does nothing when no host document is available.
/// Initialization runs at most once even if readiness fires repeatedly.
pub fn install_on_ready<H>(host: Option<&Rc<H>>, config: &PageConfig) -> bool
where
    H: HostSurface + ?Sized + 'static,
{
    let Some(host) = host else {
        debug!("event=install_on_ready module=simulation status=skipped reason=no_document");
        return false;
    };
    let weak_host: Weak<H> = Rc::downgrade(host);
    let config = config.clone();
    let initialized = Cell::new(false);
    let result = host.add_listener(
        host.document(),
        EventKind::DomContentLoaded,
        Rc::new(move |_event: &mut Event| {
            if initialized.replace(true) {
                return;
            }
            if let Some(host) = weak_host.upgrade() {
                initialize_simulation(&host, &config);
            }
        }),
    );
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("event=install_on_ready module=simulation status=error error={err}");
            false
        }
    }
}

struct SubmitHandler<H: HostSurface + ?Sized> {
    host: Weak<H>,
    input: Option<NodeId>,
    rules: ValidationRules,
    notifier: ErrorNotifier<H>,
    items: ItemManager<H>,
}

impl<H: HostSurface + ?Sized + 'static> SubmitHandler<H> {
    fn handle(&self) -> Option<SubmitOutcome> {
        let host = self.host.upgrade()?;
        let value = self.read_input(&*host);

        if let Err(err) = self.rules.check(&value) {
            let message = err.submission_message();
            debug!("event=submit module=simulation status=rejected reason={err}");
            self.notifier.show_error(&message);
            return Some(SubmitOutcome::Rejected(message));
        }

        self.notifier.clear_error();
        self.items.add_submitted_item(&value);
        if let Some(input) = self.input {
            if let Err(err) = host.set_input_value(input, "") {
                warn!("event=submit module=simulation status=error input={input} error={err}");
            }
        }
        info!(
            "event=submit module=simulation status=accepted chars={}",
            value.chars().count()
        );
        Some(SubmitOutcome::Accepted(value))
    }

    fn read_input(&self, host: &H) -> String {
        let Some(input) = self.input else {
            return String::new();
        };
        match host.input_value(input) {
            Ok(value) => value.trim().to_string(),
            Err(err) => {
                warn!("event=submit module=simulation status=error input={input} error={err}");
                String::new()
            }
        }
    }
}

fn log_attach(target: &str, node: NodeId, attached: bool) {
    if attached {
        debug!("event=attach_listener module=simulation status=ok target={target} node={node}");
    } else {
        warn!("event=attach_listener module=simulation status=error target={target} node={node}");
    }
}

#[cfg(test)]
mod tests {
    use super::{PageElements, SubmitHandler, SubmitOutcome};
    use crate::config::PageConfig;
    use crate::host::{HostSurface, MemoryHost};
    use crate::service::item_manager::ItemManager;
    use crate::service::notifier::ErrorNotifier;
    use std::rc::Rc;
    use std::time::Duration;

    fn handler_for(host: &Rc<MemoryHost>, config: &PageConfig) -> SubmitHandler<MemoryHost> {
        let elements = PageElements::resolve(&**host, config);
        SubmitHandler {
            host: Rc::downgrade(host),
            input: elements.input,
            rules: config.validation,
            notifier: ErrorNotifier::new(
                host,
                elements.status_region,
                Duration::from_millis(config.error_auto_clear_ms),
                "hidden",
            ),
            items: ItemManager::new(host, elements.content_region),
        }
    }

    #[test]
    fn resolve_reports_missing_elements_as_none() {
        let host = MemoryHost::new();
        let elements = PageElements::resolve(&host, &PageConfig::default());
        assert_eq!(elements, PageElements::default());
    }

    #[test]
    fn handler_trims_accepted_value() {
        let config = PageConfig::default();
        let host = Rc::new(MemoryHost::with_standard_page(&config).expect("page"));
        let input = host.element_by_id("user-input").expect("input");
        host.set_input_value(input, "  hello  ").expect("type");

        let outcome = handler_for(&host, &config).handle();
        assert_eq!(outcome, Some(SubmitOutcome::Accepted("hello".to_string())));
    }

    #[test]
    fn handler_rejects_values_over_the_maximum() {
        let config = PageConfig::default();
        let host = Rc::new(MemoryHost::with_standard_page(&config).expect("page"));
        let input = host.element_by_id("user-input").expect("input");
        host.set_input_value(input, &"x".repeat(51)).expect("type");

        let outcome = handler_for(&host, &config).handle();
        assert_eq!(
            outcome,
            Some(SubmitOutcome::Rejected(
                "Input cannot exceed 50 characters.".to_string()
            ))
        );
    }

    #[test]
    fn handler_without_input_treats_value_as_empty() {
        let config = PageConfig::default();
        let host = Rc::new(MemoryHost::new());
        host.append_element(host.document(), "div", "error-message")
            .expect("status region");

        let outcome = handler_for(&host, &config).handle();
        assert_eq!(
            outcome,
            Some(SubmitOutcome::Rejected(
                "Please enter some text before submitting.".to_string()
            ))
        );
    }
}
