//! Content-region item management.
//!
//! # Responsibility
//! - Append submitted items (with their removal control) and click results
//!   to the content region.
//! - Update or remove arbitrary elements by identifier.
//!
//! # Invariants
//! - Every operation reports success as `bool`; "not found" never errors.
//! - A missing content region means no mutation at all.
//! - The manager and its removal handlers hold only weak host handles; a
//!   dropped host turns every operation into a `false` no-op.

use crate::host::{Event, EventKind, HostResult, HostSurface, NodeId};
use crate::model::element::ElementAttributes;
use crate::service::element_factory::create_element;
use log::{debug, info, warn};
use std::rc::{Rc, Weak};

pub const SUBMITTED_ITEM_CLASS: &str = "submitted-item";
pub const REMOVE_BUTTON_CLASS: &str = "remove-btn";
pub const REMOVE_BUTTON_LABEL: &str = "Remove";
pub const CLICK_RESULT_CLASS: &str = "click-result";

/// Item manager bound to one content region.
pub struct ItemManager<H: HostSurface + ?Sized> {
    host: Weak<H>,
    content_region: Option<NodeId>,
}

impl<H: HostSurface + ?Sized> Clone for ItemManager<H> {
    fn clone(&self) -> Self {
        Self {
            host: Weak::clone(&self.host),
            content_region: self.content_region,
        }
    }
}

impl<H: HostSurface + ?Sized + 'static> ItemManager<H> {
    pub fn new(host: &Rc<H>, content_region: Option<NodeId>) -> Self {
        Self {
            host: Rc::downgrade(host),
            content_region,
        }
    }

    pub fn content_region(&self) -> Option<NodeId> {
        self.content_region
    }

    /// Appends a `Submitted: <text>` item with a working removal control.
    ///
    /// Returns `false` without mutation when the content region is missing.
    pub fn add_submitted_item(&self, text: &str) -> bool {
        let Some(region) = self.content_region else {
            return false;
        };
        let Some(host) = self.upgrade("add_submitted_item") else {
            return false;
        };
        match build_submitted_item(&host, text) {
            Ok(item) => append(&*host, region, item, "add_submitted_item"),
            Err(err) => {
                warn!("event=add_submitted_item module=items status=error error={err}");
                false
            }
        }
    }

    /// Appends a `Button clicked at <label>` paragraph.
    pub fn add_click_result(&self, time_label: &str) -> bool {
        let Some(region) = self.content_region else {
            return false;
        };
        let Some(host) = self.upgrade("add_click_result") else {
            return false;
        };
        let attributes = ElementAttributes::new()
            .class_name(CLICK_RESULT_CLASS)
            .text(format!("Button clicked at {time_label}"));
        match create_element(&*host, "p", &attributes) {
            Ok(node) => append(&*host, region, node, "add_click_result"),
            Err(err) => {
                warn!("event=add_click_result module=items status=error error={err}");
                false
            }
        }
    }

    /// Replaces the text of the element with identifier `id`.
    pub fn update_element_content(&self, id: &str, text: &str) -> bool {
        let Some(host) = self.upgrade("update_element") else {
            return false;
        };
        let Some(node) = host.element_by_id(id) else {
            debug!("event=update_element module=items status=not_found id={id}");
            return false;
        };
        match host.set_text(node, text) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=update_element module=items status=error id={id} error={err}");
                false
            }
        }
    }

    /// Detaches the element with identifier `id`.
    pub fn remove_element(&self, id: &str) -> bool {
        let Some(host) = self.upgrade("remove_element") else {
            return false;
        };
        let Some(node) = host.element_by_id(id) else {
            debug!("event=remove_element module=items status=not_found id={id}");
            return false;
        };
        match host.detach(node) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=remove_element module=items status=error id={id} error={err}");
                false
            }
        }
    }

    fn upgrade(&self, event: &str) -> Option<Rc<H>> {
        let host = self.host.upgrade();
        if host.is_none() {
            debug!("event={event} module=items status=skipped reason=host_dropped");
        }
        host
    }
}

fn build_submitted_item<H>(host: &Rc<H>, text: &str) -> HostResult<NodeId>
where
    H: HostSurface + ?Sized + 'static,
{
    let item = create_element(
        &**host,
        "div",
        &ElementAttributes::new()
            .class_name(SUBMITTED_ITEM_CLASS)
            .text(format!("Submitted: {text}")),
    )?;
    let remove_button = create_element(
        &**host,
        "button",
        &ElementAttributes::new()
            .class_name(REMOVE_BUTTON_CLASS)
            .text(REMOVE_BUTTON_LABEL),
    )?;

    let weak_host: Weak<H> = Rc::downgrade(host);
    host.add_listener(
        remove_button,
        EventKind::Click,
        Rc::new(move |_event: &mut Event| {
            let Some(host) = weak_host.upgrade() else {
                return;
            };
            match host.detach(item) {
                Ok(()) => debug!("event=remove_item module=items status=ok item={item}"),
                Err(err) => {
                    warn!("event=remove_item module=items status=error item={item} error={err}")
                }
            }
        }),
    )?;
    host.append_child(item, remove_button)?;
    Ok(item)
}

fn append<H: HostSurface + ?Sized>(host: &H, region: NodeId, node: NodeId, event: &str) -> bool {
    match host.append_child(region, node) {
        Ok(()) => {
            info!("event={event} module=items status=ok node={node}");
            true
        }
        Err(err) => {
            warn!("event={event} module=items status=error node={node} error={err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemManager, CLICK_RESULT_CLASS};
    use crate::host::{HostSurface, MemoryHost};
    use std::rc::Rc;

    #[test]
    fn click_result_is_tagged_and_timestamped() {
        let host = Rc::new(MemoryHost::new());
        let region = host
            .append_element(host.document(), "div", "dynamic-content")
            .expect("region");
        let items = ItemManager::new(&host, Some(region));

        assert!(items.add_click_result("10:15:00 AM"));
        let children = host.children(region).expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(host.tag(children[0]).expect("tag"), "p");
        assert!(host
            .has_class(children[0], CLICK_RESULT_CLASS)
            .expect("class lookup"));
        assert_eq!(
            host.text(children[0]).expect("text"),
            "Button clicked at 10:15:00 AM"
        );
    }

    #[test]
    fn update_and_remove_by_identifier() {
        let host = Rc::new(MemoryHost::new());
        let node = host
            .append_element(host.document(), "span", "status")
            .expect("node");
        let items = ItemManager::new(&host, None);

        assert!(items.update_element_content("status", "ready"));
        assert_eq!(host.text(node).expect("text"), "ready");
        assert!(items.remove_element("status"));
        assert!(!items.remove_element("status"));
        assert!(!items.update_element_content("status", "gone"));
        assert!(!items.add_click_result("now"));
    }
    #[test]
    fn operations_after_host_drop_report_false() {
        let host = Rc::new(MemoryHost::new());
        let region = host
            .append_element(host.document(), "div", "dynamic-content")
            .expect("region");
        let items = ItemManager::new(&host, Some(region));
        drop(host);

        assert!(!items.add_submitted_item("hello"));
        assert!(!items.add_click_result("now"));
        assert!(!items.update_element_content("dynamic-content", "x"));
        assert!(!items.remove_element("dynamic-content"));
    }
}
