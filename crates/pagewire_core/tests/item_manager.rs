use pagewire_core::{EventKind, HostSurface, ItemManager, MemoryHost, NodeId};
use std::rc::Rc;

fn host_with_content_region() -> (Rc<MemoryHost>, NodeId) {
    let host = Rc::new(MemoryHost::new());
    let region = host
        .append_element(host.document(), "div", "dynamic-content")
        .expect("content region");
    (host, region)
}

#[test]
fn submitted_item_has_text_and_removal_control() {
    let (host, region) = host_with_content_region();
    let items = ItemManager::new(&host, Some(region));

    assert!(items.add_submitted_item("abc"));

    let children = host.children(region).expect("children");
    assert_eq!(children.len(), 1);
    let item = children[0];
    assert!(host.has_class(item, "submitted-item").expect("class lookup"));
    assert_eq!(host.text(item).expect("text"), "Submitted: abc");

    let controls = host.children(item).expect("item children");
    assert_eq!(controls.len(), 1);
    let remove = controls[0];
    assert_eq!(host.tag(remove).expect("tag"), "button");
    assert_eq!(host.text(remove).expect("label"), "Remove");
    assert!(host.has_class(remove, "remove-btn").expect("class lookup"));
    assert_eq!(
        host.text_content(item).expect("text content"),
        "Submitted: abcRemove"
    );
}

#[test]
fn clicking_remove_detaches_only_its_item() {
    let (host, region) = host_with_content_region();
    let items = ItemManager::new(&host, Some(region));
    assert!(items.add_submitted_item("first"));
    assert!(items.add_submitted_item("second"));

    let children = host.children(region).expect("children");
    assert_eq!(children.len(), 2);
    let first_remove = host.children(children[0]).expect("controls")[0];

    host.click(first_remove).expect("click remove");

    let remaining = host.children(region).expect("children");
    assert_eq!(remaining, vec![children[1]]);
    assert_eq!(host.text(remaining[0]).expect("text"), "Submitted: second");
    assert!(!host.is_connected(children[0]).expect("connected"));

    host.click(first_remove).expect("second click is harmless");
    assert_eq!(host.children(region).expect("children").len(), 1);
}

#[test]
fn missing_content_region_returns_false_without_mutation() {
    let host = Rc::new(MemoryHost::new());
    let items = ItemManager::new(&host, None);

    assert!(!items.add_submitted_item("abc"));
    assert!(host.children(host.document()).expect("children").is_empty());
}

#[test]
fn update_and_remove_report_not_found() {
    let (host, region) = host_with_content_region();
    let items = ItemManager::new(&host, Some(region));

    assert!(!items.update_element_content("nope", "x"));
    assert!(!items.remove_element("nope"));

    assert!(items.update_element_content("dynamic-content", "reset"));
    assert_eq!(host.text(region).expect("text"), "reset");
    assert!(items.remove_element("dynamic-content"));
    assert_eq!(host.element_by_id("dynamic-content"), None);
}

#[test]
fn removal_control_registers_one_click_listener() {
    let (host, region) = host_with_content_region();
    let items = ItemManager::new(&host, Some(region));
    items.add_submitted_item("abc");

    let item = host.children(region).expect("children")[0];
    let remove = host.children(item).expect("controls")[0];
    assert_eq!(
        host.listener_count(remove, EventKind::Click).expect("count"),
        1
    );
}
