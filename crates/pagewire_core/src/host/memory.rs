//! In-memory document host.
//!
//! # Responsibility
//! - Implement `HostSurface` over an arena of element nodes and a
//!   `ManualScheduler`, for tests and the CLI demo.
//! - Offer inspection helpers (children, text, classes) and event dispatch.
//!
//! # Invariants
//! - Node handles are never reused; detached nodes stay in the arena.
//! - `element_by_id` only sees nodes connected to the document root.
//! - Listeners are cloned out of the arena before being invoked.

use crate::config::PageConfig;
use crate::host::{
    Event, EventKind, HostError, HostResult, HostSurface, Listener, ManualScheduler, NodeId,
    Scheduler, TimerCallback, TimerId,
};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

const DOCUMENT_TAG: &str = "#document";
const CLICK_TIME_FORMAT: &str = "%-I:%M:%S %p";

struct NodeData {
    tag: String,
    text: String,
    class_name: String,
    attributes: BTreeMap<String, String>,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<(EventKind, Listener)>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        let value = matches!(tag, "input" | "textarea").then(String::new);
        Self {
            tag: tag.to_string(),
            text: String::new(),
            class_name: String::new(),
            attributes: BTreeMap::new(),
            value,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

/// Arena-backed fake document with a virtual clock.
pub struct MemoryHost {
    nodes: RefCell<Vec<NodeData>>,
    scheduler: ManualScheduler,
    fixed_time_label: RefCell<Option<String>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData::new(DOCUMENT_TAG)]),
            scheduler: ManualScheduler::new(),
            fixed_time_label: RefCell::new(None),
        }
    }

    /// Builds the five well-known page elements named by `config`.
    ///
    /// Layout: simulate button, form wrapping the text input, content
    /// container, and a status region starting hidden.
    pub fn with_standard_page(config: &PageConfig) -> HostResult<Self> {
        let host = Self::new();
        let ids = &config.element_ids;
        let root = host.document();

        let button = host.append_element(root, "button", &ids.simulate_click)?;
        host.set_text(button, "Simulate click")?;
        let form = host.append_element(root, "form", &ids.user_form)?;
        host.append_element(form, "input", &ids.user_input)?;
        host.append_element(root, "div", &ids.dynamic_content)?;
        let status = host.append_element(root, "div", &ids.error_message)?;
        host.add_class(status, &config.hidden_class)?;
        Ok(host)
    }

    /// Creates an element with an `id` attribute and appends it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str, id: &str) -> HostResult<NodeId> {
        let node = self.create_element(tag)?;
        self.set_attribute(node, "id", id)?;
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Pins the label returned by `local_time_label`.
    pub fn set_fixed_time_label(&self, label: impl Into<String>) {
        *self.fixed_time_label.borrow_mut() = Some(label.into());
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// Advances the virtual clock, firing due timers.
    pub fn advance(&self, delta: Duration) -> usize {
        self.scheduler.advance(delta)
    }

    /// Dispatches `kind` to listeners registered on `target`, in order.
    ///
    /// Returns the event after all listeners ran.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> HostResult<Event> {
        let listeners = self.with_node(target, |node| {
            node.listeners
                .iter()
                .filter(|(listener_kind, _)| *listener_kind == kind)
                .map(|(_, listener)| Listener::clone(listener))
                .collect::<Vec<_>>()
        })?;
        let mut event = Event::new(kind, target);
        for listener in listeners {
            listener(&mut event);
        }
        Ok(event)
    }

    pub fn click(&self, target: NodeId) -> HostResult<Event> {
        self.dispatch(target, EventKind::Click)
    }

    pub fn submit(&self, form: NodeId) -> HostResult<Event> {
        self.dispatch(form, EventKind::Submit)
    }

    /// Signals that document structure is ready.
    pub fn fire_dom_content_loaded(&self) -> HostResult<Event> {
        self.dispatch(self.document(), EventKind::DomContentLoaded)
    }

    pub fn children(&self, node: NodeId) -> HostResult<Vec<NodeId>> {
        self.with_node(node, |data| data.children.clone())
    }

    pub fn parent(&self, node: NodeId) -> HostResult<Option<NodeId>> {
        self.with_node(node, |data| data.parent)
    }

    pub fn tag(&self, node: NodeId) -> HostResult<String> {
        self.with_node(node, |data| data.tag.clone())
    }

    /// Own text only, excluding descendants.
    pub fn text(&self, node: NodeId) -> HostResult<String> {
        self.with_node(node, |data| data.text.clone())
    }

    /// Own text followed by descendant text in tree order.
    pub fn text_content(&self, node: NodeId) -> HostResult<String> {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        collect_text(&nodes, node, &mut out)?;
        Ok(out)
    }

    pub fn class_name(&self, node: NodeId) -> HostResult<String> {
        self.with_node(node, |data| data.class_name.clone())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> HostResult<bool> {
        self.with_node(node, |data| {
            data.class_name.split_whitespace().any(|token| token == class)
        })
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> HostResult<Option<String>> {
        self.with_node(node, |data| data.attributes.get(name).cloned())
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> HostResult<usize> {
        self.with_node(node, |data| {
            data.listeners
                .iter()
                .filter(|(listener_kind, _)| *listener_kind == kind)
                .count()
        })
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> HostResult<bool> {
        let nodes = self.nodes.borrow();
        lookup(&nodes, node)?;
        Ok(is_connected_in(&nodes, node))
    }

    /// Renders the subtree under `node` as indented markup.
    pub fn render(&self, node: NodeId) -> HostResult<String> {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        render_into(&nodes, node, 0, &mut out)?;
        Ok(out)
    }

    fn with_node<T>(&self, node: NodeId, f: impl FnOnce(&NodeData) -> T) -> HostResult<T> {
        let nodes = self.nodes.borrow();
        lookup(&nodes, node).map(f)
    }

    fn with_node_mut<T>(&self, node: NodeId, f: impl FnOnce(&mut NodeData) -> T) -> HostResult<T> {
        let mut nodes = self.nodes.borrow_mut();
        lookup_mut(&mut nodes, node).map(f)
    }
}

impl Scheduler for MemoryHost {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.scheduler.set_timeout(delay, callback)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.scheduler.clear_timeout(id);
    }
}

impl HostSurface for MemoryHost {
    fn document(&self) -> NodeId {
        NodeId(0)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .map(|(index, data)| (NodeId(index as u64), data))
            .find(|(node, data)| {
                data.attributes.get("id").map(String::as_str) == Some(id)
                    && is_connected_in(&nodes, *node)
            })
            .map(|(node, _)| node)
    }

    fn create_element(&self, tag: &str) -> HostResult<NodeId> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(HostError::InvalidTagName(tag.to_string()));
        }
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(&tag.to_ascii_lowercase()));
        Ok(NodeId((nodes.len() - 1) as u64))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> HostResult<()> {
        let mut nodes = self.nodes.borrow_mut();
        lookup(&nodes, parent)?;
        lookup(&nodes, child)?;
        if child == self.document() || is_ancestor_or_self(&nodes, child, parent) {
            return Err(HostError::HierarchyViolation { parent, child });
        }
        unlink(&mut nodes, child)?;
        lookup_mut(&mut nodes, parent)?.children.push(child);
        lookup_mut(&mut nodes, child)?.parent = Some(parent);
        Ok(())
    }

    fn detach(&self, node: NodeId) -> HostResult<()> {
        let mut nodes = self.nodes.borrow_mut();
        unlink(&mut nodes, node)
    }

    fn set_text(&self, node: NodeId, text: &str) -> HostResult<()> {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut lookup_mut(&mut nodes, node)?.children);
        for child in children {
            lookup_mut(&mut nodes, child)?.parent = None;
        }
        lookup_mut(&mut nodes, node)?.text = text.to_string();
        Ok(())
    }

    fn set_class_name(&self, node: NodeId, class_name: &str) -> HostResult<()> {
        self.with_node_mut(node, |data| data.class_name = class_name.to_string())
    }

    fn add_class(&self, node: NodeId, class: &str) -> HostResult<()> {
        self.with_node_mut(node, |data| {
            if !data.class_name.split_whitespace().any(|token| token == class) {
                if !data.class_name.is_empty() {
                    data.class_name.push(' ');
                }
                data.class_name.push_str(class);
            }
        })
    }

    fn remove_class(&self, node: NodeId, class: &str) -> HostResult<()> {
        self.with_node_mut(node, |data| {
            data.class_name = data
                .class_name
                .split_whitespace()
                .filter(|token| *token != class)
                .collect::<Vec<_>>()
                .join(" ");
        })
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> HostResult<()> {
        self.with_node_mut(node, |data| {
            if name == "class" {
                data.class_name = value.to_string();
            } else {
                data.attributes.insert(name.to_string(), value.to_string());
            }
        })
    }

    fn input_value(&self, node: NodeId) -> HostResult<String> {
        self.with_node(node, |data| data.value.clone())?
            .ok_or(HostError::NotAnInput(node))
    }

    fn set_input_value(&self, node: NodeId, value: &str) -> HostResult<()> {
        self.with_node_mut(node, |data| match data.value.as_mut() {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(HostError::NotAnInput(node)),
        })?
    }

    fn add_listener(&self, node: NodeId, kind: EventKind, listener: Listener) -> HostResult<()> {
        self.with_node_mut(node, |data| data.listeners.push((kind, listener)))
    }

    fn local_time_label(&self) -> String {
        if let Some(label) = self.fixed_time_label.borrow().as_ref() {
            return label.clone();
        }
        chrono::Local::now().format(CLICK_TIME_FORMAT).to_string()
    }
}

fn lookup(nodes: &[NodeData], node: NodeId) -> HostResult<&NodeData> {
    usize::try_from(node.0)
        .ok()
        .and_then(|index| nodes.get(index))
        .ok_or(HostError::UnknownNode(node))
}

fn lookup_mut(nodes: &mut [NodeData], node: NodeId) -> HostResult<&mut NodeData> {
    usize::try_from(node.0)
        .ok()
        .and_then(|index| nodes.get_mut(index))
        .ok_or(HostError::UnknownNode(node))
}

fn unlink(nodes: &mut [NodeData], node: NodeId) -> HostResult<()> {
    let Some(parent) = lookup_mut(nodes, node)?.parent.take() else {
        return Ok(());
    };
    lookup_mut(nodes, parent)?
        .children
        .retain(|child| *child != node);
    Ok(())
}

fn is_connected_in(nodes: &[NodeData], node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == NodeId(0) {
            return true;
        }
        current = lookup(nodes, id).ok().and_then(|data| data.parent);
    }
    false
}

fn is_ancestor_or_self(nodes: &[NodeData], ancestor: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = lookup(nodes, id).ok().and_then(|data| data.parent);
    }
    false
}

fn collect_text(nodes: &[NodeData], node: NodeId, out: &mut String) -> HostResult<()> {
    let data = lookup(nodes, node)?;
    out.push_str(&data.text);
    for child in &data.children {
        collect_text(nodes, *child, out)?;
    }
    Ok(())
}

fn render_into(nodes: &[NodeData], node: NodeId, depth: usize, out: &mut String) -> HostResult<()> {
    let data = lookup(nodes, node)?;
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", data.tag);
    if !data.class_name.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_markup(&data.class_name));
    }
    for (name, value) in &data.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape_markup(value));
    }
    if let Some(value) = data.value.as_deref().filter(|value| !value.is_empty()) {
        let _ = write!(out, " value=\"{}\"", escape_markup(value));
    }
    out.push('>');
    if data.children.is_empty() {
        let _ = writeln!(out, "{}</{}>", escape_markup(&data.text), data.tag);
        return Ok(());
    }
    out.push('\n');
    if !data.text.is_empty() {
        let _ = writeln!(out, "{indent}  {}", escape_markup(&data.text));
    }
    for child in &data.children {
        render_into(nodes, *child, depth + 1, out)?;
    }
    let _ = writeln!(out, "{indent}</{}>", data.tag);
    Ok(())
}

fn escape_markup(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
