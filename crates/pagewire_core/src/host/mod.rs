//! Host surface capability contracts.
//!
//! # Responsibility
//! - Define the narrow interface page logic needs from a document host:
//!   element lookup, node construction, tree mutation, listener registration
//!   and timer scheduling.
//! - Keep page logic testable without a live browser document.
//!
//! # Invariants
//! - All host access happens on one thread; methods take `&self` and hosts
//!   use interior mutability.
//! - Hosts must release internal borrows before invoking listener or timer
//!   callbacks, so callbacks may re-enter the host.
//! - Operations on a `NodeId` the host never issued fail with
//!   `HostError::UnknownNode`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

pub mod clock;
pub mod memory;

pub use clock::ManualScheduler;
pub use memory::MemoryHost;

/// Opaque handle to one node owned by a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Opaque handle to one scheduled timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

/// Event kinds page logic listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    /// Fired once on the document root when structural content is ready.
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Event payload handed to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    /// Suppresses the host's default action (e.g. native form submission).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Registered event handler.
pub type Listener = Rc<dyn Fn(&mut Event)>;

/// Deferred one-shot callback.
pub type TimerCallback = Box<dyn FnOnce()>;

pub type HostResult<T> = Result<T, HostError>;

/// Host-level failure for node or tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Handle was never issued by this host.
    UnknownNode(NodeId),
    /// Tag name is empty or blank.
    InvalidTagName(String),
    /// Node has no value slot (not an `input`/`textarea`).
    NotAnInput(NodeId),
    /// Append would create a cycle or re-parent the document root.
    HierarchyViolation { parent: NodeId, child: NodeId },
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "unknown host node: {node}"),
            Self::InvalidTagName(tag) => write!(f, "invalid tag name: `{tag}`"),
            Self::NotAnInput(node) => write!(f, "node has no value slot: {node}"),
            Self::HierarchyViolation { parent, child } => {
                write!(f, "cannot append {child} under {parent}")
            }
        }
    }
}

impl Error for HostError {}

/// Timer scheduling capability.
///
/// Callbacks run on the host's single event thread after at least `delay`
/// has elapsed. Clearing an unknown or already-fired timer is a no-op.
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId;
    fn clear_timeout(&self, id: TimerId);
}

/// Document capability consumed by page logic.
pub trait HostSurface: Scheduler {
    /// Document root node; `DomContentLoaded` fires here.
    fn document(&self) -> NodeId;
    /// Finds a connected element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    /// Creates a new detached element.
    fn create_element(&self, tag: &str) -> HostResult<NodeId>;
    fn append_child(&self, parent: NodeId, child: NodeId) -> HostResult<()>;
    /// Detaches `node` from its parent. Detached nodes are left untouched.
    fn detach(&self, node: NodeId) -> HostResult<()>;
    /// Replaces all content of `node` with `text`.
    fn set_text(&self, node: NodeId, text: &str) -> HostResult<()>;
    fn set_class_name(&self, node: NodeId, class_name: &str) -> HostResult<()>;
    fn add_class(&self, node: NodeId, class: &str) -> HostResult<()>;
    fn remove_class(&self, node: NodeId, class: &str) -> HostResult<()>;
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> HostResult<()>;
    fn input_value(&self, node: NodeId) -> HostResult<String>;
    fn set_input_value(&self, node: NodeId, value: &str) -> HostResult<()>;
    fn add_listener(&self, node: NodeId, kind: EventKind, listener: Listener) -> HostResult<()>;
    /// Human-readable local wall-clock time, as shown in click results.
    fn local_time_label(&self) -> String;
}
