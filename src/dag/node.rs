// src/dag/node.rs

//! The smallest schedulable unit of a [`TaskGraph`](crate::dag::TaskGraph).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

/// Zero-argument action run by an executor when the node is reached.
pub type TaskAction = Box<dyn Fn() + Send + Sync>;

/// Process-unique node identity.
pub type NodeId = u64;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

struct NodeInner {
    id: NodeId,
    name: Mutex<String>,
    action: Option<TaskAction>,
    critical: AtomicBool,
    /// `f64` bits of the last measured duration.
    compute_time: AtomicU64,
}

/// Shared handle to a task node.
///
/// Cloning the handle shares the node; the same node can be a member of
/// several graphs at once (e.g. a model's sink nested into an interaction
/// graph). Equality, hashing and ordering use the node's identity, never
/// its name, since names are not required to be unique.
///
/// `name`, `critical` and `compute_time` are scalar fields with interior
/// mutability so that an executor can write measured durations while the
/// graphs holding the node only read them.
#[derive(Clone)]
pub struct TaskNode {
    inner: Arc<NodeInner>,
}

impl TaskNode {
    /// A pass-through node (no action).
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// A functional node running `action` when executed.
    pub fn from_fn<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::build(name.into(), Some(Box::new(action)))
    }

    fn build(name: String, action: Option<TaskAction>) -> Self {
        let id = NEXT_NODE_ID.fetch_add(1, AtomicOrdering::Relaxed);
        Self {
            inner: Arc::new(NodeInner {
                id,
                name: Mutex::new(name),
                action,
                critical: AtomicBool::new(false),
                compute_time: AtomicU64::new(0.0f64.to_bits()),
            }),
        }
    }

    /// Builder-style critical flag.
    pub fn with_critical(self, critical: bool) -> Self {
        self.set_critical(critical);
        self
    }

    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    pub fn name(&self) -> String {
        self.inner
            .name
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self
            .inner
            .name
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    /// Critical nodes must never run concurrently with one another.
    pub fn is_critical(&self) -> bool {
        self.inner.critical.load(AtomicOrdering::Relaxed)
    }

    pub fn set_critical(&self, critical: bool) {
        self.inner.critical.store(critical, AtomicOrdering::Relaxed);
    }

    /// Whether the node carries an action. Pass-through nodes are structural.
    pub fn is_functional(&self) -> bool {
        self.inner.action.is_some()
    }

    /// Last measured duration, in milliseconds.
    pub fn compute_time(&self) -> f64 {
        f64::from_bits(self.inner.compute_time.load(AtomicOrdering::Relaxed))
    }

    pub fn set_compute_time(&self, millis: f64) {
        self.inner
            .compute_time
            .store(millis.to_bits(), AtomicOrdering::Relaxed);
    }

    /// Run the node's action, if any.
    pub fn execute(&self) {
        if let Some(action) = &self.inner.action {
            action();
        }
    }
}

impl Default for TaskNode {
    fn default() -> Self {
        Self::new("none")
    }
}

impl PartialEq for TaskNode {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for TaskNode {}

impl Hash for TaskNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl PartialOrd for TaskNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Creation order; gives adjacency sets a deterministic iteration order.
impl Ord for TaskNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.id.cmp(&other.inner.id)
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("critical", &self.is_critical())
            .field("functional", &self.is_functional())
            .finish()
    }
}

impl fmt::Display for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
