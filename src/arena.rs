use generational_arena::{Arena, Index};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::NodeRef;

/// Handle of a node inside a [`Forest`].
///
/// Identity of a node is its handle, never its payload. Handles of
/// discarded nodes go stale and are rejected instead of aliasing newer nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

/// Tree node: caller-assigned identifier, payload and ordered children.
///
/// There is no parent link. Whenever a parent is needed it is found again
/// by searching from a known root.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Opaque identifier, not required to be unique
    pub id: String,
    /// Payload, never inspected by the tree algorithms
    pub data: T,
    /// Indices of child nodes in the arena, in traversal order
    children: Vec<NodeId>,
}

impl<T> Node<T> {
    fn new(id: String, data: T) -> Self {
        Self {
            id,
            data,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Owned nested form of a tree, staged before it is inserted into a forest.
#[derive(Debug)]
pub(crate) struct Subtree<T> {
    pub(crate) id: String,
    pub(crate) data: T,
    pub(crate) children: Vec<Subtree<T>>,
}

/// Arena-based storage for any number of trees.
///
/// Uses a generational arena for memory-safe node handles and O(1) lookups.
/// Every node is linked under at most one parent; nodes without a parent are
/// roots, either created as such or detached by a mutation.
#[derive(Debug)]
pub struct Forest<T> {
    arena: Arena<Node<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Forest<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Number of live nodes, attached or detached.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Creates a parentless node.
    #[instrument(level = "trace", skip_all)]
    pub fn create_root(&mut self, id: impl Into<String>, data: T) -> NodeId {
        NodeId(self.arena.insert(Node::new(id.into(), data)))
    }

    /// Appends a new leaf with an empty identifier to `parent` and returns it.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> TreeResult<NodeId> {
        self.add_child_with_id(parent, String::new(), data)
    }

    #[instrument(level = "trace", skip(self, id, data))]
    pub fn add_child_with_id(
        &mut self,
        parent: NodeId,
        id: impl Into<String>,
        data: T,
    ) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let child = NodeId(self.arena.insert(Node::new(id.into(), data)));
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.push(child);
        }
        Ok(child)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id.0)
    }

    /// Mutable access to identifier and payload. Links are changed only
    /// through the mutation operations.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.arena.get_mut(id.0)
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|node| &node.data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id).map(|node| &mut node.data)
    }

    /// Returns a handle for running queries with `id` as the root.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        NodeRef::new(self, id)
    }

    /// Finds the node that lists `id` among its children.
    ///
    /// Scans the whole forest, so it also sees parents outside any
    /// particular root.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena
            .iter()
            .find(|(_, node)| node.children.contains(&id))
            .map(|(idx, _)| NodeId(idx))
    }

    /// All parentless nodes, in storage order.
    pub fn roots(&self) -> Vec<NodeId> {
        let linked: HashSet<NodeId> = self
            .arena
            .iter()
            .flat_map(|(_, node)| node.children.iter().copied())
            .collect();
        self.arena
            .iter()
            .map(|(idx, _)| NodeId(idx))
            .filter(|id| !linked.contains(id))
            .collect()
    }

    pub(crate) fn children_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        self.arena.get_mut(id.0).map(|node| &mut node.children)
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<T>> {
        self.arena.remove(id.0)
    }

    /// Inserts a staged subtree and returns the handle of its root.
    pub(crate) fn insert_subtree(&mut self, subtree: Subtree<T>) -> NodeId {
        let Subtree { id, data, children } = subtree;
        let children: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.insert_subtree(child))
            .collect();
        let mut node = Node::new(id, data);
        node.children = children;
        let idx = NodeId(self.arena.insert(node));
        debug!(node = %idx, "Inserted subtree");
        idx
    }
}
