use std::fmt;
use std::ptr;
use std::slice;

use crate::arena::{Forest, Node, NodeId};

/// Borrowed view of one node together with the forest it lives in.
///
/// All read-only tree operations are relative to the node they are called
/// on: it acts as the root of the query and sits at depth 0.
pub struct NodeRef<'a, T> {
    forest: &'a Forest<T>,
    id: NodeId,
    node: &'a Node<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(forest: &'a Forest<T>, id: NodeId) -> Option<Self> {
        forest.get(id).map(|node| Self { forest, id, node })
    }

    /// Arena handle, the identity used by queries and mutation.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> &'a str {
        &self.node.id
    }

    pub fn data(&self) -> &'a T {
        &self.node.data
    }

    pub fn forest(&self) -> &'a Forest<T> {
        self.forest
    }

    pub fn child_ids(&self) -> &'a [NodeId] {
        self.node.children()
    }

    pub fn children(&self) -> Children<'a, T> {
        Children {
            forest: self.forest,
            ids: self.node.children().iter(),
        }
    }

    pub fn num_children(&self) -> usize {
        self.node.children().len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.forest, other.forest) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("node_id", &self.id)
            .field("id", &self.node.id)
            .field("data", &self.node.data)
            .field("children", &self.node.children().len())
            .finish()
    }
}

/// Iterator over the direct children of a node, left to right.
pub struct Children<'a, T> {
    forest: &'a Forest<T>,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.forest;
        self.ids.by_ref().find_map(|&id| forest.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

/// Result of a full-detail search.
#[derive(Debug)]
pub struct Details<'a, T> {
    /// Matched node
    pub node: NodeRef<'a, T>,
    /// Parent of the match, `None` when the search root itself matched
    pub parent: Option<NodeRef<'a, T>>,
    /// Edges between the search root and the match
    pub depth: usize,
    /// Other children of the parent, in order
    pub siblings: Vec<NodeRef<'a, T>>,
}
