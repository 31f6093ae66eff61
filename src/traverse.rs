use std::collections::VecDeque;
use tracing::instrument;

use crate::arena::{Forest, NodeId};
use crate::node::{Details, NodeRef};

/// Pre-order depth-first iterator: node first, then children left to right.
pub struct PreOrderIter<'a, T> {
    forest: &'a Forest<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(root: NodeRef<'a, T>) -> Self {
        Self {
            forest: root.forest(),
            stack: vec![root.node_id()],
        }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.forest.node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.child_ids().iter().rev());
                return Some(node);
            }
        }
        None
    }
}

/// Breadth-first iterator, level by level, children left to right.
pub struct BreadthFirstIter<'a, T> {
    forest: &'a Forest<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T> BreadthFirstIter<'a, T> {
    fn new(root: NodeRef<'a, T>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root.node_id());
        Self {
            forest: root.forest(),
            queue,
        }
    }
}

impl<'a, T> Iterator for BreadthFirstIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.queue.pop_front() {
            if let Some(node) = self.forest.node(current) {
                self.queue.extend(node.child_ids());
                return Some(node);
            }
        }
        None
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub fn pre_order(&self) -> PreOrderIter<'a, T> {
        PreOrderIter::new(*self)
    }

    pub fn breadth_first(&self) -> BreadthFirstIter<'a, T> {
        BreadthFirstIter::new(*self)
    }

    /// First node in pre-order whose identifier equals `id`.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef<'a, T>> {
        self.find_dfs(id, |node, id| node.id() == id)
    }

    /// Breadth-first search for the first node satisfying `predicate(node, target)`.
    ///
    /// The receiver is checked first. When several nodes match, the one
    /// closest to the receiver wins.
    #[instrument(level = "trace", skip_all, fields(root = %self.node_id()))]
    pub fn find_bfs<Q, F>(&self, target: &Q, mut predicate: F) -> Option<NodeRef<'a, T>>
    where
        Q: ?Sized,
        F: FnMut(NodeRef<'a, T>, &Q) -> bool,
    {
        self.breadth_first().find(|&node| predicate(node, target))
    }

    /// Depth-first (pre-order) search for the first node satisfying the predicate.
    #[instrument(level = "trace", skip_all, fields(root = %self.node_id()))]
    pub fn find_dfs<Q, F>(&self, target: &Q, mut predicate: F) -> Option<NodeRef<'a, T>>
    where
        Q: ?Sized,
        F: FnMut(NodeRef<'a, T>, &Q) -> bool,
    {
        self.pre_order().find(|&node| predicate(node, target))
    }

    /// Every node satisfying the predicate, in pre-order.
    #[instrument(level = "trace", skip_all, fields(root = %self.node_id()))]
    pub fn find_all_dfs<Q, F>(&self, target: &Q, mut predicate: F) -> Vec<NodeRef<'a, T>>
    where
        Q: ?Sized,
        F: FnMut(NodeRef<'a, T>, &Q) -> bool,
    {
        self.pre_order()
            .filter(|&node| predicate(node, target))
            .collect()
    }

    /// Depth-first search returning the match with its parent, depth and siblings.
    #[instrument(level = "trace", skip_all, fields(root = %self.node_id()))]
    pub fn find_full_dfs<Q, F>(&self, target: &Q, mut predicate: F) -> Option<Details<'a, T>>
    where
        Q: ?Sized,
        F: FnMut(NodeRef<'a, T>, &Q) -> bool,
    {
        find_details(*self, None, 0, target, &mut predicate)
    }

    /// Nodes without children, in pre-order.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn leaves(&self) -> Vec<NodeRef<'a, T>> {
        self.pre_order().filter(|node| node.is_leaf()).collect()
    }

    /// Height of the subtree counting the receiver: a lone node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Nodes exactly `depth` edges below the receiver, in pre-order.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn level(&self, depth: usize) -> Vec<NodeRef<'a, T>> {
        let mut nodes = Vec::new();
        collect_level(*self, depth, 0, &mut nodes);
        nodes
    }

    /// Number of nodes in the subtree, receiver included.
    pub fn size(&self) -> usize {
        self.pre_order().count()
    }

    /// Payloads in pre-order.
    pub fn values(&self) -> Vec<&'a T> {
        self.pre_order().map(|node| node.data()).collect()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.pre_order().map(|node| node.data().clone()).collect()
    }
}

fn find_details<'a, T, Q, F>(
    node: NodeRef<'a, T>,
    parent: Option<NodeRef<'a, T>>,
    depth: usize,
    target: &Q,
    predicate: &mut F,
) -> Option<Details<'a, T>>
where
    Q: ?Sized,
    F: FnMut(NodeRef<'a, T>, &Q) -> bool,
{
    if predicate(node, target) {
        let siblings = parent
            .map(|parent| {
                parent
                    .children()
                    .filter(|sibling| sibling.node_id() != node.node_id())
                    .collect()
            })
            .unwrap_or_default();
        return Some(Details {
            node,
            parent,
            depth,
            siblings,
        });
    }

    for child in node.children() {
        if let Some(found) = find_details(child, Some(node), depth + 1, target, predicate) {
            return Some(found);
        }
    }
    None
}

fn collect_level<'a, T>(
    node: NodeRef<'a, T>,
    target: usize,
    current: usize,
    nodes: &mut Vec<NodeRef<'a, T>>,
) {
    if current == target {
        nodes.push(node);
        return;
    }
    for child in node.children() {
        collect_level(child, target, current + 1, nodes);
    }
}
