use tracing::instrument;

use crate::arena::NodeId;
use crate::node::NodeRef;

impl<'a, T> NodeRef<'a, T> {
    /// True if `target` is the receiver or lies below it.
    pub fn contains_node(&self, target: NodeId) -> bool {
        self.pre_order().any(|node| node.node_id() == target)
    }

    /// Deepest node below (or equal to) the receiver that has both `p` and `q`
    /// in its subtree.
    ///
    /// Returns `None` unless both nodes are reachable from the receiver.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn lowest_common_ancestor(&self, p: NodeId, q: NodeId) -> Option<NodeRef<'a, T>> {
        if !self.contains_node(p) || !self.contains_node(q) {
            return None;
        }
        find_lca(*self, p, q)
    }

    /// Path from the receiver down to `target`, both inclusive.
    ///
    /// Empty if `target` is not reachable from the receiver.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn path_to_node(&self, target: NodeId) -> Vec<NodeRef<'a, T>> {
        let mut path = Vec::new();
        if collect_path(*self, target, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    /// Path from `p` up to the lowest common ancestor and down to `q`.
    ///
    /// The ancestor appears once. Empty if the two nodes have no common
    /// ancestor below the receiver.
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn path_node_to_node(&self, p: NodeId, q: NodeId) -> Vec<NodeRef<'a, T>> {
        let Some(ancestor) = self.lowest_common_ancestor(p, q) else {
            return Vec::new();
        };
        let mut path = ancestor.path_to_node(p);
        path.reverse();
        path.extend(ancestor.path_to_node(q).into_iter().skip(1));
        path
    }

    /// Root-to-leaf path for every leaf, in the order of [`NodeRef::leaves`].
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    pub fn path_to_leaves(&self) -> Vec<Vec<NodeRef<'a, T>>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        collect_leaf_paths(*self, &mut current, &mut paths);
        paths
    }
}

fn find_lca<'a, T>(node: NodeRef<'a, T>, p: NodeId, q: NodeId) -> Option<NodeRef<'a, T>> {
    if node.node_id() == p || node.node_id() == q {
        return Some(node);
    }
    let mut hits = node.children().filter_map(|child| find_lca(child, p, q));
    match (hits.next(), hits.next()) {
        (Some(_), Some(_)) => Some(node),
        (found, _) => found,
    }
}

fn collect_path<'a, T>(node: NodeRef<'a, T>, target: NodeId, path: &mut Vec<NodeRef<'a, T>>) -> bool {
    path.push(node);
    if node.node_id() == target {
        return true;
    }
    for child in node.children() {
        if collect_path(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

fn collect_leaf_paths<'a, T>(
    node: NodeRef<'a, T>,
    current: &mut Vec<NodeRef<'a, T>>,
    paths: &mut Vec<Vec<NodeRef<'a, T>>>,
) {
    current.push(node);
    if node.is_leaf() {
        paths.push(current.clone());
    } else {
        for child in node.children() {
            collect_leaf_paths(child, current, paths);
        }
    }
    current.pop();
}
