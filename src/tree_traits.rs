use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::arena::Forest;
use crate::node::NodeRef;

/// Conversion into a printable `termtree` structure.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for NodeRef<'_, T> {
    #[instrument(level = "trace", skip(self), fields(root = %self.node_id()))]
    fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_with(&|node: NodeRef<'_, T>| node.data().to_string())
    }
}

// Every parentless node becomes one branch under a summary line.
impl<T: Display> TreeNodeConvert for Forest<T> {
    fn to_tree_string(&self) -> Tree<String> {
        let roots = self.roots();
        if roots.is_empty() {
            return Tree::new("Empty forest".to_string());
        }
        let leaves: Vec<_> = roots
            .iter()
            .filter_map(|&root| self.node(root))
            .map(|root| root.to_tree_string())
            .collect();
        Tree::new(format!("Forest ({} trees)", leaves.len())).with_leaves(leaves)
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Builds a `termtree` view of the subtree, labelling nodes with `label`.
    pub fn to_tree_with<F>(&self, label: &F) -> Tree<String>
    where
        F: Fn(NodeRef<'a, T>) -> String,
    {
        let leaves: Vec<_> = self
            .children()
            .map(|child| child.to_tree_with(label))
            .collect();
        Tree::new(label(*self)).with_leaves(leaves)
    }
}
