use tracing::{debug, instrument};

use crate::arena::{Forest, NodeId};
use crate::errors::{TreeError, TreeResult};

impl<T> Forest<T> {
    /// Unlinks `target` from its parent below `root` and returns it.
    ///
    /// The detached subtree stays in the forest as a parentless node; it can
    /// be re-attached with [`Forest::attach`] or freed with [`Forest::discard`].
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, root: NodeId, target: NodeId) -> TreeResult<NodeId> {
        if root == target {
            return Err(TreeError::CannotDeleteRoot(target));
        }
        let parent = self.locate_parent(root, target)?;
        self.unlink(parent, target)?;
        debug!(%parent, %target, "Detached subtree");
        Ok(target)
    }

    /// Detaches every leaf below `root` and returns them in leaf order.
    ///
    /// Leaves are collected once up front; parents that become leaves
    /// during the pass stay. `root` itself is never removed.
    #[instrument(level = "debug", skip(self))]
    pub fn trim_leaves(&mut self, root: NodeId) -> TreeResult<Vec<NodeId>> {
        let leaves: Vec<NodeId> = self
            .node(root)
            .ok_or(TreeError::NodeNotFound(root))?
            .leaves()
            .iter()
            .map(|leaf| leaf.node_id())
            .filter(|&leaf| leaf != root)
            .collect();

        for &leaf in &leaves {
            let parent = self.locate_parent(root, leaf)?;
            self.unlink(parent, leaf)?;
        }
        debug!(count = leaves.len(), "Trimmed leaves");
        Ok(leaves)
    }

    /// Appends the detached subtree `child` as last child of `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let child_ref = self.node(child).ok_or(TreeError::NodeNotFound(child))?;
        if !self.contains(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        if child_ref.contains_node(parent) {
            return Err(TreeError::CycleDetected(format!(
                "{} lies inside the subtree of {}",
                parent, child
            )));
        }
        if self.parent_of(child).is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if let Some(children) = self.children_mut(parent) {
            children.push(child);
        }
        Ok(())
    }

    /// Removes a detached subtree from the forest, returning its payloads in pre-order.
    ///
    /// Handles to the removed nodes become stale.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, node: NodeId) -> TreeResult<Vec<T>> {
        if self.parent_of(node).is_some() {
            return Err(TreeError::StillAttached(node));
        }
        let ids: Vec<NodeId> = self
            .node(node)
            .ok_or(TreeError::NodeNotFound(node))?
            .pre_order()
            .map(|n| n.node_id())
            .collect();
        let payloads: Vec<T> = ids
            .into_iter()
            .filter_map(|id| self.remove(id))
            .map(|removed| removed.data)
            .collect();
        debug!(count = payloads.len(), "Discarded subtree");
        Ok(payloads)
    }

    fn locate_parent(&self, root: NodeId, target: NodeId) -> TreeResult<NodeId> {
        let details = self
            .node(root)
            .ok_or(TreeError::NodeNotFound(root))?
            .find_full_dfs(&target, |node, target| node.node_id() == *target)
            .ok_or(TreeError::NodeNotFound(target))?;
        details
            .parent
            .map(|parent| parent.node_id())
            .ok_or(TreeError::CannotDeleteRoot(target))
    }

    fn unlink(&mut self, parent: NodeId, target: NodeId) -> TreeResult<()> {
        let children = self
            .children_mut(parent)
            .ok_or(TreeError::NodeNotFound(parent))?;
        if children.is_empty() {
            return Err(TreeError::EmptyParent { parent, target });
        }
        children.retain(|&child| child != target);
        Ok(())
    }
}
