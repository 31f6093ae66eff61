use tracing::{debug, instrument, warn};

use crate::arena::{Forest, NodeId, Subtree};
use crate::errors::{TreeError, TreeResult};

type IdFn<'v, T> = Box<dyn FnMut(&T) -> String + 'v>;

/// Builds a forest from a flat list using a parent/child predicate.
///
/// `is_parent(parent, child)` decides whether the first value is the parent
/// of the second. Values without a parent become roots, in input order, and
/// each root's children are collected depth-first in input order.
///
/// The relation is expected to describe a forest. A value with several
/// parents is copied under each of them (a warning is logged); a cycle is
/// reported as [`TreeError::CycleDetected`].
pub struct ForestBuilder<'v, T, F> {
    values: &'v [T],
    is_parent: F,
    id_of: Option<IdFn<'v, T>>,
}

/// Relationship cache: `children[i]` holds every `j` with `is_parent(values[i], values[j])`.
struct Relations {
    children: Vec<Vec<usize>>,
    parent_count: Vec<usize>,
}

impl<'v, T, F> ForestBuilder<'v, T, F>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    pub fn new(values: &'v [T], is_parent: F) -> Self {
        Self {
            values,
            is_parent,
            id_of: None,
        }
    }

    /// Derive each node's identifier from its value. Without it ids are empty.
    pub fn with_ids<I>(mut self, id_of: I) -> Self
    where
        I: FnMut(&T) -> String + 'v,
    {
        self.id_of = Some(Box::new(id_of));
        self
    }

    /// Builds into a new forest and returns it with the root handles.
    pub fn build(self) -> TreeResult<(Forest<T>, Vec<NodeId>)> {
        let mut forest = Forest::with_capacity(self.values.len());
        let roots = self.build_into(&mut forest)?;
        Ok((forest, roots))
    }

    /// Builds into an existing forest. Nothing is inserted if building fails.
    #[instrument(level = "debug", skip_all, fields(values = self.values.len()))]
    pub fn build_into(mut self, forest: &mut Forest<T>) -> TreeResult<Vec<NodeId>> {
        let relations = self.scan_relations();

        let root_indices: Vec<usize> = (0..self.values.len())
            .filter(|&idx| relations.parent_count[idx] == 0)
            .collect();
        debug!(roots = root_indices.len(), "Found root values");

        let mut staged = Vec::with_capacity(root_indices.len());
        let mut ancestors = Vec::new();
        let mut reached = vec![false; self.values.len()];
        for idx in root_indices {
            staged.push(self.stage(idx, &relations, &mut ancestors, &mut reached)?);
        }
        // every value has a parent chain; one that never ends at a root loops
        if let Some(idx) = reached.iter().position(|&seen| !seen) {
            return Err(TreeError::CycleDetected(format!(
                "value #{} is not reachable from any root",
                idx
            )));
        }

        Ok(staged
            .into_iter()
            .map(|subtree| forest.insert_subtree(subtree))
            .collect())
    }

    fn scan_relations(&mut self) -> Relations {
        let len = self.values.len();
        let mut relations = Relations {
            children: vec![Vec::new(); len],
            parent_count: vec![0; len],
        };

        for (i, parent) in self.values.iter().enumerate() {
            for (j, child) in self.values.iter().enumerate() {
                if (self.is_parent)(parent, child) {
                    relations.children[i].push(j);
                    if i != j {
                        relations.parent_count[j] += 1;
                    }
                }
            }
        }

        for (idx, &count) in relations.parent_count.iter().enumerate() {
            if count > 1 {
                warn!(
                    value = idx,
                    parents = count,
                    "Value has several parents, its subtree is duplicated"
                );
            }
        }
        relations
    }

    fn stage(
        &mut self,
        idx: usize,
        relations: &Relations,
        ancestors: &mut Vec<usize>,
        reached: &mut [bool],
    ) -> TreeResult<Subtree<T>> {
        if ancestors.contains(&idx) {
            return Err(TreeError::CycleDetected(format!(
                "value #{} is its own ancestor",
                idx
            )));
        }
        ancestors.push(idx);
        reached[idx] = true;

        let mut children = Vec::with_capacity(relations.children[idx].len());
        for &child in &relations.children[idx] {
            children.push(self.stage(child, relations, ancestors, reached)?);
        }
        ancestors.pop();

        let value = &self.values[idx];
        let id = self.id_of.as_mut().map(|id_of| id_of(value)).unwrap_or_default();
        Ok(Subtree {
            id,
            data: value.clone(),
            children,
        })
    }
}

impl<T: Clone> Forest<T> {
    /// Builds a forest from `values`; see [`ForestBuilder`].
    pub fn build<F>(values: &[T], is_parent: F) -> TreeResult<(Self, Vec<NodeId>)>
    where
        F: FnMut(&T, &T) -> bool,
    {
        ForestBuilder::new(values, is_parent).build()
    }
}
