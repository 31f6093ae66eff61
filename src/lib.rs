//! Generic rooted multi-way trees.
//!
//! Nodes carry a caller-chosen identifier and a payload of any type `T` and
//! live in a [`Forest`] backed by a generational arena. Trees are built by
//! hand ([`Forest::create_root`], [`Forest::add_child`]) or inferred from a
//! flat list with a parent/child predicate ([`ForestBuilder`]). Queries run
//! on a [`NodeRef`], which acts as the root of the query.
//!
//! ```
//! use treekit::Forest;
//!
//! let mut forest = Forest::new();
//! let boss = forest.create_root("0", "Hany");
//! let lead = forest.add_child_with_id(boss, "2", "Mezo").unwrap();
//! let dev = forest.add_child_with_id(lead, "4", "Amr").unwrap();
//!
//! let root = forest.node(boss).unwrap();
//! assert_eq!(root.depth(), 3);
//! assert_eq!(root.find_by_id("4").map(|n| n.node_id()), Some(dev));
//! assert_eq!(root.lowest_common_ancestor(lead, dev).map(|n| n.node_id()), Some(lead));
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod exitcode;
mod mutation;
pub mod node;
mod query;
pub mod traverse;
pub mod tree_traits;
pub mod util;

pub use arena::{Forest, Node, NodeId};
pub use builder::ForestBuilder;
pub use codec::{CHILDREN_KEY, ID_KEY};
pub use errors::{TreeError, TreeResult};
pub use node::{Children, Details, NodeRef};
pub use traverse::{BreadthFirstIter, PreOrderIter};
pub use tree_traits::TreeNodeConvert;
