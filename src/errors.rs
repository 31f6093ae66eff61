use thiserror::Error;

use crate::arena::NodeId;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Node not found in tree: {0}")]
    NodeNotFound(NodeId),

    #[error("Cannot delete the root node of the search: {0}")]
    CannotDeleteRoot(NodeId),

    #[error("Located parent {parent} has no children while removing {target}")]
    EmptyParent { parent: NodeId, target: NodeId },

    #[error("Node is already attached to a parent: {0}")]
    AlreadyAttached(NodeId),

    #[error("Node is still attached to a parent, delete it first: {0}")]
    StillAttached(NodeId),

    #[error("Cycle detected: {0}")]
    CycleDetected(String),

    #[error("Payload does not serialize to a map of fields: {0}")]
    PayloadNotAnObject(String),

    #[error("Payload uses reserved key: {0}")]
    ReservedKey(String),

    #[error("Malformed tree document: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
