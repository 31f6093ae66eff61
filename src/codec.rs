//! JSON form of a tree.
//!
//! Every node becomes an object holding its payload's fields, the node
//! identifier under [`ID_KEY`] and, for inner nodes, the children under
//! [`CHILDREN_KEY`]:
//!
//! ```json
//! {"Id": "0", "Name": "Hany", "Children": [{"Id": "2", "Name": "Mezo"}]}
//! ```
//!
//! The identifier is always written, so it survives a round trip.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::arena::{Forest, NodeId, Subtree};
use crate::errors::{TreeError, TreeResult};
use crate::node::NodeRef;

pub const ID_KEY: &str = "Id";
pub const CHILDREN_KEY: &str = "Children";

impl<'a, T: Serialize> NodeRef<'a, T> {
    #[instrument(level = "debug", skip(self), fields(root = %self.node_id()))]
    pub fn to_json_value(&self) -> TreeResult<Value> {
        encode(*self)
    }

    pub fn serialize_json(&self) -> TreeResult<String> {
        Ok(serde_json::to_string(&self.to_json_value()?)?)
    }

    pub fn serialize_json_pretty(&self) -> TreeResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value()?)?)
    }
}

impl<T: DeserializeOwned> Forest<T> {
    /// Parses a serialized tree and inserts it as a new root.
    ///
    /// The whole document is validated before anything is inserted.
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn deserialize_json(&mut self, text: &str) -> TreeResult<NodeId> {
        let value: Value = serde_json::from_str(text)?;
        self.insert_json_value(value)
    }

    pub fn insert_json_value(&mut self, value: Value) -> TreeResult<NodeId> {
        let subtree = decode(value)?;
        Ok(self.insert_subtree(subtree))
    }

    /// Parses a serialized tree into a new forest.
    pub fn from_json(text: &str) -> TreeResult<(Self, NodeId)> {
        let mut forest = Self::new();
        let root = forest.deserialize_json(text)?;
        Ok((forest, root))
    }
}

fn encode<T: Serialize>(node: NodeRef<'_, T>) -> TreeResult<Value> {
    let mut fields = match serde_json::to_value(node.data())? {
        Value::Object(fields) => fields,
        other => return Err(TreeError::PayloadNotAnObject(kind(&other).to_string())),
    };
    for key in [ID_KEY, CHILDREN_KEY] {
        if fields.contains_key(key) {
            return Err(TreeError::ReservedKey(key.to_string()));
        }
    }

    fields.insert(ID_KEY.to_string(), Value::String(node.id().to_string()));
    if !node.is_leaf() {
        let children = node
            .children()
            .map(encode)
            .collect::<TreeResult<Vec<_>>>()?;
        fields.insert(CHILDREN_KEY.to_string(), Value::Array(children));
    }
    Ok(Value::Object(fields))
}

fn decode<T: DeserializeOwned>(value: Value) -> TreeResult<Subtree<T>> {
    let mut fields: Map<String, Value> = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(TreeError::Malformed(format!(
                "expected an object per node, found {}",
                kind(&other)
            )))
        }
    };

    let id = match fields.remove(ID_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(id)) => id,
        Some(other) => {
            return Err(TreeError::Malformed(format!(
                "`{}` must be a string, found {}",
                ID_KEY,
                kind(&other)
            )))
        }
    };

    let children = match fields.remove(CHILDREN_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(decode)
            .collect::<TreeResult<Vec<_>>>()?,
        Some(other) => {
            return Err(TreeError::Malformed(format!(
                "`{}` must be an array, found {}",
                CHILDREN_KEY,
                kind(&other)
            )))
        }
    };

    let data = serde_json::from_value(Value::Object(fields))?;
    Ok(Subtree { id, data, children })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        label: String,
    }

    fn item(label: &str) -> Item {
        Item {
            label: label.to_string(),
        }
    }

    #[test]
    fn test_encode_layout() {
        let mut forest = Forest::new();
        let root = forest.create_root("r", item("root"));
        forest.add_child_with_id(root, "c", item("child")).unwrap();

        let value = forest.node(root).unwrap().to_json_value().unwrap();
        assert_eq!(
            value,
            json!({
                "Id": "r",
                "label": "root",
                "Children": [{"Id": "c", "label": "child"}]
            })
        );
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        let mut forest = Forest::new();
        let root = forest.create_root("r", 5);
        assert!(matches!(
            forest.node(root).unwrap().to_json_value(),
            Err(TreeError::PayloadNotAnObject(kind)) if kind == "number"
        ));
    }

    #[test]
    fn test_missing_id_decodes_to_empty() {
        let (forest, root) = Forest::<Item>::from_json(r#"{"label": "x"}"#).unwrap();
        let root = forest.node(root).unwrap();
        assert_eq!(root.id(), "");
        assert_eq!(root.data(), &item("x"));
    }

    #[test]
    fn test_bad_children_leaves_forest_untouched() {
        let mut forest: Forest<Item> = Forest::new();
        let text = r#"{"label": "x", "Children": [{"label": "ok"}, {"nope": 1}]}"#;
        assert!(forest.deserialize_json(text).is_err());
        assert!(forest.is_empty());
    }
}
