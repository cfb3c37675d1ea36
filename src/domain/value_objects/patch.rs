//! Entity patches - partial field updates addressed by dotted paths
//!
//! A patch is what an operation hands to the entity store: a set of field
//! paths (`data.attributes.hp.value`) each either set to a JSON value or
//! removed. Paths are relative to the serialized entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ItemId;

/// A single field change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "lowercase")]
pub enum PatchOp {
    Set(Value),
    Remove,
}

/// Partial update of an actor or item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPatch {
    ops: BTreeMap<String, PatchOp>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; a later change to the same path replaces this one
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.ops.insert(path.into(), PatchOp::Set(value.into()));
        self
    }

    /// Remove a field
    pub fn remove(&mut self, path: impl Into<String>) -> &mut Self {
        self.ops.insert(path.into(), PatchOp::Remove);
        self
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(path, value);
        self
    }

    pub fn get(&self, path: &str) -> Option<&PatchOp> {
        self.ops.get(path)
    }

    /// The value a path is set to, if the patch sets it
    pub fn value(&self, path: &str) -> Option<&Value> {
        match self.ops.get(path) {
            Some(PatchOp::Set(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.ops.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PatchOp)> {
        self.ops.iter()
    }

    /// Fold another patch into this one; its changes win on conflicts
    pub fn merge(&mut self, other: EntityPatch) {
        self.ops.extend(other.ops);
    }

    /// Apply every change to a JSON document in path order
    ///
    /// Setting a path creates missing intermediate objects. Removing a path
    /// whose parent does not exist is a no-op.
    pub fn apply_to(&self, target: &mut Value) {
        for (path, op) in &self.ops {
            let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
            let Some((last, parents)) = segments.split_last() else {
                continue;
            };
            match op {
                PatchOp::Set(value) => {
                    let parent = parents
                        .iter()
                        .fold(&mut *target, |node, segment| child_object(node, segment));
                    if !parent.is_object() {
                        *parent = Value::Object(Map::new());
                    }
                    if let Value::Object(map) = parent {
                        map.insert(last.to_string(), value.clone());
                    }
                }
                PatchOp::Remove => {
                    let parent = parents
                        .iter()
                        .try_fold(&mut *target, |node, segment| node.get_mut(*segment));
                    if let Some(Value::Object(map)) = parent {
                        map.remove(*last);
                    }
                }
            }
        }
    }
}

fn child_object<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new())),
        other => other,
    }
}

/// Patch addressed to one embedded item of an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub item_id: ItemId,
    pub patch: EntityPatch,
}

impl ItemPatch {
    pub fn new(item_id: ItemId, patch: EntityPatch) -> Self {
        Self { item_id, patch }
    }
}
