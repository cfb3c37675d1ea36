//! Roll data - the value tree a roll formula's `@` references resolve against

use serde_json::{Map, Value};

/// Snapshot of an entity's roll-relevant data
///
/// Computed once when a context is registered; later changes to the entity
/// are not reflected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollData {
    root: Map<String, Value>,
}

impl RollData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; anything other than an object yields empty data
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(root) => Self { root },
            _ => Self::default(),
        }
    }

    /// Look up a dotted path such as `abilities.str.mod`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Numeric value at a path, if the path holds a number
    pub fn number(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Set a top-level key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.root.insert(key.into(), value.into());
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}
