//! Roll Context - the set of named data sources one roll draws from
//!
//! A roll context is built fresh for every roll. It binds keys such as
//! `main`, `captain` or `gunner2` to an actor and a snapshot of that actor's
//! roll data, marks one of them as the default source for unqualified
//! formula terms, and names groups of keys (selectors) for terms that fan
//! out over several contexts.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::Actor;
use crate::domain::value_objects::RollData;

/// One registered data source
#[derive(Debug, Clone)]
pub struct RollContextEntry {
    pub entity: Arc<Actor>,
    pub data: RollData,
}

/// The Roll Context aggregate
#[derive(Debug, Clone, Default)]
pub struct RollContext {
    contexts: BTreeMap<String, RollContextEntry>,
    main_context: Option<String>,
    selectors: BTreeMap<String, Vec<String>>,
}

impl RollContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Register a context
    ///
    /// Without a snapshot, the entity's roll data is computed now. An
    /// existing context under the same key is replaced.
    pub fn add_context(&mut self, key: impl Into<String>, entity: Arc<Actor>, data: Option<RollData>) {
        let data = data.unwrap_or_else(|| entity.roll_data());
        self.contexts
            .insert(key.into(), RollContextEntry { entity, data });
    }

    /// Mark a registered context as the default source for unqualified terms
    ///
    /// # Invariants
    /// - The key must already be registered
    pub fn set_main_context(&mut self, key: &str) -> Result<(), RollContextError> {
        if !self.contexts.contains_key(key) {
            return Err(RollContextError::UnknownContext(key.to_string()));
        }
        self.main_context = Some(key.to_string());
        Ok(())
    }

    /// Name an ordered group of context keys
    pub fn add_selector(&mut self, name: impl Into<String>, keys: Vec<String>) {
        self.selectors.insert(name.into(), keys);
    }

    // ========================================================================
    // Finders
    // ========================================================================

    pub fn context(&self, key: &str) -> Option<&RollContextEntry> {
        self.contexts.get(key)
    }

    pub fn has_context(&self, key: &str) -> bool {
        self.contexts.contains_key(key)
    }

    pub fn main_key(&self) -> Option<&str> {
        self.main_context.as_deref()
    }

    pub fn main_context(&self) -> Option<&RollContextEntry> {
        self.main_context
            .as_deref()
            .and_then(|key| self.contexts.get(key))
    }

    pub fn selector(&self, name: &str) -> Option<&[String]> {
        self.selectors.get(name).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    pub fn selectors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selectors
            .iter()
            .map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    // ========================================================================
    // Term resolution
    // ========================================================================

    /// Resolve a formula reference such as `@pilot.skills.pil.mod`
    ///
    /// A leading segment naming a registered context addresses that context;
    /// anything else is looked up in the main context.
    pub fn resolve(&self, reference: &str) -> Option<&Value> {
        let path = reference.trim_start_matches('@');
        if let Some((head, rest)) = path.split_once('.') {
            if let Some(entry) = self.contexts.get(head) {
                return entry.data.get(rest);
            }
        }
        self.main_context()?.data.get(path)
    }

    /// Resolve a reference that may address a selector
    ///
    /// `@gunner.skills.pil.mod` with a `gunner` selector yields one value per
    /// selected context, in selector order, skipping contexts where the path
    /// is missing. Other references yield at most one value.
    pub fn resolve_all(&self, reference: &str) -> Vec<(&str, &Value)> {
        let path = reference.trim_start_matches('@');
        if let Some((head, rest)) = path.split_once('.') {
            if let Some(keys) = self.selectors.get(head) {
                return keys
                    .iter()
                    .filter_map(|key| {
                        let (key, entry) = self.contexts.get_key_value(key.as_str())?;
                        entry.data.get(rest).map(|value| (key.as_str(), value))
                    })
                    .collect();
            }
            if let Some((key, entry)) = self.contexts.get_key_value(head) {
                return entry
                    .data
                    .get(rest)
                    .map(|value| vec![(key.as_str(), value)])
                    .unwrap_or_default();
            }
        }
        match (self.main_key(), self.main_context()) {
            (Some(key), Some(entry)) => entry
                .data
                .get(path)
                .map(|value| vec![(key, value)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// Errors raised while building a roll context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollContextError {
    #[error("No roll context registered under key: {0}")]
    UnknownContext(String),
}
