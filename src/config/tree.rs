//! The configuration tree and dotted-path access.
//!
//! # Responsibilities
//! - Walk and create nested objects by dotted path (`"rateLimiting.maxRequests"`)
//! - Deep-merge an overlay tree onto a base tree
//! - Typed convenience accessors and typed section views
//!
//! # Design Decisions
//! - Ordered map keeps iteration and serialized output deterministic
//! - `get` never fails: any missing or non-object segment yields `None`
//! - `set` always wins: a non-object intermediate is replaced by an object
//! - Lists merge wholesale, objects merge key by key

use std::collections::btree_map::{self, BTreeMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::value::ConfigValue;

/// A hierarchical configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value at `path`.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        if path.is_empty() {
            return None;
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            current = match current {
                ConfigValue::Object(tree) => tree.entries.get(segment)?,
                // Prefix resolved to a leaf; there is nothing below it.
                _ => return None,
            };
        }

        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Assign `value` at `path`, creating intermediate objects as needed.
    ///
    /// An intermediate segment holding a non-object value is overwritten with
    /// an empty object. An empty path is ignored.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) {
        if path.is_empty() {
            tracing::warn!("Ignoring configuration set with an empty path");
            return;
        }

        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = match segments.pop() {
            Some(leaf) => leaf,
            None => return,
        };

        let mut node = self;
        for segment in segments {
            let slot = node
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| ConfigValue::Object(ConfigTree::new()));
            node = ensure_object(slot, path, segment);
        }

        node.entries.insert(leaf.to_string(), value.into());
    }

    /// Remove and return the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, path),
        };

        let node = match parent {
            Some(parent) => self.get_object_mut(parent)?,
            None => self,
        };
        node.entries.remove(leaf)
    }

    fn get_object_mut(&mut self, path: &str) -> Option<&mut ConfigTree> {
        let mut node = self;
        for segment in path.split('.') {
            node = match node.entries.get_mut(segment)? {
                ConfigValue::Object(child) => child,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Deep-merge `overlay` into this tree.
    ///
    /// Objects present on both sides merge recursively; any other overlay value
    /// (including lists) replaces the base value wholesale.
    pub fn merge(&mut self, overlay: &ConfigTree) {
        for (key, value) in &overlay.entries {
            match self.entries.entry(key.clone()) {
                btree_map::Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
                    (ConfigValue::Object(base), ConfigValue::Object(patch)) => base.merge(patch),
                    (existing, _) => *existing = value.clone(),
                },
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(value.clone());
                }
            }
        }
    }

    /// Pure form of [`merge`](Self::merge).
    pub fn merged(&self, overlay: &ConfigTree) -> ConfigTree {
        let mut result = self.clone();
        result.merge(overlay);
        result
    }

    /// All leaves as `(dotted path, value)` pairs, in key order.
    pub fn flatten(&self) -> Vec<(String, &ConfigValue)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a ConfigValue)>) {
        for (key, value) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                ConfigValue::Object(child) if !child.is_empty() => child.flatten_into(&path, out),
                _ => out.push((path, value)),
            }
        }
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(ConfigValue::as_i64)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(ConfigValue::as_f64)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(ConfigValue::as_bool)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigValue::as_str)
    }

    pub fn get_list(&self, path: &str) -> Option<&[String]> {
        self.get(path).and_then(ConfigValue::as_list)
    }

    /// Deserialize the object at `path` into a typed view.
    pub fn section<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = self
            .get(path)
            .ok_or_else(|| ConfigError::MissingSection(path.to_string()))?;

        let json = serde_json::to_value(value).map_err(|source| ConfigError::Section {
            path: path.to_string(),
            source,
        })?;

        serde_json::from_value(json).map_err(|source| ConfigError::Section {
            path: path.to_string(),
            source,
        })
    }
}

fn ensure_object<'a>(slot: &'a mut ConfigValue, path: &str, segment: &str) -> &'a mut ConfigTree {
    if !slot.is_object() {
        tracing::warn!(
            path = %path,
            segment = %segment,
            replaced = %slot.kind(),
            "Overwriting non-object configuration value with an object"
        );
        *slot = ConfigValue::Object(ConfigTree::new());
    }

    match slot {
        ConfigValue::Object(tree) => tree,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
