//! Shared read access to the resolved configuration.
//!
//! The resolver is single-writer. Consumers that live on other tasks or
//! threads hold a [`SharedConfig`] instead, and the owner of the resolver
//! publishes each newly installed tree to it.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::tree::ConfigTree;
use crate::config::value::ConfigValue;

/// Cheaply cloneable handle to the latest published configuration.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<ConfigTree>>,
}

impl SharedConfig {
    pub fn new(tree: ConfigTree) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(tree)),
        }
    }

    /// Current snapshot. Later publishes do not affect a snapshot already held.
    pub fn load(&self) -> Arc<ConfigTree> {
        self.inner.load_full()
    }

    /// Replace the published tree.
    pub fn publish(&self, tree: ConfigTree) {
        self.inner.store(Arc::new(tree));
    }

    /// Owned copy of the value at `path` in the current snapshot.
    pub fn get(&self, path: &str) -> Option<ConfigValue> {
        self.inner.load().get(path).cloned()
    }
}
