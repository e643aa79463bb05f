//! Environment variable sources and value coercion.
//!
//! # Responsibilities
//! - Abstract variable lookup so resolution can run against the real process
//!   environment or an in-memory map
//! - Coerce raw variable strings into typed configuration values
//!
//! # Coercion Order
//! 1. Parses fully as a number → `Integer` (or `Float` when finite but not integral)
//! 2. Case-insensitive `true` / `false` → `Bool`
//! 3. Anything else → `String`

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::value::ConfigValue;

/// Source of raw environment variables.
pub trait Environment: Send + Sync {
    /// Value of `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An in-memory environment whose variables can change after construction.
#[derive(Debug, Default)]
pub struct MapEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_var(key, value);
        self
    }

    pub fn set_var(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove_var(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Coerce a raw environment string into a typed value.
pub fn coerce_env_value(raw: &str) -> ConfigValue {
    if let Ok(n) = raw.parse::<i64>() {
        return ConfigValue::Integer(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        // "inf" and "NaN" parse as floats but are not useful settings.
        if x.is_finite() {
            return ConfigValue::Float(x);
        }
    }

    match raw.to_ascii_lowercase().as_str() {
        "true" => ConfigValue::Bool(true),
        "false" => ConfigValue::Bool(false),
        _ => ConfigValue::String(raw.to_string()),
    }
}

/// Split a comma-separated variable into a list, dropping blank items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_env_value("42"), ConfigValue::Integer(42));
        assert_eq!(coerce_env_value("-7"), ConfigValue::Integer(-7));
        assert_eq!(coerce_env_value("0.05"), ConfigValue::Float(0.05));
        assert_eq!(coerce_env_value("1e3"), ConfigValue::Float(1000.0));
    }

    #[test]
    fn test_coerce_booleans_case_insensitive() {
        assert_eq!(coerce_env_value("TRUE"), ConfigValue::Bool(true));
        assert_eq!(coerce_env_value("false"), ConfigValue::Bool(false));
        assert_eq!(coerce_env_value("False"), ConfigValue::Bool(false));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(coerce_env_value("abc"), ConfigValue::from("abc"));
        assert_eq!(coerce_env_value(""), ConfigValue::from(""));
        assert_eq!(coerce_env_value("42abc"), ConfigValue::from("42abc"));
        assert_eq!(coerce_env_value("inf"), ConfigValue::from("inf"));
        assert_eq!(coerce_env_value("yes"), ConfigValue::from("yes"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_map_environment_is_mutable_through_arc() {
        let env = Arc::new(MapEnvironment::new().with("LOG_LEVEL", "debug"));
        let shared: Arc<dyn Environment> = env.clone();
        assert_eq!(shared.var("LOG_LEVEL").as_deref(), Some("debug"));

        env.remove_var("LOG_LEVEL");
        assert_eq!(shared.var("LOG_LEVEL"), None);
    }
}
