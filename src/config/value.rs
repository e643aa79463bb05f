//! Configuration leaf values.
//!
//! # Design Decisions
//! - Tagged union instead of an untyped map: every leaf is one of a small,
//!   closed set of kinds
//! - Integer and Float together form the "number" kind; accessors convert
//!   between them where no precision is lost
//! - Serde representation is untagged so TOML and JSON documents map onto
//!   the natural shape without wrapper keys

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::tree::ConfigTree;

/// A single value in the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
    Object(ConfigTree),
}

impl ConfigValue {
    /// Short name of the value kind, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Object(_) => "object",
        }
    }

    /// Integer view. Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            // i64::MAX as f64 rounds up to 2^63, which is out of range.
            ConfigValue::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(n) => Some(*n as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::List(items) => f.write_str(&items.join(",")),
            ConfigValue::Object(tree) => {
                let json = serde_json::to_string(tree).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(value: ConfigTree) -> Self {
        ConfigValue::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_accessors() {
        assert_eq!(ConfigValue::Integer(42).as_i64(), Some(42));
        assert_eq!(ConfigValue::Float(25.0).as_i64(), Some(25));
        assert_eq!(ConfigValue::Float(2.5).as_i64(), None);
        assert_eq!(ConfigValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(ConfigValue::from("3").as_i64(), None);
    }

    #[test]
    fn test_float_beyond_i64_range_is_not_an_integer() {
        assert_eq!(ConfigValue::Float(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(ConfigValue::Float(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_untagged_deserialization_picks_narrowest_kind() {
        let value: ConfigValue = serde_json::from_str("7").unwrap();
        assert_eq!(value, ConfigValue::Integer(7));

        let value: ConfigValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(value, ConfigValue::Float(0.5));

        let value: ConfigValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(value, ConfigValue::List(vec!["a".into(), "b".into()]));

        let value: ConfigValue = serde_json::from_str(r#"{"x": true}"#).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn test_mixed_lists_are_rejected() {
        let result: Result<ConfigValue, _> = serde_json::from_str(r#"["a", 1]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfigValue::Integer(5).to_string(), "5");
        assert_eq!(ConfigValue::List(vec!["a".into(), "b".into()]).to_string(), "a,b");
        assert_eq!(ConfigValue::from("info").to_string(), "info");
    }
}
