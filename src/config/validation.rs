//! Configuration validation.
//!
//! # Responsibilities
//! - Check that every required path resolved to a value
//! - Check typed constraints (positive integers, enumerated strings)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConfigTree → Result<(), Vec<ConfigValidationError>>
//! - Runs before a tree is installed on the resolver

use crate::config::error::ConfigValidationError;
use crate::config::schema::{LoadBalancingStrategy, LogLevel};
use crate::config::tree::ConfigTree;
use crate::config::value::ConfigValue;

/// Paths that must resolve to a value after all layers are merged.
pub const REQUIRED_PATHS: [&str; 5] = [
    "rateLimiting.windowMs",
    "rateLimiting.maxRequests",
    "loadBalancing.strategy",
    "database.maxConnections",
    "queue.maxSize",
];

/// Validate a fully merged configuration tree.
pub fn validate_config(tree: &ConfigTree) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    for path in REQUIRED_PATHS {
        if !tree.contains(path) {
            errors.push(ConfigValidationError::MissingRequired {
                path: path.to_string(),
            });
        }
    }

    if let Some(value) = tree.get("rateLimiting.maxRequests") {
        check_positive_integer("rateLimiting.maxRequests", value, &mut errors);
    }

    if let Some(value) = tree.get("loadBalancing.strategy") {
        check_enum::<LoadBalancingStrategy>(
            "loadBalancing.strategy",
            value,
            &LoadBalancingStrategy::ALL.map(LoadBalancingStrategy::as_str),
            &mut errors,
        );
    }

    if let Some(value) = tree.get("monitoring.logLevel") {
        check_enum::<LogLevel>(
            "monitoring.logLevel",
            value,
            &LogLevel::ALL.map(LogLevel::as_str),
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_positive_integer(
    path: &str,
    value: &ConfigValue,
    errors: &mut Vec<ConfigValidationError>,
) {
    match value.as_i64() {
        Some(n) if n > 0 => {}
        Some(n) => errors.push(ConfigValidationError::InvalidValue {
            path: path.to_string(),
            reason: format!("must be a positive integer, got {}", n),
        }),
        None => errors.push(ConfigValidationError::InvalidValue {
            path: path.to_string(),
            reason: format!("must be a positive integer, got {} {}", value.kind(), value),
        }),
    }
}

fn check_enum<T: std::str::FromStr>(
    path: &str,
    value: &ConfigValue,
    allowed: &[&str],
    errors: &mut Vec<ConfigValidationError>,
) {
    let valid = value.as_str().map(|s| s.parse::<T>().is_ok()).unwrap_or(false);
    if !valid {
        errors.push(ConfigValidationError::InvalidValue {
            path: path.to_string(),
            reason: format!("must be one of {}, got \"{}\"", allowed.join(", "), value),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::defaults;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&defaults()).is_ok());
    }

    #[test]
    fn test_each_required_path_is_enforced() {
        for path in REQUIRED_PATHS {
            let mut tree = defaults();
            tree.remove(path);

            let errors = validate_config(&tree).unwrap_err();
            assert_eq!(
                errors,
                vec![ConfigValidationError::MissingRequired {
                    path: path.to_string()
                }]
            );
        }
    }

    #[test]
    fn test_max_requests_must_be_positive_integer() {
        for bad in [
            ConfigValue::Integer(0),
            ConfigValue::Integer(-5),
            ConfigValue::Float(2.5),
            ConfigValue::from("many"),
        ] {
            let mut tree = defaults();
            tree.set("rateLimiting.maxRequests", bad);
            let errors = validate_config(&tree).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].path(), "rateLimiting.maxRequests");
        }

        let mut tree = defaults();
        tree.set("rateLimiting.maxRequests", 25.0f64);
        assert!(validate_config(&tree).is_ok());
    }

    #[test]
    fn test_strategy_enum() {
        for strategy in ["round-robin", "weighted", "least-connections", "response-time"] {
            let mut tree = defaults();
            tree.set("loadBalancing.strategy", strategy);
            assert!(validate_config(&tree).is_ok(), "{} should be accepted", strategy);
        }

        let mut tree = defaults();
        tree.set("loadBalancing.strategy", "bogus");
        let errors = validate_config(&tree).unwrap_err();
        assert_eq!(errors[0].path(), "loadBalancing.strategy");
        assert!(errors[0].to_string().contains("bogus"));
    }

    #[test]
    fn test_log_level_enum() {
        let mut tree = defaults();
        tree.set("monitoring.logLevel", "verbose");
        let errors = validate_config(&tree).unwrap_err();
        assert_eq!(errors[0].path(), "monitoring.logLevel");

        tree.set("monitoring.logLevel", "debug");
        assert!(validate_config(&tree).is_ok());

        // Not required: an absent level is fine.
        tree.remove("monitoring.logLevel");
        assert!(validate_config(&tree).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut tree = defaults();
        tree.remove("queue.maxSize");
        tree.set("loadBalancing.strategy", "random");
        tree.set("monitoring.logLevel", 3i64);
        assert_eq!(validate_config(&tree).unwrap_err().len(), 3);
    }
}
