//! Layered configuration resolution for traffic-handling services.
//!
//! Settings for rate limiting, load balancing, connection pools, queueing,
//! security, monitoring, caching, scaling and health checks are resolved from
//! three layers (catalog defaults, an environment file, environment variables),
//! validated, and handed to consumers as a [`ConfigTree`].

pub mod config;
pub mod observability;

pub use config::{
    ConfigError, ConfigResolver, ConfigTree, ConfigValue, ResolverOptions, SharedConfig,
};
