//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! schema.rs (settings catalog → defaults layer)
//!     → loader.rs (environment file → partial tree, merged over defaults)
//!     → env.rs (environment variables → coerced values, set on top)
//!     → validation.rs (required paths, typed constraints)
//!     → resolver.rs (installs the validated tree)
//!
//! On change:
//!     resolver.update() merges a partial tree, validates, rolls back on error
//!     watcher.rs detects an environment file change
//!     → resolver.reset() re-reads every source
//!     → handle.rs publishes the new tree to readers
//! ```
//!
//! # Design Decisions
//! - Lower layers are never consulted once a tree is installed
//! - A tree is only ever installed after it passed validation
//! - Readers get immutable snapshots; the resolver stays single-writer

pub mod env;
pub mod error;
pub mod handle;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod snapshot;
pub mod template;
pub mod tree;
pub mod validation;
pub mod value;
pub mod watcher;

pub use env::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{ConfigError, ConfigLoadWarning, ConfigValidationError};
pub use handle::SharedConfig;
pub use resolver::{ConfigResolver, ResolverOptions};
pub use tree::ConfigTree;
pub use value::ConfigValue;
