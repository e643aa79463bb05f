//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver, watcher and CLI produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters for resolutions, updates, reloads)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → any metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (environment, path, counts)
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
