//! Shared utilities for resolver integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use traffic_config::config::env::MapEnvironment;
use traffic_config::config::loader::environment_file_path;
use traffic_config::{ConfigError, ConfigResolver, ResolverOptions};

pub const ENVIRONMENT: &str = "production";

/// A scratch config directory plus a mutable in-memory environment.
pub struct Fixture {
    pub dir: TempDir,
    pub env: Arc<MapEnvironment>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tmp"),
            env: Arc::new(MapEnvironment::new()),
        }
    }

    pub fn options(&self) -> ResolverOptions {
        ResolverOptions::new(ENVIRONMENT, self.dir.path())
    }

    pub fn env_file(&self) -> PathBuf {
        environment_file_path(self.dir.path(), ENVIRONMENT)
    }

    /// Write the environment file for [`ENVIRONMENT`].
    pub fn write_env_file(&self, content: &str) {
        fs::write(self.env_file(), content).expect("write environment file");
    }

    #[allow(dead_code)]
    pub fn remove_env_file(&self) {
        fs::remove_file(self.env_file()).expect("remove environment file");
    }

    pub fn resolver(&self) -> Result<ConfigResolver, ConfigError> {
        ConfigResolver::new(self.options(), self.env.clone())
    }
}
