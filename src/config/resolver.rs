//! Layered configuration resolution.
//!
//! # Layers (ascending precedence)
//! ```text
//! defaults (catalog)
//!     → environment file (<config_dir>/<environment>.toml), deep-merged
//!     → environment variables (catalog bindings), applied with `set`
//!     → validation
//!     → installed tree
//! ```
//!
//! # Design Decisions
//! - The resolver is an owned value; there is no process-wide instance
//! - A failed resolution, update or reset never replaces the installed tree
//! - Load failures of the environment file are warnings, not errors
//! - Single writer: mutation takes `&mut self`, readers on other threads use
//!   [`SharedConfig`](crate::config::handle::SharedConfig)

use std::path::{Path, PathBuf};

use crate::config::env::{Environment, ProcessEnvironment};
use crate::config::error::{ConfigError, ConfigLoadWarning, Result};
use crate::config::loader::{environment_file_path, load_environment_file};
use crate::config::schema::{self, SETTINGS};
use crate::config::snapshot::save_snapshot;
use crate::config::tree::ConfigTree;
use crate::config::validation::validate_config;
use crate::config::value::ConfigValue;
use crate::observability::metrics;

/// Variable naming the active deployment environment.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Variable naming the directory holding environment files.
pub const CONFIG_DIR_VAR: &str = "TRAFFIC_CONFIG_DIR";

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_CONFIG_DIR: &str = "config/environments";

/// Where the resolver looks for its environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Deployment environment name (e.g., "production").
    pub environment: String,

    /// Directory holding `<environment>.toml` files.
    pub config_dir: PathBuf,
}

impl ResolverOptions {
    pub fn new(environment: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment: environment.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Read `APP_ENV` and `TRAFFIC_CONFIG_DIR`, falling back to defaults.
    pub fn from_env(env: &dyn Environment) -> Self {
        Self {
            environment: env
                .var(ENVIRONMENT_VAR)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            config_dir: env
                .var(CONFIG_DIR_VAR)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
        }
    }

    pub fn environment_file(&self) -> PathBuf {
        environment_file_path(&self.config_dir, &self.environment)
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT, DEFAULT_CONFIG_DIR)
    }
}

/// Owns the validated configuration tree and the sources it came from.
pub struct ConfigResolver {
    options: ResolverOptions,
    env: Box<dyn Environment>,
    defaults: ConfigTree,
    tree: ConfigTree,
    warnings: Vec<ConfigLoadWarning>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("options", &self.options)
            .field("tree", &self.tree)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    /// Resolve using catalog defaults.
    pub fn new(options: ResolverOptions, env: impl Environment + 'static) -> Result<Self> {
        Self::with_defaults(schema::defaults(), options, env)
    }

    /// Resolve against the process environment, with options read from it.
    pub fn from_process_env() -> Result<Self> {
        let options = ResolverOptions::from_env(&ProcessEnvironment);
        Self::new(options, ProcessEnvironment)
    }

    /// Resolve using a caller-supplied defaults layer.
    pub fn with_defaults(
        defaults: ConfigTree,
        options: ResolverOptions,
        env: impl Environment + 'static,
    ) -> Result<Self> {
        let mut resolver = Self {
            options,
            env: Box::new(env),
            defaults,
            tree: ConfigTree::new(),
            warnings: Vec::new(),
        };
        resolver.resolve()?;
        Ok(resolver)
    }

    /// Run the three-stage merge, validate, and install the result.
    ///
    /// On failure the previously installed tree is kept.
    pub fn resolve(&mut self) -> Result<&ConfigTree> {
        let (tree, warnings) = self.build();

        if let Err(errors) = validate_config(&tree) {
            metrics::record_resolution("invalid");
            tracing::error!(
                environment = %self.options.environment,
                error_count = errors.len(),
                "Configuration validation failed"
            );
            return Err(ConfigError::Validation(errors));
        }

        metrics::record_resolution("ok");
        tracing::info!(
            environment = %self.options.environment,
            warnings = warnings.len(),
            "Configuration resolved"
        );

        self.tree = tree;
        self.warnings = warnings;
        Ok(&self.tree)
    }

    fn build(&self) -> (ConfigTree, Vec<ConfigLoadWarning>) {
        let mut tree = self.defaults.clone();
        let mut warnings = Vec::new();

        let file = self.options.environment_file();
        match load_environment_file(&file) {
            Ok(Some(overrides)) => {
                tracing::debug!(path = %file.display(), "Applying environment file");
                tree.merge(&overrides);
            }
            Ok(None) => {
                tracing::debug!(path = %file.display(), "No environment file, skipping layer");
            }
            Err(warning) => {
                metrics::record_load_warning("environment_file");
                tracing::warn!("{}. Continuing without environment file overrides.", warning);
                warnings.push(warning);
            }
        }

        let mut applied = 0usize;
        for setting in SETTINGS {
            if let Some(raw) = self.env.var(setting.env) {
                tree.set(setting.path, setting.coerce(&raw));
                applied += 1;
            }
        }
        tracing::debug!(count = applied, "Applied environment variable overrides");

        (tree, warnings)
    }

    /// The installed configuration tree.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn environment(&self) -> &str {
        &self.options.environment
    }

    /// Load warnings produced by the last successful resolution.
    pub fn warnings(&self) -> &[ConfigLoadWarning] {
        &self.warnings
    }

    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.tree.get(path)
    }

    /// Assign a value without validating. Call [`validate`](Self::validate)
    /// after a batch of sets.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) {
        self.tree.set(path, value);
    }

    /// Validate the installed tree as it currently stands.
    pub fn validate(&self) -> Result<()> {
        validate_config(&self.tree).map_err(ConfigError::Validation)
    }

    /// Deep-merge `partial` into the installed tree and re-validate.
    ///
    /// An invalid result is rolled back and the tree is left unchanged.
    pub fn update(&mut self, partial: &ConfigTree) -> Result<()> {
        let candidate = self.tree.merged(partial);

        if let Err(errors) = validate_config(&candidate) {
            metrics::record_update("rejected");
            tracing::warn!(
                error_count = errors.len(),
                "Configuration update rejected, keeping current configuration"
            );
            return Err(ConfigError::Validation(errors));
        }

        self.tree = candidate;
        metrics::record_update("applied");
        tracing::info!(paths = partial.flatten().len(), "Configuration updated");
        Ok(())
    }

    /// Discard the installed tree and resolve again from all sources.
    pub fn reset(&mut self) -> Result<()> {
        tracing::info!(environment = %self.options.environment, "Resetting configuration");
        self.resolve().map(|_| ())
    }

    /// Write a snapshot of the installed tree. Returns the path written.
    pub fn save_config(&self, path: Option<&Path>) -> Result<PathBuf> {
        save_snapshot(&self.tree, &self.options.environment, path)
    }
}
