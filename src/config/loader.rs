//! Environment file loading from disk.
//!
//! An environment file is a TOML document named after the deployment
//! environment (`<dir>/<environment>.toml`) holding a partial tree, e.g.
//!
//! ```toml
//! [rateLimiting]
//! maxRequests = 50
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigLoadWarning;
use crate::config::tree::ConfigTree;

/// Path of the environment file for `environment` under `dir`.
pub fn environment_file_path(dir: &Path, environment: &str) -> PathBuf {
    dir.join(format!("{}.toml", environment))
}

/// Load an environment file.
///
/// Returns `Ok(None)` when the file does not exist. Read and parse failures are
/// reported as a [`ConfigLoadWarning`]; callers treat the layer as empty.
pub fn load_environment_file(path: &Path) -> Result<Option<ConfigTree>, ConfigLoadWarning> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigLoadWarning {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let tree: ConfigTree = toml::from_str(&content).map_err(|e| ConfigLoadWarning {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })?;

    Ok(Some(tree))
}
