//! Persisted configuration snapshots.
//!
//! A snapshot is the resolved tree written as TOML under a fixed comment
//! header. It is a diagnostic/backup artifact, never read back by resolution,
//! but its format is that of an environment file so it can be promoted to one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, Result};
use crate::config::tree::ConfigTree;

/// Default location for [`save_snapshot`] when no path is given.
pub const DEFAULT_SNAPSHOT_PATH: &str = "config/generated/traffic-config.toml";

const HEADER: &str = "\
# Resolved traffic configuration snapshot.
# Generated by traffic-config; edits are not read back automatically.
";

/// Render the snapshot document for `tree`.
pub fn render_snapshot(tree: &ConfigTree, environment: &str) -> Result<String> {
    let body = toml::to_string_pretty(tree)?;
    Ok(format!("{}# Environment: {}\n\n{}", HEADER, environment, body))
}

/// Write a snapshot of `tree` to `path`, creating parent directories.
pub fn save_snapshot(tree: &ConfigTree, environment: &str, path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let document = render_snapshot(tree, environment)?;
    fs::write(&path, document).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Configuration snapshot saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_environment_file;
    use crate::config::schema::defaults;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_creates_parent_directories() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("nested/deeper/snapshot.toml");

        let written = save_snapshot(&defaults(), "test", Some(&target)).expect("save");
        assert_eq!(written, target);

        let content = fs::read_to_string(&target).expect("read");
        assert!(content.starts_with("# Resolved traffic configuration snapshot."));
        assert!(content.contains("# Environment: test"));
    }

    #[test]
    fn test_snapshot_is_a_valid_environment_file() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("snapshot.toml");

        let mut tree = defaults();
        tree.set("rateLimiting.maxRequests", 25i64);
        save_snapshot(&tree, "test", Some(&target)).expect("save");

        let loaded = load_environment_file(&target).expect("load").expect("present");
        assert_eq!(loaded, tree);
    }
}
