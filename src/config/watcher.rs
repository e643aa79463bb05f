//! Environment file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Request to re-resolve after the environment file changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadRequest {
    pub path: PathBuf,
}

/// A watcher that monitors one environment file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    reload_tx: mpsc::UnboundedSender<ReloadRequest>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher for `path`.
    ///
    /// Returns the watcher and a receiver for reload requests.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ReloadRequest>) {
        let (reload_tx, reload_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                reload_tx,
            },
            reload_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    ///
    /// Every create, modify or remove of the file is forwarded, including edits
    /// that leave it unparsable; the resolver turns those into an empty layer.
    /// When the file's directory does not exist yet, the nearest existing
    /// ancestor is watched recursively instead.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.reload_tx.clone();
        let path = self.path.clone();
        let (dir, mode) = watch_target(&self.path);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let kind = event.kind;
                    let relevant = kind.is_modify() || kind.is_create() || kind.is_remove();
                    if !relevant || !event.paths.iter().any(|p| p.ends_with(&path)) {
                        return;
                    }

                    tracing::info!(path = %path.display(), "Environment file change detected");
                    let _ = tx.send(ReloadRequest { path: path.clone() });
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, mode)?;

        tracing::info!(path = ?self.path, watching = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

/// Directory to watch for `path`, and how.
fn watch_target(path: &Path) -> (PathBuf, RecursiveMode) {
    let parent = parent_dir(path);
    if parent.is_dir() {
        return (parent, RecursiveMode::NonRecursive);
    }

    let mut dir = parent;
    while !dir.is_dir() && dir != Path::new(".") {
        dir = parent_dir(&dir);
    }
    tracing::warn!(
        path = %path.display(),
        watching = %dir.display(),
        "Environment file directory does not exist, watching nearest ancestor"
    );
    (dir, RecursiveMode::Recursive)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::time::timeout;

    #[test]
    fn test_parent_dir() {
        assert_eq!(
            parent_dir(Path::new("config/environments/production.toml")),
            PathBuf::from("config/environments")
        );
        assert_eq!(parent_dir(Path::new("production.toml")), PathBuf::from("."));
    }

    #[test]
    fn test_watch_target_falls_back_to_existing_ancestor() {
        let tmp = TempDir::new().expect("tmp");

        let (dir, mode) = watch_target(&tmp.path().join("production.toml"));
        assert_eq!(dir, tmp.path());
        assert_eq!(mode, RecursiveMode::NonRecursive);

        let (dir, mode) = watch_target(&tmp.path().join("absent/nested/production.toml"));
        assert_eq!(dir, tmp.path());
        assert_eq!(mode, RecursiveMode::Recursive);
    }

    #[test]
    fn test_missing_directory_still_starts() {
        let tmp = TempDir::new().expect("tmp");
        let (watcher, _rx) = ConfigWatcher::new(&tmp.path().join("absent/production.toml"));
        assert!(watcher.run().is_ok());
    }

    #[tokio::test]
    async fn test_file_change_sends_reload_request() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("production.toml");
        fs::write(&path, "[queue]\nmaxSize = 10\n").expect("write");

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().expect("watch");

        fs::write(&path, "[queue]\nmaxSize = 20\n").expect("write");

        let request = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("reload request within timeout")
            .expect("channel open");
        assert_eq!(request.path, path);
    }

    #[tokio::test]
    async fn test_sibling_file_change_is_ignored() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("production.toml");

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().expect("watch");

        fs::write(tmp.path().join("staging.toml"), "[queue]\nmaxSize = 20\n").expect("write");

        assert!(timeout(Duration::from_millis(500), rx.recv()).await.is_err());
    }
}
