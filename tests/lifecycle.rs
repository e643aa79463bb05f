//! Reset, snapshot and publication behavior over a resolver's lifetime.

use std::fs;

use traffic_config::config::loader::load_environment_file;
use traffic_config::SharedConfig;

mod common;

use common::Fixture;

#[test]
fn test_reset_reads_changed_env_file() {
    let fx = Fixture::new();
    fx.write_env_file("[caching]\nttlSeconds = 120\n");
    let mut resolver = fx.resolver().expect("resolve");
    assert_eq!(resolver.tree().get_i64("caching.ttlSeconds"), Some(120));

    fx.write_env_file("[caching]\nttlSeconds = 30\n");
    // Nothing changes until the resolver is reset.
    assert_eq!(resolver.tree().get_i64("caching.ttlSeconds"), Some(120));

    resolver.reset().expect("reset");
    assert_eq!(resolver.tree().get_i64("caching.ttlSeconds"), Some(30));
}

#[test]
fn test_failed_reset_keeps_previous_tree() {
    let fx = Fixture::new();
    let mut resolver = fx.resolver().expect("resolve");
    let before = resolver.tree().clone();

    fx.env.set_var("LOG_LEVEL", "trace");
    let err = resolver.reset().unwrap_err();

    assert_eq!(err.validation_errors()[0].path(), "monitoring.logLevel");
    assert_eq!(resolver.tree(), &before);
}

#[test]
fn test_warnings_clear_after_file_is_fixed() {
    let fx = Fixture::new();
    fx.write_env_file("not toml at all = = =");
    let mut resolver = fx.resolver().expect("resolve");
    assert_eq!(resolver.warnings().len(), 1);

    fx.write_env_file("[queue]\nmaxSize = 10\n");
    resolver.reset().expect("reset");
    assert!(resolver.warnings().is_empty());
    assert_eq!(resolver.tree().get_i64("queue.maxSize"), Some(10));
}

#[test]
fn test_save_config_round_trips_through_loader() {
    let fx = Fixture::new();
    fx.env.set_var("RATE_LIMIT_MAX_REQUESTS", "25");
    let resolver = fx.resolver().expect("resolve");

    let target = fx.dir.path().join("snapshots/current.toml");
    let written = resolver.save_config(Some(&target)).expect("save");
    assert_eq!(written, target);

    let content = fs::read_to_string(&target).expect("read snapshot");
    assert!(content.contains("# Environment: production"));

    let loaded = load_environment_file(&target).expect("parse").expect("present");
    assert_eq!(&loaded, resolver.tree());
}

#[test]
fn test_shared_config_follows_resets() {
    let fx = Fixture::new();
    let mut resolver = fx.resolver().expect("resolve");
    let handle = SharedConfig::new(resolver.tree().clone());
    let reader = handle.clone();

    fx.env.set_var("QUEUE_CONCURRENCY", "64");
    resolver.reset().expect("reset");
    handle.publish(resolver.tree().clone());

    assert_eq!(reader.load().get_i64("queue.concurrency"), Some(64));
}

#[tokio::test]
async fn test_unparsable_edit_reloads_to_empty_file_layer() {
    use std::time::Duration;
    use traffic_config::config::watcher::ConfigWatcher;

    let fx = Fixture::new();
    fx.write_env_file("[rateLimiting]\nmaxRequests = 50\n");
    let mut resolver = fx.resolver().expect("resolve");
    let handle = SharedConfig::new(resolver.tree().clone());

    let (watcher, mut reloads) = ConfigWatcher::new(&fx.env_file());
    let _watcher = watcher.run().expect("watch");

    fx.write_env_file("[rateLimiting\nmaxRequests = ");

    let request = tokio::time::timeout(Duration::from_secs(5), reloads.recv())
        .await
        .expect("broken edit still requests a reload")
        .expect("channel open");
    assert_eq!(request.path, fx.env_file());

    resolver.reset().expect("reset");
    handle.publish(resolver.tree().clone());

    assert_eq!(handle.load().get_i64("rateLimiting.maxRequests"), Some(100));
    assert_eq!(resolver.warnings().len(), 1);
}
