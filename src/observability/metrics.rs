//! Configuration metrics.
//!
//! # Metrics
//! - `config_resolutions_total` (counter): full resolutions by outcome (ok, invalid)
//! - `config_updates_total` (counter): dynamic updates by outcome (applied, rejected)
//! - `config_load_warnings_total` (counter): layers that failed to load, by layer
//! - `config_reloads_total` (counter): watcher-driven reloads by outcome

pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("config_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_update(outcome: &'static str) {
    metrics::counter!("config_updates_total", "outcome" => outcome).increment(1);
}

pub fn record_load_warning(layer: &'static str) {
    metrics::counter!("config_load_warnings_total", "layer" => layer).increment(1);
}

pub fn record_reload(outcome: &'static str) {
    metrics::counter!("config_reloads_total", "outcome" => outcome).increment(1);
}
