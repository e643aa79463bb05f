//! Settings catalog and typed section views.
//!
//! Every known setting is declared once in [`SETTINGS`]: its dotted path, the
//! environment variable bound to it, and its default. The defaults layer and the
//! environment-variable layer are both derived from this table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::env::{coerce_env_value, split_list};
use crate::config::tree::ConfigTree;
use crate::config::value::ConfigValue;

/// Typed default for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(&'static str),
    List(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(self) -> ConfigValue {
        match self {
            DefaultValue::Integer(n) => ConfigValue::Integer(n),
            DefaultValue::Float(x) => ConfigValue::Float(x),
            DefaultValue::Bool(b) => ConfigValue::Bool(b),
            DefaultValue::Str(s) => ConfigValue::String(s.to_string()),
            DefaultValue::List(items) => {
                ConfigValue::List(items.iter().map(|item| item.to_string()).collect())
            }
        }
    }
}

/// A single catalog entry binding a config path to an environment variable.
#[derive(Debug, Clone, Copy)]
pub struct Setting {
    pub path: &'static str,
    pub env: &'static str,
    pub default: DefaultValue,
}

impl Setting {
    /// Coerce a raw variable value for this setting.
    ///
    /// List settings take comma-separated input; everything else goes through
    /// the generic coercion rules.
    pub fn coerce(&self, raw: &str) -> ConfigValue {
        match self.default {
            DefaultValue::List(_) => ConfigValue::List(split_list(raw)),
            _ => coerce_env_value(raw),
        }
    }
}

const fn setting(path: &'static str, env: &'static str, default: DefaultValue) -> Setting {
    Setting { path, env, default }
}

use DefaultValue::{Bool, Float, Integer, List, Str};

/// All known settings, grouped by section.
pub const SETTINGS: &[Setting] = &[
    // Server
    setting("server.host", "HOST", Str("0.0.0.0")),
    setting("server.port", "PORT", Integer(5000)),
    setting("server.requestTimeoutMs", "REQUEST_TIMEOUT_MS", Integer(30_000)),
    // Rate limiting
    setting("rateLimiting.windowMs", "RATE_LIMIT_WINDOW_MS", Integer(900_000)),
    setting("rateLimiting.maxRequests", "RATE_LIMIT_MAX_REQUESTS", Integer(100)),
    setting("rateLimiting.skipSuccessfulRequests", "RATE_LIMIT_SKIP_SUCCESSFUL", Bool(false)),
    setting("rateLimiting.skipFailedRequests", "RATE_LIMIT_SKIP_FAILED", Bool(false)),
    setting("rateLimiting.standardHeaders", "RATE_LIMIT_STANDARD_HEADERS", Bool(true)),
    setting(
        "rateLimiting.message",
        "RATE_LIMIT_MESSAGE",
        Str("Too many requests, please try again later."),
    ),
    // Load balancing
    setting("loadBalancing.strategy", "LOAD_BALANCER_STRATEGY", Str("round-robin")),
    setting("loadBalancing.servers", "LOAD_BALANCER_SERVERS", List(&["localhost:5000"])),
    setting("loadBalancing.healthCheckIntervalMs", "LB_HEALTH_CHECK_INTERVAL", Integer(30_000)),
    setting("loadBalancing.maxRetries", "LB_MAX_RETRIES", Integer(3)),
    setting("loadBalancing.retryDelayMs", "LB_RETRY_DELAY", Integer(1_000)),
    setting("loadBalancing.stickySessions", "LB_STICKY_SESSIONS", Bool(false)),
    // Database connection pool
    setting("database.uri", "MONGODB_URI", Str("mongodb://localhost:27017/pastpapers")),
    setting("database.maxConnections", "DB_MAX_CONNECTIONS", Integer(10)),
    setting("database.minConnections", "DB_MIN_CONNECTIONS", Integer(2)),
    setting("database.acquireTimeoutMs", "DB_ACQUIRE_TIMEOUT", Integer(30_000)),
    setting("database.idleTimeoutMs", "DB_IDLE_TIMEOUT", Integer(10_000)),
    // Redis connection pool
    setting("redis.host", "REDIS_HOST", Str("localhost")),
    setting("redis.port", "REDIS_PORT", Integer(6379)),
    setting("redis.password", "REDIS_PASSWORD", Str("")),
    setting("redis.db", "REDIS_DB", Integer(0)),
    setting("redis.keyPrefix", "REDIS_KEY_PREFIX", Str("traffic:")),
    setting("redis.maxConnections", "REDIS_MAX_CONNECTIONS", Integer(20)),
    // Request queue
    setting("queue.maxSize", "QUEUE_MAX_SIZE", Integer(1_000)),
    setting("queue.concurrency", "QUEUE_CONCURRENCY", Integer(10)),
    setting("queue.timeoutMs", "QUEUE_TIMEOUT", Integer(30_000)),
    setting("queue.retryAttempts", "QUEUE_RETRY_ATTEMPTS", Integer(3)),
    setting("queue.priorityLevels", "QUEUE_PRIORITY_LEVELS", Integer(3)),
    // Security
    setting("security.corsOrigins", "CORS_ORIGIN", List(&["http://localhost:3000"])),
    setting("security.helmetEnabled", "SECURITY_HELMET", Bool(true)),
    setting("security.maxBodySize", "MAX_BODY_SIZE", Str("10mb")),
    setting("security.trustProxy", "TRUST_PROXY", Bool(false)),
    setting("security.apiKeyRequired", "API_KEY_REQUIRED", Bool(false)),
    setting("security.ddosProtection", "DDOS_PROTECTION", Bool(true)),
    setting("security.blockedIps", "BLOCKED_IPS", List(&[])),
    // Monitoring
    setting("monitoring.logLevel", "LOG_LEVEL", Str("info")),
    setting("monitoring.metricsEnabled", "METRICS_ENABLED", Bool(true)),
    setting("monitoring.metricsIntervalMs", "METRICS_INTERVAL", Integer(60_000)),
    setting("monitoring.alertThresholds.errorRate", "ALERT_ERROR_RATE", Float(0.05)),
    setting("monitoring.alertThresholds.responseTimeMs", "ALERT_RESPONSE_TIME", Integer(2_000)),
    setting("monitoring.alertThresholds.memoryUsage", "ALERT_MEMORY_USAGE", Float(0.9)),
    // Caching
    setting("caching.enabled", "CACHE_ENABLED", Bool(true)),
    setting("caching.ttlSeconds", "CACHE_TTL", Integer(3_600)),
    setting("caching.maxEntries", "CACHE_MAX_ENTRIES", Integer(1_000)),
    setting("caching.strategy", "CACHE_STRATEGY", Str("lru")),
    // Scaling
    setting("scaling.autoScale", "AUTO_SCALE", Bool(false)),
    setting("scaling.minInstances", "MIN_INSTANCES", Integer(1)),
    setting("scaling.maxInstances", "MAX_INSTANCES", Integer(10)),
    setting("scaling.cpuThreshold", "SCALE_CPU_THRESHOLD", Float(0.8)),
    setting("scaling.memoryThreshold", "SCALE_MEMORY_THRESHOLD", Float(0.85)),
    setting("scaling.cooldownMs", "SCALE_COOLDOWN", Integer(300_000)),
    // Circuit breaker
    setting("circuitBreaker.failureThreshold", "CIRCUIT_BREAKER_THRESHOLD", Integer(5)),
    setting("circuitBreaker.resetTimeoutMs", "CIRCUIT_BREAKER_TIMEOUT", Integer(60_000)),
    // Health checks
    setting("healthCheck.enabled", "HEALTH_CHECK_ENABLED", Bool(true)),
    setting("healthCheck.path", "HEALTH_CHECK_PATH", Str("/health")),
    setting("healthCheck.intervalMs", "HEALTH_CHECK_INTERVAL", Integer(30_000)),
    setting("healthCheck.timeoutMs", "HEALTH_CHECK_TIMEOUT", Integer(5_000)),
    setting("healthCheck.unhealthyThreshold", "HEALTH_UNHEALTHY_THRESHOLD", Integer(3)),
    setting("healthCheck.healthyThreshold", "HEALTH_HEALTHY_THRESHOLD", Integer(2)),
];

/// Find the catalog entry for a dotted path.
pub fn find_setting(path: &str) -> Option<&'static Setting> {
    SETTINGS.iter().find(|setting| setting.path == path)
}

/// Build the defaults layer from the catalog.
pub fn defaults() -> ConfigTree {
    let mut tree = ConfigTree::new();
    for setting in SETTINGS {
        tree.set(setting.path, setting.default.to_value());
    }
    tree
}

/// Load-balancing algorithms a consumer may be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadBalancingStrategy {
    RoundRobin,
    Weighted,
    LeastConnections,
    ResponseTime,
}

impl LoadBalancingStrategy {
    pub const ALL: [LoadBalancingStrategy; 4] = [
        LoadBalancingStrategy::RoundRobin,
        LoadBalancingStrategy::Weighted,
        LoadBalancingStrategy::LeastConnections,
        LoadBalancingStrategy::ResponseTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoadBalancingStrategy::RoundRobin => "round-robin",
            LoadBalancingStrategy::Weighted => "weighted",
            LoadBalancingStrategy::LeastConnections => "least-connections",
            LoadBalancingStrategy::ResponseTime => "response-time",
        }
    }
}

impl FromStr for LoadBalancingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("unknown load balancing strategy \"{}\"", s))
    }
}

impl fmt::Display for LoadBalancingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log levels accepted by `monitoring.logLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown log level \"{}\"", s))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of the `rateLimiting` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitingSettings {
    /// Window length in milliseconds.
    pub window_ms: u64,

    /// Requests allowed per client per window.
    pub max_requests: u64,

    #[serde(default)]
    pub skip_successful_requests: bool,

    #[serde(default)]
    pub skip_failed_requests: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// Typed view of the `loadBalancing` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancingSettings {
    pub strategy: LoadBalancingStrategy,

    /// Upstream addresses (e.g., "10.0.0.5:5000").
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default)]
    pub max_retries: u32,

    #[serde(default)]
    pub sticky_sessions: bool,
}

/// Typed view of the `monitoring` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSettings {
    pub log_level: LogLevel,

    #[serde(default)]
    pub metrics_enabled: bool,
}
