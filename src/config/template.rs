//! Example environment file for operator documentation.

/// Hard-coded example environment file.
const TEMPLATE: &str = r#"# Example environment file for traffic-config.
#
# Save as <config-dir>/<environment>.toml (e.g. config/environments/production.toml).
# Any value here can still be overridden by its environment variable.

[server]
port = 8080                        # PORT
requestTimeoutMs = 15000           # REQUEST_TIMEOUT_MS

[rateLimiting]
windowMs = 60000                   # RATE_LIMIT_WINDOW_MS
maxRequests = 50                   # RATE_LIMIT_MAX_REQUESTS
standardHeaders = true

[loadBalancing]
# One of: round-robin, weighted, least-connections, response-time
strategy = "least-connections"     # LOAD_BALANCER_STRATEGY
servers = ["10.0.0.11:5000", "10.0.0.12:5000"]
maxRetries = 2

[database]
maxConnections = 50                # DB_MAX_CONNECTIONS
minConnections = 5

[redis]
host = "redis.internal"            # REDIS_HOST
port = 6379

[queue]
maxSize = 5000                     # QUEUE_MAX_SIZE
concurrency = 25

[security]
corsOrigins = ["https://app.example.com"]   # CORS_ORIGIN (comma-separated)
trustProxy = true

[monitoring]
# One of: error, warn, info, debug
logLevel = "warn"                  # LOG_LEVEL

[monitoring.alertThresholds]
errorRate = 0.02
responseTimeMs = 1500

[caching]
ttlSeconds = 600

[scaling]
autoScale = true
maxInstances = 20

[healthCheck]
intervalMs = 10000
"#;

/// The example environment file, independent of any live resolver.
pub fn render() -> &'static str {
    TEMPLATE
}
