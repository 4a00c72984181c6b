// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub fact: FactConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Path of the classification endpoint
    #[serde(default = "default_classify_path")]
    pub classify_path: String,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

#[allow(clippy::missing_const_for_fn)]
fn default_classify_path() -> String {
    "/api/classify-number".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            classify_path: default_classify_path(),
            health: HealthConfig::default(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Fun fact provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FactConfig {
    /// Query the remote provider (false: always use the local fallback)
    #[serde(default = "default_fact_enabled")]
    pub enabled: bool,
    /// Provider base address, without trailing slash
    #[serde(default = "default_fact_base_url")]
    pub base_url: String,
    /// Trivia category path segment
    #[serde(default = "default_fact_category")]
    pub category: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_fact_timeout_ms")]
    pub timeout_ms: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_fact_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_fact_base_url() -> String {
    "http://numbersapi.com".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_fact_category() -> String {
    "math".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_fact_timeout_ms() -> u64 {
    5000
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            enabled: default_fact_enabled(),
            base_url: default_fact_base_url(),
            category: default_fact_category(),
            timeout_ms: default_fact_timeout_ms(),
        }
    }
}
