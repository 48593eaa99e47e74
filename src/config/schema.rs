//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the blog.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the blog server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BlogConfig {
    /// Deployment environment.
    pub environment: Environment,

    /// HTTP server settings (bind address, static files, limits).
    pub server: ServerConfig,

    /// Upstream posts API settings.
    pub api: ApiConfig,

    /// Listing page settings.
    pub pagination: PaginationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deployment environment.
///
/// Development mode logs raw transport failures before they are normalized.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3030").
    pub bind_address: String,

    /// Directory served for static assets (stylesheet, images).
    pub static_dir: String,

    /// Total time allowed for one inbound request, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body (form submissions), in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3030".to_string(),
            static_dir: "public".to_string(),
            request_timeout_secs: 90,
            body_limit_bytes: 64 * 1024,
        }
    }
}

/// Upstream REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto.
    pub base_url: String,

    /// Transport timeout in seconds.
    pub timeout_secs: u64,

    /// Optional external status message table (TOML or JSON).
    pub status_messages_path: Option<String>,

    /// Surface non-2xx responses as transport failures instead of
    /// normalizing their bodies.
    pub reject_error_status: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_secs: 60,
            status_messages_path: Some("config/status_messages.toml".to_string()),
            reject_error_status: false,
        }
    }
}

/// Listing page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Posts shown per page.
    pub per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { per_page: 12 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address the Prometheus exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "http_blog=debug,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BlogConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.bind_address, "0.0.0.0:3030");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.pagination.per_page, 12);
        assert!(!config.api.reject_error_status);
    }

    #[test]
    fn test_partial_toml() {
        let config: BlogConfig = toml::from_str(
            r#"
            environment = "production"

            [api]
            base_url = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert!(!config.environment.is_development());
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        // Untouched fields keep their defaults
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.pagination.per_page, 12);
    }
}
