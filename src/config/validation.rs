//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and addresses.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::BlogConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid API base URL '{0}'")]
    BaseUrl(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &BlogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    match url::Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::BaseUrl(config.api.base_url.clone())),
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "server.request_timeout_secs" });
    }
    if config.server.body_limit_bytes == 0 {
        errors.push(ValidationError::Zero { field: "server.body_limit_bytes" });
    }
    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "api.timeout_secs" });
    }
    if config.pagination.per_page == 0 {
        errors.push(ValidationError::Zero { field: "pagination.per_page" });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BlogConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BlogConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.api.base_url = "ftp://example.com".into();
        config.pagination.per_page = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Zero { field: "pagination.per_page" }));
        assert_eq!(
            errors[0].to_string(),
            "invalid bind address 'not-an-address'"
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = BlogConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MetricsAddress("nope".into())]);
    }
}
