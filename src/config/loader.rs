//! Host configuration loading from disk.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::normalize::is_url;
use crate::config::schema::HostConfig;

/// Error type for host configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bind_address {0:?} is not a valid socket address")]
    BindAddress(String),
    #[error("base_url {0:?} must start with '/'")]
    BaseUrl(String),
    #[error("{field} {value:?} must be an absolute URL")]
    OverrideUrl { field: &'static str, value: String },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a host configuration from a TOML file.
pub fn load_host_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: HostConfig = toml::from_str(&content)?;

    let errors = validate(&config);
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }
    Ok(config)
}

/// Semantic validation; serde already handled the syntactic layer.
///
/// All failures are reported, not just the first.
pub fn validate(config: &HostConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.bind_address.clone()));
    }
    if !config.base_url.starts_with('/') {
        errors.push(ValidationError::BaseUrl(config.base_url.clone()));
    }
    for (field, value) in [
        ("override_static_url", &config.override_static_url),
        ("override_theme_url", &config.override_theme_url),
    ] {
        if let Some(value) = value {
            if !value.is_empty() && !is_url(value) && !value.starts_with('/') {
                errors.push(ValidationError::OverrideUrl {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&HostConfig::default()).is_empty());
    }

    #[test]
    fn reports_all_failures() {
        let config = HostConfig {
            bind_address: "not-an-address".to_string(),
            base_url: "vitrina".to_string(),
            override_static_url: Some("cdn.example.com/assets".to_string()),
            ..HostConfig::default()
        };
        let errors = validate(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn local_path_override_is_accepted() {
        let config = HostConfig {
            override_theme_url: Some("/mirrored/themes".to_string()),
            ..HostConfig::default()
        };
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn parses_minimal_toml() {
        let config: HostConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0:9000"
            file_to_run = "report.ipynb"
            "#,
        )
        .expect("minimal config parses");
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert!(config.single_document_mode());
        assert!(config.cache_files);
    }
}
