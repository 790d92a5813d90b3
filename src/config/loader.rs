//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read configuration from a TOML file without semantic validation.
///
/// Callers that adjust the result (command-line overrides) must run
/// [`validate_config`] themselves before using it.
pub fn read_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Environment;

    #[test]
    fn parses_valid_config() {
        let config = parse_config(
            r#"
            [tenancy]
            environment = "production"
            base_domain = "example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.tenancy.environment, Environment::Production);
    }

    #[test]
    fn rejects_empty_base_domain() {
        let err = parse_config("[tenancy]\nbase_domain = \"\"\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::EmptyBaseDomain]);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn validation_message_lists_all_errors() {
        let err = parse_config(
            r#"
            [tenancy]
            base_domain = ""
            [timeouts]
            connect_secs = 0
            "#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("base_domain must not be empty"), "{message}");
        assert!(message.contains("timeouts.connect_secs"), "{message}");
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = parse_config("[tenancy]\nenvironment = \"staging\"\nbase_domain = \"example.com\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/tenant-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
