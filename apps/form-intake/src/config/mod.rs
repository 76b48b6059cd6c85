//! Configuration module for the form intake service.
//!
//! Configuration is loaded from YAML, interpolated with environment
//! variables, validated, and then handed to the container. Nothing reads
//! credentials from process-wide constants.
//!
//! # Usage
//!
//! ```rust,ignore
//! use form_intake::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("deploy/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod database;
mod intake;
mod observability;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::{DatabaseConfig, DatabaseDriver};
pub use intake::IntakeConfig;
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Submission handling configuration.
    #[serde(default)]
    pub intake: IntakeConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. An unset or empty
/// variable without a default becomes the empty string.
#[allow(clippy::expect_used)] // Regex is a compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first offending key.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let db = &config.database;

    if db.database.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "database.database must not be empty".to_string(),
        ));
    }

    if db.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be positive".to_string(),
        ));
    }

    if db.acquire_timeout_ms == 0 || db.statement_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "database.acquire_timeout_ms and database.statement_timeout_ms must be positive"
                .to_string(),
        ));
    }

    if config.intake.rating_scale().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "intake.rating_min ({}) must not exceed intake.rating_max ({})",
            config.intake.rating_min, config.intake.rating_max
        )));
    }

    if !config.intake.confirmation_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "intake.confirmation_path must start with '/'".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::QuantityParsing;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.database.driver, DatabaseDriver::Mysql);
        assert_eq!(config.database.port, 3306);
        assert!(!config.database.auto_migrate);
        assert_eq!(config.intake.quantity_parsing, QuantityParsing::Strict);
        assert_eq!(config.intake.rating_min, 1);
        assert_eq!(config.intake.rating_max, 5);
        assert!(!config.intake.verify_product_exists);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_minimal_config() {
        let yaml = r"
server:
  http_port: 9000
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.intake.confirmation_path, "/order-confirmation");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "host: ${FORM_INTAKE_TEST_NONEXISTENT_VAR:-db.internal}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "host: db.internal");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "password: ${FORM_INTAKE_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "password: ");
    }

    #[test]
    fn test_validation_inverted_rating_scale() {
        let yaml = r"
intake:
  rating_min: 5
  rating_max: 1
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for inverted rating scale");
        };
        assert!(err.to_string().contains("rating_min"));
    }

    #[test]
    fn test_validation_zero_statement_timeout() {
        let yaml = r"
database:
  statement_timeout_ms: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero timeout");
        };
        assert!(err.to_string().contains("statement_timeout_ms"));
    }

    #[test]
    fn test_validation_relative_confirmation_path() {
        let yaml = r"
intake:
  confirmation_path: confirm
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for relative path");
        };
        assert!(err.to_string().contains("confirmation_path"));
    }

    #[test]
    fn test_validation_unknown_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_unknown_quantity_parsing_is_parse_error() {
        let yaml = r"
intake:
  quantity_parsing: fuzzy
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected parse error");
        };
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_read_error_names_path() {
        let Err(err) = load_config(Some("/nonexistent/form-intake.yaml")) else {
            panic!("expected read error");
        };
        assert!(err.to_string().contains("/nonexistent/form-intake.yaml"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8081
  bind_address: "127.0.0.1"

database:
  driver: sqlite
  database: "./data/intake.db"
  max_connections: 4
  acquire_timeout_ms: 500
  statement_timeout_ms: 1500
  auto_migrate: true

intake:
  quantity_parsing: lenient
  rating_min: 0
  rating_max: 10
  confirmation_path: "/thanks"
  verify_product_exists: true

observability:
  logging:
    level: "debug"
    format: "pretty"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.server.listen_address(), "127.0.0.1:8081");
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.database.max_connections, 4);
        assert!(config.database.auto_migrate);
        assert_eq!(config.intake.quantity_parsing, QuantityParsing::Lenient);
        assert_eq!(config.intake.rating_scale().map(|s| s.max()), Some(10));
        assert!(config.intake.verify_product_exists);
        assert_eq!(config.observability.logging.format, "pretty");
    }
}
