//! Configuration loading and constants.
//!
//! All runtime configuration comes from environment variables, validated once
//! at startup. Validation collects every violated constraint before failing so
//! the operator sees the full picture in a single error, not one field at a time.

use std::fmt;

use url::Url;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Deployment environment name (development, production, or test)
pub const ENV_APP_ENV: &str = "APP_ENV";

/// HTTP listen port
pub const ENV_PORT: &str = "PORT";

/// Optional API key for downstream integrations
pub const ENV_API_KEY: &str = "API_KEY";

/// Optional database connection URL
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

// =============================================================================
// Defaults and Limits
// =============================================================================

/// Default HTTP listen port when PORT is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Requests allowed per client within one rate-limit window
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Length of the rate-limit window in seconds
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "gatehouse=debug";

/// Deployment environment, parsed from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Parse an environment name (case-insensitive). Returns `None` for
    /// anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment (default: development)
    pub environment: Environment,
    /// HTTP listen port (default: 3000)
    pub port: u16,
    /// Optional API key, passed through unvalidated
    pub api_key: Option<String>,
    /// Optional database URL, must be a well-formed URL when set
    pub database_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Validate configuration from an arbitrary variable lookup.
    ///
    /// Unset variables and empty strings are both treated as absent, so an
    /// operator can explicitly blank a variable without tripping validation.
    /// Unknown variables are never queried and therefore never rejected.
    /// Every violated constraint is collected into a single
    /// [`ConfigError::Validation`].
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| get(name).filter(|v| !v.is_empty());
        let mut errors = Vec::new();

        let environment = match get(ENV_APP_ENV) {
            Some(raw) => Environment::parse(&raw).unwrap_or_else(|| {
                errors.push(format!(
                    "{ENV_APP_ENV}: must be one of development, production, test (got '{raw}')"
                ));
                Environment::default()
            }),
            None => Environment::default(),
        };

        let port = match get(ENV_PORT) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(p @ 1..=65535) => p as u16,
                Ok(p) => {
                    errors.push(format!("{ENV_PORT}: must be between 1 and 65535 (got {p})"));
                    DEFAULT_PORT
                }
                Err(_) => {
                    errors.push(format!("{ENV_PORT}: must be an integer (got '{raw}')"));
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let api_key = get(ENV_API_KEY);

        let database_url = get(ENV_DATABASE_URL);
        if let Some(raw) = &database_url {
            if let Err(e) = Url::parse(raw) {
                errors.push(format!("{ENV_DATABASE_URL}: must be a valid URL ({e})"));
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(Self {
            environment,
            port,
            api_key,
            database_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|name| vars.get(name).cloned())
    }

    fn validation_messages(err: ConfigError) -> Vec<String> {
        let ConfigError::Validation(messages) = err;
        messages
    }

    #[test]
    fn empty_environment_applies_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.api_key.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn environment_name_is_case_insensitive() {
        let config = config_from(&[("APP_ENV", "PRODUCTION")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn unknown_environment_name_fails() {
        let err = config_from(&[("APP_ENV", "staging")]).unwrap_err();
        let messages = validation_messages(err);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("APP_ENV"));
        assert!(messages[0].contains("staging"));
    }

    #[test]
    fn valid_port_is_retained() {
        let config = config_from(&[("PORT", "4000")]).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn out_of_range_port_fails() {
        let err = config_from(&[("PORT", "70000")]).unwrap_err();
        assert!(validation_messages(err)[0].contains("between 1 and 65535"));

        let err = config_from(&[("PORT", "0")]).unwrap_err();
        assert!(validation_messages(err)[0].contains("between 1 and 65535"));
    }

    #[test]
    fn non_numeric_port_fails() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(validation_messages(err)[0].contains("must be an integer"));
    }

    #[test]
    fn valid_database_url_is_retained() {
        let config = config_from(&[("DATABASE_URL", "postgres://db.example.com/app")]).unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://db.example.com/app")
        );
    }

    #[test]
    fn malformed_database_url_fails() {
        let err = config_from(&[("DATABASE_URL", "not a url")]).unwrap_err();
        assert!(validation_messages(err)[0].contains("DATABASE_URL"));
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let config = config_from(&[
            ("APP_ENV", ""),
            ("PORT", ""),
            ("API_KEY", ""),
            ("DATABASE_URL", ""),
        ])
        .unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.api_key.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn all_violations_are_reported_together() {
        let err = config_from(&[
            ("APP_ENV", "staging"),
            ("PORT", "70000"),
            ("DATABASE_URL", "::::"),
        ])
        .unwrap_err();
        let messages = validation_messages(err);
        assert_eq!(messages.len(), 3);

        let joined = messages.join("; ");
        assert!(joined.contains("APP_ENV"));
        assert!(joined.contains("PORT"));
        assert!(joined.contains("DATABASE_URL"));
    }

    #[test]
    fn api_key_is_accepted_as_is() {
        let config = config_from(&[("API_KEY", "s3cr3t")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("s3cr3t"));
    }
}
