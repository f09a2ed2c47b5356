use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint. Span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut loaded: Config = config.try_deserialize()?;
        loaded.apply_process_env();
        Ok(loaded)
    }

    /// Plain `ENVIRONMENT` and `OTLP_ENDPOINT` variables take precedence over
    /// the `APP__`-prefixed settings.
    fn apply_process_env(&mut self) {
        if let Ok(environment) = env::var("ENVIRONMENT") {
            self.environment = environment;
        }
        if let Ok(endpoint) = env::var("OTLP_ENDPOINT") {
            self.otlp_endpoint = Some(endpoint);
        }
    }

    pub fn is_prod(&self) -> bool {
        self.environment == "prod"
    }
}

/// Read an environment variable, falling back to `default` outside production.
///
/// In production every variable is mandatory, defaults are ignored.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_uses_default_outside_prod() {
        let value = get_env("SERVICE_CORE_TEST_UNSET_A", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env("SERVICE_CORE_TEST_UNSET_B", Some("fallback"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let err = get_env("SERVICE_CORE_TEST_UNSET_C", None, false).unwrap_err();
        assert!(err.to_string().contains("SERVICE_CORE_TEST_UNSET_C is required"));
    }

    #[test]
    fn plain_environment_variables_override_settings() {
        // SAFETY: the only test in this crate that touches these variables.
        unsafe {
            env::set_var("ENVIRONMENT", "prod");
            env::set_var("OTLP_ENDPOINT", "http://collector:4317");
        }

        let config = Config::load();

        unsafe {
            env::remove_var("ENVIRONMENT");
            env::remove_var("OTLP_ENDPOINT");
        }

        let config = config.unwrap();
        assert!(config.is_prod());
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn defaults_apply_to_empty_source() {
        let config: Config = Cfg::builder().build().unwrap().try_deserialize().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "dev");
        assert_eq!(config.log_level, "info");
        assert!(config.otlp_endpoint.is_none());
        assert!(!config.is_prod());
    }
}
