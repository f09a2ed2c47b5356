use secrecy::{ExposeSecret, Secret};
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;

/// Legacy FCM HTTP endpoint.
pub const DEFAULT_FCM_GATEWAY_URL: &str = "https://fcm.googleapis.com/fcm/send";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub fcm: FcmConfig,
}

#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub gateway_url: String,
    /// Legacy FCM server key, sent as `Authorization: key=<server_key>`.
    pub server_key: Secret<String>,
}

impl FcmConfig {
    pub fn has_server_key(&self) -> bool {
        !self.server_key.expose_secret().is_empty()
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();

        Ok(RelayConfig {
            fcm: FcmConfig {
                gateway_url: get_env("FCM_GATEWAY_URL", Some(DEFAULT_FCM_GATEWAY_URL), false)?,
                server_key: Secret::new(get_env("FIREBASE_SERVER_KEY", Some(""), is_prod)?),
            },
            common: common_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_key_is_redacted_in_debug_output() {
        let fcm = FcmConfig {
            gateway_url: DEFAULT_FCM_GATEWAY_URL.to_string(),
            server_key: Secret::new("AAAA-super-secret".to_string()),
        };

        let rendered = format!("{:?}", fcm);
        assert!(!rendered.contains("AAAA-super-secret"));
        assert!(fcm.has_server_key());
    }

    #[test]
    fn production_requires_server_key() {
        // The only test in this crate that touches the process environment.
        std::env::set_var("ENVIRONMENT", "prod");
        std::env::remove_var("FIREBASE_SERVER_KEY");

        let result = RelayConfig::load();

        std::env::remove_var("ENVIRONMENT");

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("FIREBASE_SERVER_KEY"));
    }

    #[test]
    fn empty_server_key_is_reported_missing() {
        let fcm = FcmConfig {
            gateway_url: DEFAULT_FCM_GATEWAY_URL.to_string(),
            server_key: Secret::new(String::new()),
        };

        assert!(!fcm.has_server_key());
    }
}
