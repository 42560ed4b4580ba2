use secrecy::Secret;
use serde::Deserialize;

use crate::token::TokenConfig;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Reset token TTL must be strictly shorter than the session TTL")]
    ResetTtlNotShorter,
    #[error("Token TTLs must be positive")]
    NonPositiveTtl,
}

/// Service settings, layered from an optional `gatehouse.toml` and
/// `GATEHOUSE_`-prefixed environment variables (e.g.
/// `GATEHOUSE_AUTH__SIGNING_SECRET`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    pub postgres: Option<PostgresSettings>,
    pub redis: Option<RedisSettings>,
    pub notifier: Option<NotifierSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HMAC signing secret. When unset the server falls back to an
    /// ephemeral key and tokens do not survive a restart.
    pub signing_secret: Option<Secret<String>>,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_seconds: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            signing_secret: None,
            session_ttl_seconds: default_session_ttl(),
            reset_ttl_seconds: default_reset_ttl(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name("gatehouse").required(false))
            .add_source(config::Environment::with_prefix("GATEHOUSE").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.auth.session_ttl_seconds <= 0 || self.auth.reset_ttl_seconds <= 0 {
            return Err(SettingsError::NonPositiveTtl);
        }
        if self.auth.reset_ttl_seconds >= self.auth.session_ttl_seconds {
            return Err(SettingsError::ResetTtlNotShorter);
        }
        Ok(self)
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            session_ttl_seconds: self.auth.session_ttl_seconds,
            reset_ttl_seconds: self.auth.reset_ttl_seconds,
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_owned()
}

fn default_session_ttl() -> i64 {
    3600
}

fn default_reset_ttl() -> i64 {
    900
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_ttls(session: i64, reset: i64) -> Settings {
        Settings {
            bind_address: default_bind_address(),
            auth: AuthSettings {
                signing_secret: None,
                session_ttl_seconds: session,
                reset_ttl_seconds: reset,
            },
            cors: CorsSettings::default(),
            postgres: None,
            redis: None,
            notifier: None,
        }
    }

    #[test]
    fn test_defaults_pass_validation() {
        let settings = settings_with_ttls(default_session_ttl(), default_reset_ttl());
        let validated = settings.validate().unwrap();

        assert_eq!(validated.auth.session_ttl_seconds, 3600);
        assert_eq!(validated.auth.reset_ttl_seconds, 900);
        assert_eq!(validated.token_config().reset_ttl_seconds, 900);
    }

    #[test]
    fn test_reset_ttl_must_be_strictly_shorter() {
        let result = settings_with_ttls(900, 900).validate();
        assert!(matches!(result, Err(SettingsError::ResetTtlNotShorter)));

        let result = settings_with_ttls(900, 3600).validate();
        assert!(matches!(result, Err(SettingsError::ResetTtlNotShorter)));
    }

    #[test]
    fn test_ttls_must_be_positive() {
        let result = settings_with_ttls(3600, 0).validate();
        assert!(matches!(result, Err(SettingsError::NonPositiveTtl)));

        let result = settings_with_ttls(-1, -2).validate();
        assert!(matches!(result, Err(SettingsError::NonPositiveTtl)));
    }
}
