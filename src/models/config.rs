use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Minimum length of the cookie secret accepted by `Key::derive_from`.
pub const MIN_SECRET_LEN: usize = 32;

/// Runtime configuration of the web application.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the travel offers REST API, including the `/api` prefix.
    pub api_url: String,
    /// Signs and encrypts the session and flash message cookies.
    pub secret: String,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_static_dir() -> String {
    "assets".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load `config/default.yaml`, then `config/{APP_ENV}.yaml` when present,
    /// then `APP__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize and validate an already assembled configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let server: Self = config.try_deserialize()?;
        server.validate()?;
        Ok(server)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Message("api_url must not be empty".into()));
        }
        Ok(())
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
