//! Configuration management

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub messenger: MessengerConfig,
    pub nlu: NluConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Messenger platform credentials and Send API location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MessengerConfig {
    pub page_access_token: Option<String>,
    pub verify_token: Option<String>,
    /// When set, POSTed webhook bodies must carry a valid X-Hub-Signature-256
    #[serde(default)]
    pub app_secret: Option<String>,
    pub api_base: String,
    pub api_version: String,
}

/// Wit.ai credentials and API location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NluConfig {
    pub server_token: Option<String>,
    pub api_base: String,
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "helpline-bot".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            messenger: MessengerConfig {
                page_access_token: None,
                verify_token: None,
                app_secret: None,
                api_base: "https://graph.facebook.com".to_string(),
                api_version: "v2.6".to_string(),
            },
            nlu: NluConfig {
                server_token: None,
                api_base: "https://api.wit.ai".to_string(),
                api_version: "20160526".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load `path` if it exists, else start from defaults; env applies on top.
    ///
    /// A file that exists but does not parse is an error, never a silent default.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Overlay environment variables on top of the current values
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("FB_PAGE_ACCESS_TOKEN") {
            self.messenger.page_access_token = Some(token);
        }

        if let Ok(token) = std::env::var("FB_HUB_VERIFY_TOKEN") {
            self.messenger.verify_token = Some(token);
        }

        if let Ok(secret) = std::env::var("FB_APP_SECRET") {
            self.messenger.app_secret = Some(secret);
        }

        if let Ok(token) = std::env::var("WIT_AI_SERVER_TOKEN") {
            self.nlu.server_token = Some(token);
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
    }

    /// Check that every secret needed to serve the webhook is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.is_empty())
        }

        if !present(&self.messenger.page_access_token) {
            return Err(ConfigError::MissingField("messenger.page-access-token".to_string()));
        }
        if !present(&self.messenger.verify_token) {
            return Err(ConfigError::MissingField("messenger.verify-token".to_string()));
        }
        if !present(&self.nlu.server_token) {
            return Err(ConfigError::MissingField("nlu.server-token".to_string()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("server address: {}", e)))
    }
}
