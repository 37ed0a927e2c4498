//! Configuration management for the taskdeck server.
//!
//! Settings are stored as JSON in the platform application-data directory
//! (via [`DataStorage`]) and can be created either programmatically or through
//! the interactive `init` wizard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! // Load existing configuration or fall back to defaults
//! let config = Config::read()?;
//! let server = config.server.unwrap_or_default();
//! # anyhow::Ok(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default bind address for the HTTP + WebSocket server.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// HTTP + WebSocket server settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub host: String,
    /// TCP port the server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults when it is absent.
    pub fn read() -> Result<Self> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(&config_path)?;
        let config: Config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Persists the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive configuration wizard.
    ///
    /// Prompts for the server bind address, starting from the current
    /// values (or defaults on first run).
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        let current = config.server.clone().unwrap_or_default();

        let host: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfigPromptHost.to_string())
            .default(current.host)
            .interact_text()?;
        let port: u16 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfigPromptPort.to_string())
            .default(current.port)
            .interact_text()?;

        config.server = Some(ServerConfig { host, port });
        Ok(config)
    }
}
