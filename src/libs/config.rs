//! Configuration management for the engage application.
//!
//! Settings live in a pretty-printed `config.json` inside the platform data
//! directory resolved by [`DataStorage`]. Every section is optional: a missing
//! file, or a missing section, falls back to defaults, so the tool works with
//! zero setup and `engage init` only has to be run to change something.
//!
//! ## Sections
//!
//! - **server**: listen address and CORS policy of the REST service
//! - **import**: limits applied to uploaded CSV documents
//!
//! ## Usage
//!
//! ```rust,no_run
//! use engage::libs::config::Config;
//!
//! let config = Config::read()?;
//! let server = config.server.unwrap_or_default();
//! println!("listening on {}:{}", server.host, server.port);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// REST service settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1` or `0.0.0.0`.
    pub host: String,

    /// TCP port to listen on. The dashboard front end expects 8000.
    pub port: u16,

    /// Answer CORS preflights for any origin.
    ///
    /// The dashboard is usually served from a different port during
    /// development, so this is on by default.
    pub allow_any_origin: bool,
}

/// Limits for CSV uploads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImportConfig {
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allow_any_origin: true,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "server".to_string(),
            name: "Server".to_string(),
        }
    }
}

impl ImportConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "import".to_string(),
            name: "Import".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration file, or defaults when it does not exist yet.
    pub fn read() -> Result<Config> {
        Self::read_from(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, replacing any previous file.
    pub fn save(&self) -> Result<()> {
        self.save_to(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive setup wizard, starting from the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![ServerConfig::module(), ImportConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        host: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerHost.to_string())
                            .default(default.host)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                        allow_any_origin: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptAllowAnyOrigin.to_string())
                            .default(default.allow_any_origin)
                            .interact()?,
                    });
                }
                "import" => {
                    let default = config.import.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleImport);
                    config.import = Some(ImportConfig {
                        max_upload_bytes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxUploadBytes.to_string())
                            .default(default.max_upload_bytes)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
