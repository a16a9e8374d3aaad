//! Configuration management for the taskboard application.
//!
//! Settings are stored as JSON in the platform-specific data directory
//! resolved by [`DataStorage`]. A missing file is not an error: every
//! section has defaults, so the application runs without any setup.
//!
//! ## Configuration Structure
//!
//! - **Storage**: file holding the durable key-value storage and the key the
//!   project map is written under
//! - **Seed**: the project and task created when no saved state exists
//! - **Start page**: page shown when the application starts or a page reset
//!   is requested
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskboard::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.start_page = "All Tasks".to_string();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use super::pages::{Page, TODAY};
use super::store::validate_project_name;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable section shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Where the durable key-value storage lives.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// File name of the key-value storage inside the data directory.
    pub file_name: String,

    /// Storage key the project map is persisted under.
    pub key: String,
}

/// Default content created when no saved projects exist.
///
/// The seed is also what a corrupted storage is replaced with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SeedConfig {
    pub project: String,
    pub task_title: String,
    pub task_description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    /// Page displayed on start and after a page reset.
    #[serde(default = "default_start_page")]
    pub start_page: String,
}

fn default_start_page() -> String {
    TODAY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file_name: "storage.json".to_string(),
            key: "projects".to_string(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            project: "Test".to_string(),
            task_title: "Test".to_string(),
            task_description: "Test".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig::default(),
            seed: SeedConfig::default(),
            start_page: default_start_page(),
        }
    }
}

impl Config {
    /// Reads configuration from the data directory.
    ///
    /// Returns the default configuration when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Starts from the saved configuration (or defaults), lets the user pick
    /// the sections to edit and prompts for each value with the current one
    /// pre-filled. The returned configuration is not saved.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "storage".to_string(),
                name: "Storage".to_string(),
            },
            ConfigModule {
                key: "seed".to_string(),
                name: "Default project".to_string(),
            },
            ConfigModule {
                key: "start_page".to_string(),
                name: "Start page".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "storage" => {
                    msg_print!(Message::ConfigModuleStorage);
                    config.storage = StorageConfig {
                        file_name: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStorageFile.to_string())
                            .default(config.storage.file_name.clone())
                            .interact_text()?,
                        key: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStorageKey.to_string())
                            .default(config.storage.key.clone())
                            .interact_text()?,
                    };
                }
                "seed" => {
                    msg_print!(Message::ConfigModuleSeed);
                    config.seed = SeedConfig {
                        project: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSeedProject.to_string())
                            .default(config.seed.project.clone())
                            .validate_with(|name: &String| validate_project_name(name).map_err(|e| e.to_string()))
                            .interact_text()?,
                        task_title: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSeedTaskTitle.to_string())
                            .default(config.seed.task_title.clone())
                            .interact_text()?,
                        task_description: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSeedTaskDescription.to_string())
                            .default(config.seed.task_description.clone())
                            .allow_empty(true)
                            .interact_text()?,
                    };
                }
                "start_page" => {
                    let pages = [
                        Page::Today,
                        Page::ThisWeek,
                        Page::Important,
                        Page::AllTasks,
                        Page::Project(config.seed.project.clone()),
                    ];
                    let current = pages.iter().position(|page| page.name() == config.start_page).unwrap_or(0);
                    let choice = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptStartPage.to_string())
                        .items(&pages.iter().map(Page::name).collect::<Vec<_>>())
                        .default(current)
                        .interact()?;
                    config.start_page = pages[choice].name().to_string();
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
