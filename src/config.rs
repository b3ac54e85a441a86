//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_DIR_NAME, CONFIG_DIR_ENV, DEFAULT_BOARD_THICKNESS_MM, DEFAULT_DOUBLE_CLICK_WINDOW_MS,
    DEFAULT_DRAG_SENSITIVITY, DEFAULT_MATERIAL, DEFAULT_MODULE_DEPTH, DEFAULT_MODULE_HEIGHT,
    DEFAULT_MODULE_WIDTH, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SUPPORT_WIDTH,
};
use crate::models::{Material, Size3};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory where the design store keeps one JSON file per design.
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub designs_dir: Option<PathBuf>,
}

/// Defaults applied to newly created modules and components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Module width in centimeters
    #[serde(default = "default_module_width")]
    pub module_width: f64,
    /// Module height in centimeters
    #[serde(default = "default_module_height")]
    pub module_height: f64,
    /// Module depth in centimeters
    #[serde(default = "default_module_depth")]
    pub module_depth: f64,
    /// Board thickness in millimeters
    #[serde(default = "default_board_thickness")]
    pub board_thickness: f64,
    /// Support width in centimeters
    #[serde(default = "default_support_width")]
    pub support_width: f64,
    /// Material name (pine, plywood, mdf, laminated)
    #[serde(default = "default_material")]
    pub material: String,
}

fn default_module_width() -> f64 {
    DEFAULT_MODULE_WIDTH
}

fn default_module_height() -> f64 {
    DEFAULT_MODULE_HEIGHT
}

fn default_module_depth() -> f64 {
    DEFAULT_MODULE_DEPTH
}

fn default_board_thickness() -> f64 {
    DEFAULT_BOARD_THICKNESS_MM
}

fn default_support_width() -> f64 {
    DEFAULT_SUPPORT_WIDTH
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            module_width: default_module_width(),
            module_height: default_module_height(),
            module_depth: default_module_depth(),
            board_thickness: default_board_thickness(),
            support_width: default_support_width(),
            material: default_material(),
        }
    }
}

impl DefaultsConfig {
    /// The default module envelope.
    #[must_use]
    pub fn module_size(&self) -> Size3 {
        Size3::new(self.module_width, self.module_height, self.module_depth)
    }
}

/// Pointer interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Centimeters moved per screen pixel while dragging
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f64,
    /// Click/double-click disambiguation window in milliseconds
    #[serde(default = "default_double_click_window_ms")]
    pub double_click_window_ms: u64,
}

fn default_drag_sensitivity() -> f64 {
    DEFAULT_DRAG_SENSITIVITY
}

fn default_double_click_window_ms() -> u64 {
    DEFAULT_DOUBLE_CLICK_WINDOW_MS
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: default_drag_sensitivity(),
            double_click_window_ms: default_double_click_window_ms(),
        }
    }
}

/// Design store server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ShelfDesigner/config.toml`
/// - macOS: `~/Library/Application Support/ShelfDesigner/config.toml`
/// - Windows: `%APPDATA%\ShelfDesigner\config.toml`
///
/// # Validation
///
/// - module dimensions, board thickness and support width must be positive
/// - material must be one of the known materials
/// - drag sensitivity and the double-click window must be non-zero
/// - server port must be non-zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Defaults for new modules
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Pointer interaction tuning
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/ShelfDesigner/`
    /// - macOS: `~/Library/Application Support/ShelfDesigner/`
    /// - Windows: `%APPDATA%\ShelfDesigner\`
    ///
    /// `SHELF_DESIGNER_CONFIG_DIR` takes precedence when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves the designs directory: the configured path, or
    /// `<data_dir>/ShelfDesigner/designs`.
    pub fn designs_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.paths.designs_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to determine data directory")?;
        Ok(data_dir.join(APP_DIR_NAME).join("designs"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let d = &self.defaults;
        for (name, value) in [
            ("module_width", d.module_width),
            ("module_height", d.module_height),
            ("module_depth", d.module_depth),
            ("board_thickness", d.board_thickness),
            ("support_width", d.support_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("defaults.{name} must be a positive number, got {value}");
            }
        }

        if Material::parse(&d.material).is_none() {
            anyhow::bail!(
                "Unknown material '{}'. Expected one of: pine, plywood, mdf, laminated",
                d.material
            );
        }

        let sensitivity = self.interaction.drag_sensitivity;
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            anyhow::bail!("interaction.drag_sensitivity must be a positive number");
        }

        if self.interaction.double_click_window_ms == 0 {
            anyhow::bail!("interaction.double_click_window_ms must be greater than zero");
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be greater than zero");
        }

        Ok(())
    }
}
