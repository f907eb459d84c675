// crates/sman-core/src/config.rs - Configuration System
//
// This module provides the configuration schema and loading mechanism for
// the sman CLI tool. The configuration is built once at startup and passed
// by reference to everything that needs it; nothing reads settings ad hoc.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--snippet-dir, handled by the CLI)
// 2. Environment variables (SMAN_SNIPPET_DIR, SMAN_EXEC_CONFIRM, etc.)
// 3. Config file (--config, SMAN_CONFIG, or ~/.config/sman/config.toml)
// 4. Built-in defaults
//
// VALIDATION:
// - min_match_percentage must lie in [0, 1]; anything else is fatal
// - ls_color_files must name a known terminal color

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SMAN_CONFIG";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("Configuration value {key} = {value} is out of range: {expected}")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete configuration schema for sman
///
/// Every field has a default, so partial config files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmanConfig {
    /// Directory holding the snippet files; "~" is expanded on use
    #[serde(default = "default_snippet_dir")]
    pub snippet_dir: String,

    /// Append executed commands to the shell history file ($HISTFILE)
    #[serde(default = "default_true")]
    pub append_history: bool,

    /// Ask for confirmation before executing a command
    #[serde(default = "default_true")]
    pub exec_confirm: bool,

    /// Color of the file headers in `sman ls`: ANSI code ("34") or name ("blue")
    #[serde(default = "default_ls_color_files")]
    pub ls_color_files: String,

    /// Fraction in [0, 1]
    ///
    /// Validated on load but not consumed by any matching logic yet; it is
    /// reserved for similarity-based matching.
    #[serde(default)]
    pub min_match_percentage: f64,
}

impl SmanConfig {
    /// Snippet directory with "~" expanded
    pub fn snippet_path(&self) -> PathBuf {
        expand_path(&self.snippet_dir)
    }

    /// Parsed header color; validated configs always succeed
    pub fn file_color(&self) -> ConfigResult<FileColor> {
        self.ls_color_files.parse()
    }
}

/// Terminal colors accepted for file headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl FileColor {
    const ALL: [FileColor; 8] = [
        FileColor::Black,
        FileColor::Red,
        FileColor::Green,
        FileColor::Yellow,
        FileColor::Blue,
        FileColor::Magenta,
        FileColor::Cyan,
        FileColor::White,
    ];

    /// ANSI foreground code (30-37)
    pub fn ansi_code(self) -> u8 {
        30 + self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FileColor::Black => "black",
            FileColor::Red => "red",
            FileColor::Green => "green",
            FileColor::Yellow => "yellow",
            FileColor::Blue => "blue",
            FileColor::Magenta => "magenta",
            FileColor::Cyan => "cyan",
            FileColor::White => "white",
        }
    }
}

impl FromStr for FileColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.name() == value || color.ansi_code().to_string() == value)
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "Invalid ls_color_files '{}'. Use an ANSI code 30-37 or one of: \
                     black, red, green, yellow, blue, magenta, cyan, white",
                    s
                ))
            })
    }
}

impl fmt::Display for FileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration loading and management
pub struct ConfigManager;

impl ConfigManager {
    /// Load complete configuration from all sources
    ///
    /// LOADING STRATEGY:
    /// 1. Start with built-in defaults
    /// 2. Override with the config file (explicit path, SMAN_CONFIG, or default location)
    /// 3. Override with environment variables
    /// 4. Validate
    ///
    /// ERROR HANDLING:
    /// - A missing file at the default location is not an error (use defaults)
    /// - A missing file that was asked for explicitly is an error
    /// - Invalid TOML syntax and out-of-range values are errors
    pub fn load_config(config_path: Option<&Path>) -> ConfigResult<SmanConfig> {
        let explicit = config_path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()));
                }
                Self::load_file(&path)?
            }
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::load_file(&path)?,
                None => SmanConfig::default(),
            },
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        Self::validate_config(&config)?;

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Default config file location: <config dir>/sman/config.toml
    ///
    /// The config dir follows the platform: ~/.config on Linux (or
    /// $XDG_CONFIG_HOME), ~/Library/Application Support on macOS.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config_dir| config_dir.join("sman").join("config.toml"))
    }

    /// Parse a config file without validating it
    pub fn load_file(path: &Path) -> ConfigResult<SmanConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse TOML content without validating it
    pub fn parse(content: &str, source: &str) -> ConfigResult<SmanConfig> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            file: source.to_string(),
            error: e.to_string(),
        })
    }

    /// Apply environment overrides through a lookup function
    ///
    /// - SMAN_SNIPPET_DIR -> snippet_dir
    /// - SMAN_APPEND_HISTORY -> append_history
    /// - SMAN_EXEC_CONFIRM -> exec_confirm
    /// - SMAN_LS_COLOR_FILES -> ls_color_files
    /// - SMAN_MIN_MATCH_PERCENTAGE -> min_match_percentage
    pub fn apply_overrides<F>(config: &mut SmanConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SMAN_SNIPPET_DIR") {
            config.snippet_dir = dir;
        }
        if let Some(value) = lookup("SMAN_APPEND_HISTORY") {
            config.append_history = parse_bool("SMAN_APPEND_HISTORY", &value)?;
        }
        if let Some(value) = lookup("SMAN_EXEC_CONFIRM") {
            config.exec_confirm = parse_bool("SMAN_EXEC_CONFIRM", &value)?;
        }
        if let Some(color) = lookup("SMAN_LS_COLOR_FILES") {
            config.ls_color_files = color;
        }
        if let Some(value) = lookup("SMAN_MIN_MATCH_PERCENTAGE") {
            config.min_match_percentage = value.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "SMAN_MIN_MATCH_PERCENTAGE must be a number, got '{}'",
                    value
                ))
            })?;
        }
        Ok(())
    }

    /// Validate the final configuration
    pub fn validate_config(config: &SmanConfig) -> ConfigResult<()> {
        let percentage = config.min_match_percentage;
        if !(0.0..=1.0).contains(&percentage) {
            return Err(ConfigError::OutOfRange {
                key: "min_match_percentage",
                value: percentage.to_string(),
                expected: "only values between 0 and 1 are allowed",
            });
        }

        if config.snippet_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "snippet_dir cannot be empty".to_string(),
            ));
        }

        config.file_color()?;

        Ok(())
    }

    /// Generate a default configuration file with comments
    pub fn generate_default_config() -> String {
        r#"# sman configuration file
#
# Lines starting with # are comments and are ignored.

# Directory holding snippet files (*.yml / *.yaml)
snippet_dir = "~/snippets"

# Append executed commands to $HISTFILE
append_history = true

# Ask before executing a command
exec_confirm = true

# Color of file headers in `sman ls`: ANSI code 30-37 or a color name
ls_color_files = "34"

# Reserved; must be between 0 and 1
min_match_percentage = 0.0
"#
        .to_string()
    }
}

/// Expand a leading "~" or "~/" against the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ValidationError(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

fn default_true() -> bool {
    true
}

fn default_snippet_dir() -> String {
    "~/snippets".to_string()
}

fn default_ls_color_files() -> String {
    "34".to_string()
}

impl Default for SmanConfig {
    fn default() -> Self {
        Self {
            snippet_dir: default_snippet_dir(),
            append_history: true,
            exec_confirm: true,
            ls_color_files: default_ls_color_files(),
            min_match_percentage: 0.0,
        }
    }
}
