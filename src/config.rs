//! Configuration management for the skill matcher
//!
//! Display preferences live here instead of in ambient global state: they are
//! loaded once at startup, handed to the engine explicitly, and written back
//! whenever the user changes them.

use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: Preferences,
    #[serde(default)]
    pub highlight: HighlightStyle,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// User-facing display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub highlight_enabled: bool,
    pub tooltip_enabled: bool,
}

/// Markup emitted around matched skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// Class of the tooltip-carrying `span` marker
    pub marker_class: String,
    /// Prepended to the skill name in the `data-tip` attribute
    pub tooltip_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub page_size: usize,
    /// How many matched / missing skills the gap analysis shows
    pub gap_display_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            highlight_enabled: true,
            tooltip_enabled: true,
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            marker_class: "skill-highlight".to_string(),
            tooltip_prefix: "Skill matches the vacancy: ".to_string(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            gap_display_limit: 12,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                SkillMatchError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillMatchError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-match")
            .join("config.toml")
    }

    /// Set a value by dotted key, e.g. `display.highlight_enabled`.
    /// Nothing changes when the key, value or resulting config is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "display.highlight_enabled" => updated.display.highlight_enabled = parse_bool(key, value)?,
            "display.tooltip_enabled" => updated.display.tooltip_enabled = parse_bool(key, value)?,
            "highlight.marker_class" => updated.highlight.marker_class = value.to_string(),
            "highlight.tooltip_prefix" => updated.highlight.tooltip_prefix = value.to_string(),
            "board.page_size" => updated.board.page_size = parse_usize(key, value)?,
            "board.gap_display_limit" => updated.board.gap_display_limit = parse_usize(key, value)?,
            "output.format" => {
                updated.output.format = crate::cli::parse_output_format(value)
                    .map_err(SkillMatchError::Configuration)?
            }
            "output.color_output" => updated.output.color_output = parse_bool(key, value)?,
            _ => {
                return Err(SkillMatchError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.board.page_size == 0 {
            return Err(SkillMatchError::Configuration(
                "board.page_size must be greater than zero".to_string(),
            ));
        }
        if self.highlight.marker_class.trim().is_empty() {
            return Err(SkillMatchError::Configuration(
                "highlight.marker_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(SkillMatchError::Configuration(format!(
            "Expected a boolean for {}, got '{}'",
            key, value
        ))),
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        SkillMatchError::Configuration(format!("Expected a number for {}, got '{}'", key, value))
    })
}
