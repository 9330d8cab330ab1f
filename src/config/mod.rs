// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, loaded from and saved to
//! a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[history]` - Undo stack size
//! - `[text]` - Text overlay font and colour
//! - `[filters]` - Initial filter intensity
//! - `[crop]` - Crop frame sizing
//!
//! Every key is optional. Missing keys take the values in [`defaults`];
//! out-of-range values are clamped when read through the accessor methods.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PHOTO_SESSION_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use photo_session::config;
//!
//! let (mut config, _warning) = config::load();
//! config.history.max_states = Some(50);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::editing::Color;
use crate::error::{Error, Result};
use crate::media::TextStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Number of edit states kept for undo.
    #[serde(
        default = "default_max_states",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_states: Option<usize>,
}

impl HistoryConfig {
    #[must_use]
    pub fn max_states(&self) -> usize {
        self.max_states
            .unwrap_or(DEFAULT_MAX_HISTORY_STATES)
            .clamp(MIN_MAX_HISTORY_STATES, MAX_MAX_HISTORY_STATES)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_states: default_max_states(),
        }
    }
}

/// Text overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextConfig {
    /// Font size in canvas units.
    #[serde(default = "default_font_size", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Font family name or generic family (`sans-serif`, `serif`, ...).
    #[serde(
        default = "default_font_family",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_family: Option<String>,

    /// Width after which text wraps onto a new line.
    #[serde(default = "default_max_width", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,

    /// Colour of newly added overlays.
    #[serde(
        default = "default_text_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_color: Option<Color>,
}

impl TextConfig {
    #[must_use]
    pub fn font_size(&self) -> f32 {
        finite_or(self.font_size, DEFAULT_TEXT_FONT_SIZE)
            .clamp(MIN_TEXT_FONT_SIZE, MAX_TEXT_FONT_SIZE)
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .filter(|family| !family.trim().is_empty())
            .unwrap_or(DEFAULT_TEXT_FONT_FAMILY)
    }

    #[must_use]
    pub fn max_width(&self) -> f32 {
        let width = finite_or(self.max_width, DEFAULT_TEXT_MAX_WIDTH);
        if width > 0.0 {
            width
        } else {
            DEFAULT_TEXT_MAX_WIDTH
        }
    }

    #[must_use]
    pub fn default_color(&self) -> Color {
        self.default_color.unwrap_or(DEFAULT_TEXT_COLOR)
    }

    /// Font settings for the text renderer.
    #[must_use]
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font_family: self.font_family().to_string(),
            font_size: self.font_size(),
            max_width: self.max_width(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            font_family: default_font_family(),
            max_width: default_max_width(),
            default_color: default_text_color(),
        }
    }
}

/// Filter panel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Intensity a filter starts at when picked.
    #[serde(
        default = "default_filter_intensity",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_intensity: Option<f32>,
}

impl FilterConfig {
    #[must_use]
    pub fn default_intensity(&self) -> f32 {
        finite_or(self.default_intensity, DEFAULT_FILTER_INTENSITY).clamp(0.0, 1.0)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_intensity: default_filter_intensity(),
        }
    }
}

/// Crop frame settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropConfig {
    /// Mask base size as a fraction of the viewport width.
    #[serde(
        default = "default_mask_fraction",
        skip_serializing_if = "Option::is_none"
    )]
    pub mask_fraction: Option<f32>,

    /// Largest zoom factor inside the crop frame.
    #[serde(
        default = "default_max_magnification",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_magnification: Option<f32>,
}

impl CropConfig {
    #[must_use]
    pub fn mask_fraction(&self) -> f32 {
        finite_or(self.mask_fraction, DEFAULT_CROP_MASK_FRACTION)
            .clamp(MIN_CROP_MASK_FRACTION, MAX_CROP_MASK_FRACTION)
    }

    #[must_use]
    pub fn max_magnification(&self) -> f32 {
        finite_or(self.max_magnification, DEFAULT_CROP_MAX_MAGNIFICATION)
            .clamp(MIN_CROP_MAX_MAGNIFICATION, MAX_CROP_MAX_MAGNIFICATION)
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            mask_fraction: default_mask_fraction(),
            max_magnification: default_max_magnification(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Engine configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub crop: CropConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn finite_or(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

fn default_max_states() -> Option<usize> {
    Some(DEFAULT_MAX_HISTORY_STATES)
}

fn default_font_size() -> Option<f32> {
    Some(DEFAULT_TEXT_FONT_SIZE)
}

fn default_font_family() -> Option<String> {
    Some(DEFAULT_TEXT_FONT_FAMILY.to_string())
}

fn default_max_width() -> Option<f32> {
    Some(DEFAULT_TEXT_MAX_WIDTH)
}

fn default_text_color() -> Option<Color> {
    Some(DEFAULT_TEXT_COLOR)
}

fn default_filter_intensity() -> Option<f32> {
    Some(DEFAULT_FILTER_INTENSITY)
}

fn default_mask_fraction() -> Option<f32> {
    Some(DEFAULT_CROP_MASK_FRACTION)
}

fn default_max_magnification() -> Option<f32> {
    Some(DEFAULT_CROP_MAX_MAGNIFICATION)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring config at {}: {err}", path.display());
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
