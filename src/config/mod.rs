// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration: feature flags shared with
//! the rest of the content script, lightbox presentation settings and the
//! empirical gesture thresholds.
//!
//! # Configuration Sections
//!
//! - `[features]` - Lightbox and sibling cosmetic feature toggles
//! - `[lightbox]` - Controls delay, reading direction, view mode, image quality
//! - `[gesture]` - Commit/dismiss thresholds and pinch bounds
//!
//! # Sources
//!
//! Two sources are supported:
//! 1. A `settings.toml` file (`load()`/`save()`, or `load_from_path()`/`save_to_path()`
//!    with an explicit path). The directory can be overridden with
//!    `X_LIGHTBOX_CONFIG_DIR`.
//! 2. The extension's key-value storage object, read once at startup and again
//!    on every change notification ([`Config::from_storage_json`]).
//!
//! # Examples
//!
//! ```no_run
//! use x_lightbox::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.features.enable_lightbox = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::application::gesture::GestureTuning;
use crate::domain::layout::{ReadingDirection, ViewMode};
use crate::domain::newtypes::ControlsTimeout;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "XLightbox";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "X_LIGHTBOX_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Feature toggles. Only `enable_lightbox` is consumed by this engine; the
/// others are carried for the cosmetic collaborators that share the object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    #[serde(default = "enabled")]
    pub enable_lightbox: bool,

    #[serde(default = "enabled")]
    pub enable_ripple: bool,

    #[serde(default = "enabled")]
    pub enable_button_scale: bool,

    #[serde(default = "enabled")]
    pub enable_fullscreen_button: bool,

    /// Content-visibility and async decoding hints.
    #[serde(default = "enabled")]
    pub optimize_media: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_lightbox: true,
            enable_ripple: true,
            enable_button_scale: true,
            enable_fullscreen_button: true,
            optimize_media: true,
        }
    }
}

/// Lightbox presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Auto-hide delay for the controls (milliseconds).
    #[serde(
        default = "default_controls_hide_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub controls_hide_delay_ms: Option<u32>,

    /// Page order of the strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_direction: Option<ReadingDirection>,

    /// View mode used when a session opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_view_mode: Option<ViewMode>,

    /// Size token written into `name=` to request the largest variant.
    #[serde(
        default = "default_high_res_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub high_res_token: Option<String>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            controls_hide_delay_ms: default_controls_hide_delay_ms(),
            reading_direction: Some(ReadingDirection::default()),
            default_view_mode: Some(ViewMode::default()),
            high_res_token: default_high_res_token(),
        }
    }
}

impl LightboxConfig {
    /// Resolved controls timeout, clamped to its valid range.
    #[must_use]
    pub fn controls_timeout(&self) -> ControlsTimeout {
        self.controls_hide_delay_ms
            .map(ControlsTimeout::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn reading_direction(&self) -> ReadingDirection {
        self.reading_direction.unwrap_or_default()
    }

    #[must_use]
    pub fn default_view_mode(&self) -> ViewMode {
        self.default_view_mode.unwrap_or_default()
    }

    /// Size token, falling back to the default when unset or not a plain word.
    #[must_use]
    pub fn high_res_token(&self) -> &str {
        match self.high_res_token.as_deref() {
            Some(token)
                if !token.is_empty()
                    && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                token
            }
            _ => DEFAULT_HIGH_RES_TOKEN,
        }
    }
}

/// Gesture thresholds. These are empirical tuning values; every field is
/// optional and falls back to the matching constant in [`defaults`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_lock_threshold_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_commit_distance_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flick_velocity_px_per_ms: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_distance_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_flick_distance_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_resistance: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pinch_scale: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pinch_scale: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_snap_back_scale: Option<f32>,
}

impl GestureConfig {
    /// Builds runtime tuning, clamping each value into a usable range.
    #[must_use]
    pub fn tuning(&self) -> GestureTuning {
        let px = |value: Option<f32>, default: f32| {
            value
                .filter(|v| v.is_finite())
                .map_or(default, |v| v.clamp(MIN_THRESHOLD_PX, MAX_THRESHOLD_PX))
        };

        let min_pinch_scale = self
            .min_pinch_scale
            .filter(|v| v.is_finite())
            .map_or(DEFAULT_MIN_PINCH_SCALE, |v| v.clamp(0.1, NEUTRAL_SCALE));
        let max_pinch_scale = self
            .max_pinch_scale
            .filter(|v| v.is_finite())
            .map_or(DEFAULT_MAX_PINCH_SCALE, |v| v.clamp(NEUTRAL_SCALE, 20.0));

        GestureTuning {
            axis_lock_threshold_px: px(self.axis_lock_threshold_px, DEFAULT_AXIS_LOCK_THRESHOLD_PX),
            page_commit_distance_px: px(
                self.page_commit_distance_px,
                DEFAULT_PAGE_COMMIT_DISTANCE_PX,
            ),
            flick_velocity_px_per_ms: self
                .flick_velocity_px_per_ms
                .filter(|v| v.is_finite())
                .map_or(DEFAULT_FLICK_VELOCITY_PX_PER_MS, |v| {
                    v.clamp(MIN_FLICK_VELOCITY_PX_PER_MS, MAX_FLICK_VELOCITY_PX_PER_MS)
                }),
            dismiss_distance_px: px(self.dismiss_distance_px, DEFAULT_DISMISS_DISTANCE_PX),
            dismiss_flick_distance_px: px(
                self.dismiss_flick_distance_px,
                DEFAULT_DISMISS_FLICK_DISTANCE_PX,
            ),
            edge_resistance: self
                .edge_resistance
                .filter(|v| v.is_finite())
                .map_or(DEFAULT_EDGE_RESISTANCE, |v| v.clamp(0.0, 1.0)),
            min_pinch_scale,
            max_pinch_scale,
            zoom_snap_back_scale: self
                .zoom_snap_back_scale
                .filter(|v| v.is_finite())
                .map_or(DEFAULT_ZOOM_SNAP_BACK_SCALE, |v| {
                    v.clamp(NEUTRAL_SCALE, max_pinch_scale)
                }),
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
    pub features: FeatureFlags,

    #[serde(default)]
    pub lightbox: LightboxConfig,

    #[serde(default)]
    pub gesture: GestureConfig,
}

// =============================================================================
// Browser Storage Format
// =============================================================================

/// `animationConfig` object as written by the settings popup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnimationConfig {
    enable_lightbox: Option<bool>,
    enable_ripple: Option<bool>,
    enable_button_scale: Option<bool>,
    enable_fullscreen_btn: Option<bool>,
    /// 0 = off, 1 = manual (on). Takes precedence over `enableFullscreenBtn`.
    fullscreen_mode: Option<i64>,
    enable_animations: Option<bool>,
}

/// `config` object as written by the settings popup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredOptimizerConfig {
    optimize_media: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    #[serde(default)]
    animation_config: Option<StoredAnimationConfig>,
    #[serde(default)]
    config: Option<StoredOptimizerConfig>,
}

impl Config {
    /// Builds a configuration from the extension's storage payload.
    ///
    /// Missing keys mean "enabled". Only the feature flags come from storage;
    /// lightbox and gesture sections keep their defaults.
    pub fn from_storage_json(json: &str) -> Result<Self> {
        let stored: StoredSettings = serde_json::from_str(json)?;
        Ok(Self::default().with_storage(stored))
    }

    /// Applies a storage change notification on top of the current settings.
    pub fn merge_storage_json(&self, json: &str) -> Result<Self> {
        let stored: StoredSettings = serde_json::from_str(json)?;
        Ok(self.clone().with_storage(stored))
    }

    fn with_storage(mut self, stored: StoredSettings) -> Self {
        if let Some(animation) = stored.animation_config {
            // A globally disabled animator never wires the lightbox either.
            let animations = animation.enable_animations.unwrap_or(true);
            self.features.enable_lightbox = animations && animation.enable_lightbox.unwrap_or(true);
            self.features.enable_ripple = animation.enable_ripple.unwrap_or(true);
            self.features.enable_button_scale = animation.enable_button_scale.unwrap_or(true);
            self.features.enable_fullscreen_button = match animation.fullscreen_mode {
                Some(mode) => mode >= 1,
                None => animation.enable_fullscreen_btn.unwrap_or(true),
            };
        }
        if let Some(optimizer) = stored.config {
            self.features.optimize_media = optimizer.optimize_media.unwrap_or(true);
        }
        self
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn enabled() -> bool {
    true
}

fn default_controls_hide_delay_ms() -> Option<u32> {
    Some(DEFAULT_CONTROLS_HIDE_DELAY_MS)
}

fn default_high_res_token() -> Option<String> {
    Some(DEFAULT_HIGH_RES_TOKEN.to_string())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory: explicit override, then the environment
/// variable, then the platform default.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = base_dir {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
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
/// default config with a warning message explaining what went wrong.
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
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(err.to_string()));
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
