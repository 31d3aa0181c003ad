//! Gallery configuration.
//!
//! Everything has a default, and the defaults reproduce the tool's fixed
//! behaviour: read `links/`, write next to it, 600px thumbnails at quality 85
//! and optimized copies capped at 1600px at quality 90. A config file is only
//! needed to change those.
//!
//! ## Config File Location
//!
//! `auto-gallery.toml` in the working directory (override with `--config`).
//! A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "links"          # Folder tree of source photos
//! output = "."              # Where thumbs/, optimized/, json/ and photos-data.json go
//!
//! [thumbnails]
//! width = 600               # Exact thumbnail width (small photos are scaled up)
//! quality = 85              # JPEG quality (1-100)
//!
//! [optimized]
//! max_width = 1600          # Width cap (small photos keep their size)
//! quality = 90              # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "auto-gallery.toml";

/// Gallery configuration loaded from `auto-gallery.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Root of the source photo tree.
    pub source: PathBuf,
    /// Root of the generated gallery.
    pub output: PathBuf,
    /// Thumbnail settings.
    pub thumbnails: ThumbnailsConfig,
    /// Optimized copy settings.
    pub optimized: OptimizedImagesConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("links"),
            output: PathBuf::from("."),
            thumbnails: ThumbnailsConfig::default(),
            optimized: OptimizedImagesConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width must be non-zero".into(),
            ));
        }
        if self.optimized.max_width == 0 {
            return Err(ConfigError::Validation(
                "optimized.max_width must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if !(1..=100).contains(&self.optimized.quality) {
            return Err(ConfigError::Validation(
                "optimized.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    pub width: u32,
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: 600,
            quality: 85,
        }
    }
}

/// Optimized copy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizedImagesConfig {
    pub max_width: u32,
    pub quality: u32,
}

impl Default for OptimizedImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 1600,
            quality: 90,
        }
    }
}

/// Load config from `path`.
///
/// Returns stock defaults when the file doesn't exist. Otherwise parses it
/// (missing keys keep their defaults), rejects unknown keys, and validates.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if !path.exists() {
        return Ok(GalleryConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `auto-gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# auto-gallery configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Folder tree of source photos (.jpg / .jpeg), relative to the working directory.
source = "links"

# Where thumbs/, optimized/, json/ and photos-data.json are written.
output = "."

# ---------------------------------------------------------------------------
# Thumbnails (thumbs/)
# ---------------------------------------------------------------------------
[thumbnails]
# Exact output width in pixels. Height follows the aspect ratio.
# Photos narrower than this are scaled up.
width = 600

# JPEG quality (1-100).
quality = 85

# ---------------------------------------------------------------------------
# Optimized copies (optimized/)
# ---------------------------------------------------------------------------
[optimized]
# Maximum width in pixels. Narrower photos keep their original size.
max_width = 1600

# JPEG quality (1-100).
quality = 90
"##
}
