//! Runtime configuration
//!
//! Uses RON (Rusty Object Notation) for a human-readable config file. Every
//! field is optional; a missing or unreadable file falls back to defaults
//! with a logged warning.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::pipeline::Color;

pub const DEFAULT_PATH: &str = "assets/smolgl.ron";

fn default_width() -> usize {
    640
}

fn default_height() -> usize {
    480
}

fn default_window_scale() -> usize {
    1
}

fn default_buffer_capacity() -> usize {
    32
}

fn default_depth_clear() -> f32 {
    1.0
}

fn default_background() -> Color {
    Color::WHITE
}

fn default_perspective_correct() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Window pixels per framebuffer pixel
    #[serde(default = "default_window_scale")]
    pub window_scale: usize,
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    #[serde(default = "default_depth_clear")]
    pub depth_clear: f32,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_perspective_correct")]
    pub perspective_correct: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            window_scale: default_window_scale(),
            buffer_capacity: default_buffer_capacity(),
            depth_clear: default_depth_clear(),
            background: default_background(),
            perspective_correct: default_perspective_correct(),
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RasterConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RasterConfig = ron::from_str(&contents)?;
    Ok(config)
}

/// Load a config, falling back to defaults when the file is missing or
/// malformed
pub fn load_or_default<P: AsRef<Path>>(path: P) -> RasterConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("config {} unusable ({}), using defaults", path.display(), e);
            RasterConfig::default()
        }
    }
}
