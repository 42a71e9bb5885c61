use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Frame capture config
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Frame capture settings for the external ffmpeg invocation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptureConfig {
    // @field: ffmpeg binary to invoke, resolved via PATH when not absolute
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: JPEG quality passed as -q:v (1 is best, 31 is worst)
    #[serde(default = "default_image_quality")]
    pub image_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            image_quality: default_image_quality(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_image_quality() -> u8 {
    // ffmpeg's -q:v scale; 2 gives near-lossless JPEG output
    2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.capture.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("Capture tool path must not be empty"));
        }

        // ffmpeg rejects -q:v values outside its documented JPEG range
        if !(1..=31).contains(&self.capture.image_quality) {
            return Err(anyhow!(
                "Image quality {} is out of range (expected 1-31)",
                self.capture.image_quality
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            capture: CaptureConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
