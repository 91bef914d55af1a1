//! Configuration management for Condense
//!
//! Handles model selection, windowing parameters, and persistence of user
//! preferences.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Device preference for compute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum DevicePreference {
    /// Automatically detect best available device (GPU if available, else CPU)
    #[default]
    Auto,
    /// Force CPU usage
    Cpu,
    /// Force Metal GPU (macOS Apple Silicon)
    Metal,
    /// Force CUDA GPU (NVIDIA)
    Cuda,
}

impl DevicePreference {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Metal => "metal",
            Self::Cuda => "cuda",
        }
    }
}

/// Available summarization models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SummaryModelKind {
    /// Flan-T5 Small - fastest, smallest footprint
    FlanT5Small,
    /// Flan-T5 Base - balanced quality and size (default)
    FlanT5Base,
    /// Flan-T5 Large - best quality, slowest
    FlanT5Large,
}

impl SummaryModelKind {
    /// Display name for the model
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlanT5Small => "flan-t5-small",
            Self::FlanT5Base => "flan-t5-base",
            Self::FlanT5Large => "flan-t5-large",
        }
    }

    /// HuggingFace model ID
    pub fn hf_id(&self) -> &'static str {
        match self {
            Self::FlanT5Small => "google/flan-t5-small",
            Self::FlanT5Base => "google/flan-t5-base",
            Self::FlanT5Large => "google/flan-t5-large",
        }
    }

    /// Approximate model size in MB
    pub fn size_mb(&self) -> u32 {
        match self {
            Self::FlanT5Small => 308,
            Self::FlanT5Base => 990,
            Self::FlanT5Large => 3130,
        }
    }

    /// Maximum input tokens the model accepts in one inference call
    pub fn capacity(&self) -> usize {
        // T5 checkpoints are trained with a 512-token encoder context.
        512
    }
}

impl Default for SummaryModelKind {
    fn default() -> Self {
        Self::FlanT5Base
    }
}

/// Condense configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected summarization model
    pub model: SummaryModelKind,
    /// Device preference (auto, cpu, metal, cuda)
    #[serde(default)]
    pub device: DevicePreference,
    /// Window length in tokens for long-input splitting
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Token overlap between consecutive windows
    #[serde(default = "default_stride")]
    pub stride: usize,
    /// Re-summarization ceiling before the input is truncated to capacity
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Worker pool size for window summarization (0 = available parallelism)
    #[serde(default)]
    pub workers: usize,
    /// Maximum tokens generated per summary
    #[serde(default = "default_max_summary_tokens")]
    pub max_summary_tokens: usize,
    /// Version of config schema (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_window_size() -> usize {
    448
}

fn default_stride() -> usize {
    50
}

fn default_max_depth() -> usize {
    3
}

fn default_max_summary_tokens() -> usize {
    150
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: SummaryModelKind::default(),
            device: DevicePreference::default(),
            window_size: default_window_size(),
            stride: default_stride(),
            max_depth: default_max_depth(),
            workers: 0,
            max_summary_tokens: default_max_summary_tokens(),
            version: 1,
        }
    }
}

impl Config {
    /// Get the config file path (~/.condense/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".condense").join("config.toml"))
    }

    /// Load config from disk, or return None if it doesn't exist
    pub fn load() -> Result<Option<Self>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .context("Failed to read config file")?;
        let config: Self = toml::from_str(&content)
            .context("Failed to parse config file")?;
        Ok(Some(config))
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, SummaryModelKind::FlanT5Base);
        assert_eq!(config.window_size, 448);
        assert_eq!(config.stride, 50);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.workers, 0);
    }

    #[test]
    fn test_model_metadata() {
        let model = SummaryModelKind::FlanT5Small;
        assert_eq!(model.hf_id(), "google/flan-t5-small");
        assert_eq!(model.size_mb(), 308);
        assert_eq!(model.capacity(), 512);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.model, parsed.model);
        assert_eq!(config.window_size, parsed.window_size);
        assert_eq!(config.stride, parsed.stride);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("model = \"FlanT5Small\"").unwrap();
        assert_eq!(parsed.model, SummaryModelKind::FlanT5Small);
        assert_eq!(parsed.window_size, 448);
        assert_eq!(parsed.max_summary_tokens, 150);
    }
}
