use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use periphsim_core::{ChannelConfig, Parity, DEFAULT_BAUD_RATE};
use serde::{Deserialize, Serialize};

/// Demo settings, read from JSON. Every missing field keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub channel: ChannelSettings,
    pub blink_count: u32,
    pub blink_interval_ms: u64,
    pub debounce_ms: u64,
    pub press_cycles: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel: ChannelSettings::default(),
            blink_count: 10,
            blink_interval_ms: 500,
            debounce_ms: 20,
            press_cycles: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: 8,
            stop_bits: 1,
            parity: "none".to_string(),
        }
    }
}

impl ChannelSettings {
    pub fn to_config(&self) -> Result<ChannelConfig> {
        let parity: Parity = self
            .parity
            .parse()
            .with_context(|| format!("invalid parity {:?}", self.parity))?;
        Ok(ChannelConfig {
            baud_rate: self.baud_rate,
            data_bits: self.data_bits,
            stop_bits: self.stop_bits,
            parity,
        })
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("periphsim").join("settings.json"))
    }

    /// Load from `path`; a file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.channel.to_config().unwrap(), ChannelConfig::default());
    }

    #[test]
    fn partial_channel_keeps_other_fields() {
        let settings = Settings::from_json(r#"{"channel": {"baud_rate": 9600, "parity": "even"}, "press_cycles": 2}"#)
            .unwrap();
        let config = settings.channel.to_config().unwrap();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.data_bits, 8);
        assert_eq!(config.stop_bits, 1);
        assert_eq!(config.parity, Parity::Even);
        assert_eq!(settings.press_cycles, 2);
        assert_eq!(settings.blink_count, 10);
    }

    #[test]
    fn unknown_parity_is_an_error() {
        let settings = Settings::from_json(r#"{"channel": {"parity": "mark"}}"#).unwrap();
        assert!(settings.channel.to_config().is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("periphsim-missing-dir").join("settings.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
