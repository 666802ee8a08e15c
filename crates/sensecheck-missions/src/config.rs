//! Configuration for the mission aggregator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for batch chapter processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionsConfig {
    /// Pause between chapters in a batch (milliseconds)
    pub inter_chapter_delay_ms: u64,
}

impl Default for MissionsConfig {
    fn default() -> Self {
        Self {
            inter_chapter_delay_ms: 500,
        }
    }
}

impl MissionsConfig {
    /// Get the inter-chapter delay as a Duration
    pub fn inter_chapter_delay(&self) -> Duration {
        Duration::from_millis(self.inter_chapter_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.inter_chapter_delay_ms > 60_000 {
            return Err("inter_chapter_delay_ms must be at most 60000".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
