//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Shortest accepted memo (characters)
    pub min_memo_chars: usize,

    /// Longest accepted memo (characters)
    pub max_memo_chars: usize,

    /// Sampling temperature for the extraction call
    pub temperature: f32,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Model override for the extraction role
    pub model: Option<String>,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_memo_chars == 0 {
            return Err("min_memo_chars must be greater than 0".to_string());
        }
        if self.min_memo_chars > self.max_memo_chars {
            return Err("min_memo_chars cannot exceed max_memo_chars".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be within [0, 2]".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            min_memo_chars: 50,
            max_memo_chars: 10_000,
            temperature: 0.2,
            extraction_timeout_secs: 120,
            model: None,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: shorter timeout for interactive use
    pub fn aggressive() -> Self {
        Self {
            extraction_timeout_secs: 45,
            ..Self::default()
        }
    }

    /// Lenient preset: longer timeout for slow models
    pub fn lenient() -> Self {
        Self {
            extraction_timeout_secs: 300,
            ..Self::default()
        }
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
