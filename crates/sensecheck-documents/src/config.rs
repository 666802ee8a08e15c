//! Configuration for the document corpus and verifier

use serde::{Deserialize, Serialize};

/// Configuration for chunking, the corpus and document verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Upper bound on chunk length (characters)
    pub chunk_chars: usize,

    /// Documents the corpus holds at once
    pub max_documents: usize,

    /// Largest accepted upload (bytes)
    pub max_file_bytes: u64,

    /// Cell addresses listed in a spreadsheet chunk's location
    pub location_cells: usize,

    /// Sampling temperature for the document oracle
    pub temperature: f32,

    /// Model override for the document role
    pub model: Option<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 800,
            max_documents: 5,
            max_file_bytes: 10 * 1024 * 1024,
            location_cells: 5,
            temperature: 0.3,
            model: None,
        }
    }
}

impl DocumentsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_chars == 0 {
            return Err("chunk_chars must be greater than 0".to_string());
        }
        if self.max_documents == 0 {
            return Err("max_documents must be greater than 0".to_string());
        }
        if self.max_file_bytes == 0 {
            return Err("max_file_bytes must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be within [0, 2]".to_string());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocumentsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_chars, 800);
        assert_eq!(config.max_documents, 5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DocumentsConfig {
            model: Some("openai/gpt-4o-mini".to_string()),
            ..DocumentsConfig::default()
        };
        let parsed = DocumentsConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
