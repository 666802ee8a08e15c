//! Configuration for the grounded verifier

use serde::{Deserialize, Serialize};

/// Configuration for preprocessing, grounded search and structuring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Sampling temperature for all three oracle calls
    pub temperature: f32,

    /// Characters of the grounded answer kept as heuristic reasoning
    pub reasoning_excerpt_chars: usize,

    /// Model override for rewriting the claim into a research question
    pub preprocessing_model: Option<String>,

    /// Model override for the search-grounded call
    pub grounded_model: Option<String>,

    /// Model override for structuring the grounded answer
    pub structuring_model: Option<String>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            reasoning_excerpt_chars: 300,
            preprocessing_model: None,
            grounded_model: None,
            structuring_model: None,
        }
    }
}

impl VerifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be within [0, 2]".to_string());
        }
        if self.reasoning_excerpt_chars == 0 {
            return Err("reasoning_excerpt_chars must be greater than 0".to_string());
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
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.reasoning_excerpt_chars, 300);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = VerifierConfig::from_toml(r#"grounded_model = "perplexity/sonar""#).unwrap();
        assert_eq!(config.grounded_model.as_deref(), Some("perplexity/sonar"));
        assert_eq!(config.temperature, 0.3);
    }

    #[test]
    fn test_zero_excerpt_rejected() {
        let config = VerifierConfig {
            reasoning_excerpt_chars: 0,
            ..VerifierConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
