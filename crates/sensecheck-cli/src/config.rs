//! Configuration management for the CLI.
//!
//! One TOML file holds a section per pipeline component. Every section is
//! optional and falls back to the component's defaults.

use crate::error::{CliError, Result};
use sensecheck_documents::DocumentsConfig;
use sensecheck_extractor::ExtractorConfig;
use sensecheck_links::LinkConfig;
use sensecheck_llm::LlmConfig;
use sensecheck_missions::MissionsConfig;
use sensecheck_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub settings: Settings,

    /// Oracle client
    pub llm: LlmConfig,

    /// Claim extraction
    pub extractor: ExtractorConfig,

    /// Grounded verification
    pub verifier: VerifierConfig,

    /// Document corpus and document verification
    pub documents: DocumentsConfig,

    /// Link probing
    pub links: LinkConfig,

    /// Chapter batches
    pub missions: MissionsConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sensecheck").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Use `api_key` unless it is blank.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        self
    }

    /// Fill each component's unset model from `[llm.models]`.
    ///
    /// A model named in a component's own section wins.
    pub fn resolve_models(mut self) -> Self {
        let models = &self.llm.models;
        fill(&mut self.extractor.model, &models.extraction);
        fill(&mut self.verifier.preprocessing_model, &models.preprocessing);
        fill(&mut self.verifier.grounded_model, &models.grounded);
        fill(&mut self.verifier.structuring_model, &models.structuring);
        fill(&mut self.documents.model, &models.document);
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("llm", self.llm.validate()),
            ("extractor", self.extractor.validate()),
            ("verifier", self.verifier.validate()),
            ("documents", self.documents.validate()),
            ("links", self.links.validate()),
            ("missions", self.missions.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }
}

fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(fallback);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
