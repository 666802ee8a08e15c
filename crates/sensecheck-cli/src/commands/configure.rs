//! Config command implementation.

use crate::cli::ConfigAction;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute a config action against the file at `path`.
///
/// `show` prints the effective configuration with the API key masked.
pub fn execute_config(
    action: ConfigAction,
    path: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    match action {
        ConfigAction::Path => Ok(path.display().to_string()),
        ConfigAction::Show => {
            let mut shown = config.clone();
            if shown.llm.api_key.is_some() {
                shown.llm.api_key = Some("********".to_string());
            }
            shown.to_toml()
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(path)?;
            Ok(formatter.success(&format!("Wrote default configuration to {}", path.display())))
        }
    }
}
