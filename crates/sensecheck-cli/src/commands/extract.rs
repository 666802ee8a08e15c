//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::read_text;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use sensecheck_domain::traits::LlmProvider;
use sensecheck_extractor::Extractor;
use std::sync::Arc;

/// Execute the extract command.
pub async fn execute_extract<L: LlmProvider>(
    args: ExtractArgs,
    provider: Arc<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let memo = read_text(&args.source)?;
    let model_name = config
        .extractor
        .model
        .clone()
        .unwrap_or_else(|| config.llm.default_model.clone());

    let result = Extractor::from_shared(provider, config.extractor.clone())
        .with_model_name(model_name)
        .extract(&memo)
        .await?;

    let mut out = formatter.format_claims(&result.claims)?;
    if formatter.format() == OutputFormat::Table {
        let meta = &result.metadata;
        out.push('\n');
        out.push_str(&formatter.info(&format!(
            "{} claims from {} in {}ms",
            result.claims.len(),
            meta.model_name,
            meta.processing_time_ms
        )));
        if meta.truncated {
            out.push('\n');
            out.push_str(&formatter.warning(&format!(
                "The model returned {} items; kept the most important",
                meta.items_returned
            )));
        }
        if meta.items_skipped > 0 {
            out.push('\n');
            out.push_str(&formatter.warning(&format!(
                "Skipped {} malformed items",
                meta.items_skipped
            )));
        }
    }
    Ok(out)
}
