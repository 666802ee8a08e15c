//! Links command implementation.

use crate::cli::LinksArgs;
use crate::commands::read_text;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sensecheck_links::{extract_links, LinkValidator, Probe};

/// Execute the links command, probing over HTTP when `--validate` is given.
pub async fn execute_links(args: LinksArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    if args.validate {
        let validator = LinkValidator::http(config.links.clone())?;
        run_links(args, &validator, formatter).await
    } else {
        let text = read_text(&args.source)?;
        formatter.format_links(&extract_links(&text), None)
    }
}

/// Extract the links of the given text and probe them with `validator`.
pub async fn run_links<P: Probe>(
    args: LinksArgs,
    validator: &LinkValidator<P>,
    formatter: &Formatter,
) -> Result<String> {
    let text = read_text(&args.source)?;
    let links = extract_links(&text);
    let concurrency = args
        .concurrency
        .unwrap_or(validator.config().max_concurrency);

    let report = validator.validate_all_with(links, concurrency).await?;
    formatter.format_links(&report.links, Some(&report.summary))
}
