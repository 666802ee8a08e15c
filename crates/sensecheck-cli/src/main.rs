//! SenseCheck CLI - verify the claims and sources of business memos.

use clap::Parser;
use sensecheck_cli::cli::{ConfigAction, ConfigArgs};
use sensecheck_cli::commands;
use sensecheck_cli::config::OutputFormat;
use sensecheck_cli::{Cli, CliError, Command, Config, Formatter};
use sensecheck_llm::OpenRouterProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> sensecheck_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let format: Option<OutputFormat> = cli.format.map(Into::into);

    // Path and init must work even when the existing file does not parse
    if let Command::Config(ConfigArgs { action }) = &cli.command {
        if !matches!(action, ConfigAction::Show) {
            let formatter = Formatter::new(format.unwrap_or(OutputFormat::Table), !cli.no_color);
            let output =
                commands::execute_config(action.clone(), &config_path, &Config::default(), &formatter)?;
            println!("{}", output);
            return Ok(());
        }
    }

    let config = Config::load_from(&config_path)?
        .with_api_key(cli.api_key.clone())
        .resolve_models();
    config.validate()?;

    let format = format.unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Config(ConfigArgs { action }) => {
            commands::execute_config(action, &config_path, &config, &formatter)?
        }
        Command::Links(args) => commands::execute_links(args, &config, &formatter).await?,
        Command::Mission(args) => commands::execute_mission(args, &config, &formatter).await?,
        Command::Extract(args) => {
            commands::execute_extract(args, oracle(&config)?, &config, &formatter).await?
        }
        Command::Verify(args) => {
            commands::execute_verify(args, oracle(&config)?, &config, &formatter).await?
        }
        Command::VerifyDocs(args) => {
            commands::execute_verify_docs(args, oracle(&config)?, &config, &formatter).await?
        }
        Command::Check(args) => {
            commands::execute_check(args, oracle(&config)?, &config, &formatter).await?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Build the OpenRouter client used by the oracle-backed commands.
fn oracle(config: &Config) -> sensecheck_cli::Result<Arc<OpenRouterProvider>> {
    if config.llm.api_key.is_none() {
        return Err(CliError::Config(
            "No API key configured. Set OPENROUTER_API_KEY, pass --api-key or add api_key under [llm]."
                .into(),
        ));
    }
    Ok(Arc::new(OpenRouterProvider::new(config.llm.clone())?))
}
