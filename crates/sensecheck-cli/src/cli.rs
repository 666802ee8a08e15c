//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SenseCheck - verify the factual claims and sources in business memos.
#[derive(Debug, Parser)]
#[command(name = "sensecheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// OpenRouter API key (overrides the configuration file)
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per item)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the ten most important claims from a memo
    Extract(ExtractArgs),

    /// Verify a single claim against web sources
    Verify(VerifyArgs),

    /// Verify a claim against uploaded documents
    VerifyDocs(VerifyDocsArgs),

    /// Extract claims from a memo and verify each of them
    Check(CheckArgs),

    /// Extract (and optionally probe) the links in a text
    Links(LinksArgs),

    /// Process a batch of JSON chapters as a mission
    Mission(MissionArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Where to read a memo or text body from.
#[derive(Debug, Clone, Parser)]
pub struct TextSource {
    /// Text given inline
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long = "file", value_name = "PATH", conflicts_with_all = ["text", "stdin"])]
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub source: TextSource,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Claim to verify
    pub claim: String,

    /// Memo the claim came from, used as context for the research question
    #[arg(short, long, value_name = "PATH")]
    pub memo: Option<PathBuf>,

    /// Whether the memo is about an internal venture or an external company
    #[arg(short = 't', long, value_enum, default_value = "external")]
    pub company_type: CompanyTypeArg,
}

/// Arguments for the verify-docs command.
#[derive(Debug, Parser)]
pub struct VerifyDocsArgs {
    /// Claim to verify
    pub claim: String,

    /// Excel or PDF files to check against
    #[arg(short, long = "document", value_name = "PATH", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: TextSource,

    /// Whether the memo is about an internal venture or an external company
    #[arg(short = 't', long, value_enum, default_value = "external")]
    pub company_type: CompanyTypeArg,

    /// Excel or PDF files to check every claim against as well
    #[arg(short, long = "document", value_name = "PATH")]
    pub documents: Vec<PathBuf>,

    /// Skip web verification (documents only)
    #[arg(long)]
    pub skip_web: bool,
}

/// Arguments for the links command.
#[derive(Debug, Parser)]
pub struct LinksArgs {
    #[command(flatten)]
    pub source: TextSource,

    /// Probe every link over HTTP
    #[arg(short, long)]
    pub validate: bool,

    /// Links probed at the same time (overrides the configuration)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the mission command.
#[derive(Debug, Parser)]
pub struct MissionArgs {
    /// JSON file with the chapters: `{"name": ..., "chapters": [{"name": ..., "content": {...}}]}`
    pub file: PathBuf,

    /// Mission name (overrides the name in the file)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Probe the links of every completed chapter
    #[arg(short, long)]
    pub validate: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Company type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CompanyTypeArg {
    /// An external company
    External,
    /// An internal corporate venture
    Internal,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<CompanyTypeArg> for sensecheck_verifier::CompanyType {
    fn from(company_type: CompanyTypeArg) -> Self {
        match company_type {
            CompanyTypeArg::External => sensecheck_verifier::CompanyType::External,
            CompanyTypeArg::Internal => sensecheck_verifier::CompanyType::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "sensecheck",
            "verify",
            "Revenue was $10M in 2024",
            "--company-type",
            "internal",
        ]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.claim, "Revenue was $10M in 2024");
                assert_eq!(args.company_type, CompanyTypeArg::Internal);
                assert!(args.memo.is_none());
            }
            other => panic!("Expected Verify command, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_docs_requires_a_document() {
        assert!(Cli::try_parse_from(["sensecheck", "verify-docs", "claim"]).is_err());

        let cli = Cli::parse_from([
            "sensecheck",
            "verify-docs",
            "claim",
            "-d",
            "model.xlsx",
            "--document",
            "deck.pdf",
        ]);
        match cli.command {
            Command::VerifyDocs(args) => assert_eq!(args.documents.len(), 2),
            other => panic!("Expected VerifyDocs command, got {:?}", other),
        }
    }

    #[test]
    fn test_text_source_conflicts() {
        assert!(
            Cli::try_parse_from(["sensecheck", "links", "inline", "--file", "memo.txt"]).is_err()
        );

        let cli = Cli::parse_from(["sensecheck", "links", "--file", "memo.txt", "--validate"]);
        match cli.command {
            Command::Links(args) => {
                assert!(args.validate);
                assert_eq!(args.source.file, Some(PathBuf::from("memo.txt")));
            }
            other => panic!("Expected Links command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["sensecheck", "config", "show", "--format", "json"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_company_type_conversion() {
        let company_type: sensecheck_verifier::CompanyType = CompanyTypeArg::Internal.into();
        assert_eq!(company_type, sensecheck_verifier::CompanyType::Internal);
    }
}
