//! Mission command implementation.

use crate::cli::MissionArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sensecheck_domain::ChapterStatus;
use sensecheck_links::{LinkValidator, Probe};
use sensecheck_missions::{InMemoryMissionStore, MissionAggregator, MissionError};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A batch file: a named list of chapters
#[derive(Debug, Deserialize)]
pub struct MissionFile {
    /// Mission name
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Chapters in order
    pub chapters: Vec<ChapterEntry>,
}

/// One chapter of a batch file
#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    /// Chapter name
    pub name: String,
    /// Chapter JSON, inline or as a JSON-encoded string
    pub content: Value,
}

impl ChapterEntry {
    /// The chapter's JSON text
    ///
    /// A string value is taken as already-serialized JSON.
    pub fn json_content(&self) -> Result<String> {
        match &self.content {
            Value::String(raw) => Ok(raw.clone()),
            other => Ok(serde_json::to_string(other)?),
        }
    }
}

/// Execute the mission command.
pub async fn execute_mission(args: MissionArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    if args.validate {
        let validator = LinkValidator::http(config.links.clone())?;
        run_mission(args, config, Some(&validator), formatter).await
    } else {
        run_mission::<sensecheck_links::HttpProbe>(args, config, None, formatter).await
    }
}

/// Load a batch file, process its chapters and optionally probe their links.
pub async fn run_mission<P: Probe>(
    args: MissionArgs,
    config: &Config,
    validator: Option<&LinkValidator<P>>,
    formatter: &Formatter,
) -> Result<String> {
    let contents = std::fs::read_to_string(&args.file)?;
    let file: MissionFile = serde_json::from_str(&contents)?;
    if file.chapters.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no chapters",
            args.file.display()
        )));
    }

    let name = args
        .name
        .or(file.name)
        .or_else(|| {
            args.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Untitled mission".to_string());

    let aggregator = MissionAggregator::new(InMemoryMissionStore::new(), config.missions.clone());
    let mission_id = aggregator.create_mission(&name, &file.description)?;

    for entry in &file.chapters {
        match aggregator.add_chapter(mission_id, &entry.name, &entry.json_content()?) {
            Ok(_) => {}
            Err(MissionError::InvalidInput(reason)) => {
                warn!("Skipping chapter '{}': {}", entry.name, reason);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let report = aggregator.process_all_chapters(mission_id).await?;

    if let Some(validator) = validator {
        let mission = aggregator.get_mission(mission_id)?;
        for chapter in mission.chapters() {
            if chapter.status != ChapterStatus::Completed || chapter.links.is_empty() {
                continue;
            }
            aggregator
                .validate_chapter_links(mission_id, chapter.id, validator)
                .await?;
        }
    }

    let mission = aggregator.get_mission(mission_id)?;
    let chapter_names: Vec<String> = mission.chapters().iter().map(|c| c.name.clone()).collect();
    let summary = aggregator.export_summary(mission_id)?;
    formatter.format_mission(&summary, &chapter_names, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use sensecheck_links::{LinkConfig, ProbeResult};
    use std::io::Write;

    struct NotFoundProbe;

    impl Probe for NotFoundProbe {
        async fn probe(&self, _url: &str) -> ProbeResult {
            ProbeResult::Status(404)
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.missions.inter_chapter_delay_ms = 0;
        config.links.retry_backoff_ms = 0;
        config.links.batch_delay_ms = 0;
        config
    }

    fn batch_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(file: &tempfile::NamedTempFile) -> MissionArgs {
        MissionArgs {
            file: file.path().to_path_buf(),
            name: None,
            validate: false,
        }
    }

    const BATCH: &str = r#"{
        "name": "Series A diligence",
        "chapters": [
            {"name": "Market", "content": {"body": "See [Gartner](https://gartner.com/tam) and https://idc.com/r."}},
            {"name": "Raw", "content": "{\"refs\": [\"https://sec.gov/filing\"]}"},
            {"name": "Broken", "content": "{not json"}
        ]
    }"#;

    #[tokio::test]
    async fn test_mission_processes_valid_chapters() {
        let file = batch_file(BATCH);
        let formatter = Formatter::new(OutputFormat::Json, false);

        let output = run_mission::<NotFoundProbe>(args(&file), &config(), None, &formatter)
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["missionName"], "Series A diligence");
        assert_eq!(value["totalChapters"], 2);
        assert_eq!(value["completedChapters"], 2);
        assert_eq!(value["totalLinks"], 3);
        assert_eq!(value["linksByStatus"]["unverified"], 3);
        assert_eq!(value["chapterSummaries"][1]["chapterName"], "Raw");
    }

    #[tokio::test]
    async fn test_mission_validation_marks_broken_links() {
        let file = batch_file(BATCH);
        let formatter = Formatter::new(OutputFormat::Json, false);
        let validator = LinkValidator::new(
            NotFoundProbe,
            LinkConfig {
                batch_delay_ms: 0,
                retry_backoff_ms: 0,
                ..LinkConfig::default()
            },
        );

        let output = run_mission(args(&file), &config(), Some(&validator), &formatter)
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["linksByStatus"]["invalid"], 3);
        assert_eq!(
            value["chapterSummaries"][0]["keyFindings"][0],
            "Found 2 broken links"
        );
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let file = batch_file(r#"{"chapters": []}"#);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = run_mission::<NotFoundProbe>(args(&file), &config(), None, &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_chapter_content_forms() {
        let inline = ChapterEntry {
            name: "a".to_string(),
            content: serde_json::json!({"k": "v"}),
        };
        assert_eq!(inline.json_content().unwrap(), r#"{"k":"v"}"#);

        let raw = ChapterEntry {
            name: "b".to_string(),
            content: Value::String("[1, 2]".to_string()),
        };
        assert_eq!(raw.json_content().unwrap(), "[1, 2]");
    }
}
