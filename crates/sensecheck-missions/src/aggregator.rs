//! Chapter processing and mission rollups

use crate::config::MissionsConfig;
use crate::error::{MissionError, Result};
use sensecheck_domain::traits::MissionStore;
use sensecheck_domain::{
    unix_timestamp, ChapterId, ChapterStatus, ChapterSummary, Link, LinkStatus, Mission,
    MissionId, MissionSummary, ValidationOutcome,
};
use sensecheck_links::{extract_links_with_prefix, LinkValidator, Probe, ValidationReport};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A chapter that failed during a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFailure {
    /// The failed chapter
    pub chapter_id: ChapterId,
    /// Message recorded on the chapter
    pub message: String,
}

/// Outcome of [`MissionAggregator::process_all_chapters`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Chapters that completed
    pub processed: Vec<ChapterId>,
    /// Chapters that ended in `error`
    pub failed: Vec<ChapterFailure>,
    /// Wall-clock time for the batch
    pub processing_time_ms: u64,
}

impl BatchReport {
    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} chapters processed, {} failed in {}ms",
            self.processed.len(),
            self.failed.len(),
            self.processing_time_ms
        )
    }
}

/// Parse chapter JSON and extract its links
///
/// The JSON is pretty-printed before extraction, so links inside nested
/// string values are found wherever they sit. Link ids are scoped to the
/// chapter: `<chapter_id>-link-<n>`.
pub fn extract_chapter_links(json_content: &str, chapter_id: ChapterId) -> Result<Vec<Link>> {
    let value: serde_json::Value = serde_json::from_str(json_content).map_err(|e| {
        MissionError::Processing(format!("Failed to extract links from JSON content: {}", e))
    })?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| {
        MissionError::Processing(format!("Failed to extract links from JSON content: {}", e))
    })?;
    Ok(extract_links_with_prefix(&text, &chapter_id.to_string()))
}

/// Orchestrates chapter processing on top of a [`MissionStore`]
///
/// Every chapter mutation goes through [`Mission::update_chapter`], so the
/// mission's counters and status are recomputed by summation each time.
pub struct MissionAggregator<S: MissionStore> {
    store: S,
    config: MissionsConfig,
}

impl<S: MissionStore> MissionAggregator<S> {
    /// Create an aggregator over `store`
    pub fn new(store: S, config: MissionsConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &MissionsConfig {
        &self.config
    }

    /// Create an empty mission
    pub fn create_mission(&self, name: &str, description: &str) -> Result<MissionId> {
        if name.trim().is_empty() {
            return Err(MissionError::InvalidInput("Mission name is required".to_string()));
        }
        let id = self
            .store
            .create_mission(Mission::new(name.trim(), description.trim()))
            .map_err(store_error)?;
        info!("Created mission {} ({})", name.trim(), id);
        Ok(id)
    }

    /// Append a pending chapter
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or content, or content that is not
    /// JSON; `NotFound` for an unknown mission.
    pub fn add_chapter(
        &self,
        mission_id: MissionId,
        name: &str,
        json_content: &str,
    ) -> Result<ChapterId> {
        if name.trim().is_empty() || json_content.trim().is_empty() {
            return Err(MissionError::InvalidInput(
                "Chapter name and JSON content are required".to_string(),
            ));
        }
        if serde_json::from_str::<serde_json::Value>(json_content).is_err() {
            return Err(MissionError::InvalidInput("Invalid JSON content".to_string()));
        }
        self.get_mission(mission_id)?;

        let id = self
            .store
            .add_chapter(mission_id, name.trim(), json_content)
            .map_err(store_error)?;
        debug!("Added chapter {} to mission {}", id, mission_id);
        Ok(id)
    }

    /// Fetch a mission
    pub fn get_mission(&self, id: MissionId) -> Result<Mission> {
        self.store
            .get_mission(id)
            .map_err(store_error)?
            .ok_or_else(|| MissionError::NotFound(format!("Mission {}", id)))
    }

    /// All missions, oldest first
    pub fn list_missions(&self) -> Result<Vec<Mission>> {
        self.store.list_missions().map_err(store_error)
    }

    /// Extract a chapter's links and refresh its summary
    ///
    /// The chapter moves to `processing`, then to `completed` or `error`.
    /// On error it keeps the links from its last successful run and records
    /// the message; sibling chapters are never touched.
    pub fn process_chapter(&self, mission_id: MissionId, chapter_id: ChapterId) -> Result<ChapterSummary> {
        let mut mission = self.get_mission(mission_id)?;
        let json_content = mission
            .update_chapter(chapter_id, |chapter| {
                chapter.status = ChapterStatus::Processing;
                chapter.error = None;
                chapter.json_content.clone()
            })
            .ok_or_else(|| chapter_not_found(chapter_id))?;
        self.store.update_mission(mission.clone()).map_err(store_error)?;

        let start = Instant::now();
        let extracted = extract_chapter_links(&json_content, chapter_id);
        let elapsed = start.elapsed().as_millis() as u64;

        let result = mission
            .update_chapter(chapter_id, |chapter| {
                chapter.processing_time_ms = Some(elapsed);
                match extracted {
                    Ok(links) => {
                        let summary = ChapterSummary::from_links(&links);
                        chapter.links = links;
                        chapter.status = ChapterStatus::Completed;
                        chapter.processed_at = Some(unix_timestamp());
                        chapter.summary = Some(summary.clone());
                        Ok(summary)
                    }
                    Err(e) => {
                        let message = match e {
                            MissionError::Processing(message) => message,
                            other => other.to_string(),
                        };
                        chapter.status = ChapterStatus::Error;
                        chapter.error = Some(message.clone());
                        Err(MissionError::Processing(message))
                    }
                }
            })
            .ok_or_else(|| chapter_not_found(chapter_id))?;
        self.store.update_mission(mission).map_err(store_error)?;

        match &result {
            Ok(summary) => info!(
                "Processed chapter {}: {} links in {}ms",
                chapter_id, summary.total_links, elapsed
            ),
            Err(e) => warn!("Chapter {} failed: {}", chapter_id, e),
        }
        result
    }

    /// Process every pending chapter, one at a time
    ///
    /// Chapters are separated by the configured delay. A failing chapter is
    /// logged and recorded in the report; the loop moves on.
    pub async fn process_all_chapters(&self, mission_id: MissionId) -> Result<BatchReport> {
        let mission = self.get_mission(mission_id)?;
        let pending: Vec<ChapterId> = mission
            .chapters()
            .iter()
            .filter(|c| c.status == ChapterStatus::Pending)
            .map(|c| c.id)
            .collect();

        info!(
            "Processing {} pending chapters of mission {}",
            pending.len(),
            mission.name
        );

        let start = Instant::now();
        let mut report = BatchReport::default();
        for (idx, chapter_id) in pending.into_iter().enumerate() {
            if idx > 0 && !self.config.inter_chapter_delay().is_zero() {
                tokio::time::sleep(self.config.inter_chapter_delay()).await;
            }

            match self.process_chapter(mission_id, chapter_id) {
                Ok(_) => report.processed.push(chapter_id),
                Err(e) => report.failed.push(ChapterFailure {
                    chapter_id,
                    message: e.to_string(),
                }),
            }
        }
        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!("{}", report.summary());
        Ok(report)
    }

    /// Set a reviewer status on one link
    pub fn update_link_status(
        &self,
        mission_id: MissionId,
        chapter_id: ChapterId,
        link_id: &str,
        status: LinkStatus,
    ) -> Result<ChapterSummary> {
        self.mutate_link(mission_id, chapter_id, link_id, |link| link.status = status)
    }

    /// Record a probe outcome on one link
    ///
    /// The reviewer status follows [`Link::apply_validation`].
    pub fn apply_link_validation(
        &self,
        mission_id: MissionId,
        chapter_id: ChapterId,
        link_id: &str,
        outcome: ValidationOutcome,
    ) -> Result<ChapterSummary> {
        self.mutate_link(mission_id, chapter_id, link_id, |link| {
            link.apply_validation(outcome)
        })
    }

    /// Probe every link of a chapter and record the outcomes
    pub async fn validate_chapter_links<P: Probe>(
        &self,
        mission_id: MissionId,
        chapter_id: ChapterId,
        validator: &LinkValidator<P>,
    ) -> Result<ValidationReport> {
        let links = self
            .get_mission(mission_id)?
            .chapter(chapter_id)
            .map(|c| c.links.clone())
            .ok_or_else(|| chapter_not_found(chapter_id))?;

        let report = validator.validate_all(links).await?;

        // Re-read: the chapter may have been reprocessed while probes ran.
        let mut mission = self.get_mission(mission_id)?;
        mission
            .update_chapter(chapter_id, |chapter| {
                for validated in &report.links {
                    if let Some(link) = chapter.link_mut(&validated.id) {
                        if link.url == validated.url {
                            *link = validated.clone();
                        }
                    }
                }
                chapter.summary = Some(ChapterSummary::from_links(&chapter.links));
            })
            .ok_or_else(|| chapter_not_found(chapter_id))?;
        self.store.update_mission(mission).map_err(store_error)?;

        info!("Chapter {}: {}", chapter_id, report.summary.summary());
        Ok(report)
    }

    /// Exportable rollup of a mission
    pub fn export_summary(&self, mission_id: MissionId) -> Result<MissionSummary> {
        Ok(self.get_mission(mission_id)?.summary())
    }

    fn mutate_link(
        &self,
        mission_id: MissionId,
        chapter_id: ChapterId,
        link_id: &str,
        f: impl FnOnce(&mut Link),
    ) -> Result<ChapterSummary> {
        let mut mission = self.get_mission(mission_id)?;
        let summary = mission
            .update_chapter(chapter_id, |chapter| {
                let link = chapter
                    .link_mut(link_id)
                    .ok_or_else(|| MissionError::NotFound(format!("Link {}", link_id)))?;
                f(link);
                let summary = ChapterSummary::from_links(&chapter.links);
                chapter.summary = Some(summary.clone());
                Ok::<_, MissionError>(summary)
            })
            .ok_or_else(|| chapter_not_found(chapter_id))??;
        self.store.update_mission(mission).map_err(store_error)?;
        Ok(summary)
    }
}

fn chapter_not_found(id: ChapterId) -> MissionError {
    MissionError::NotFound(format!("Chapter {}", id))
}

fn store_error<E: std::error::Error>(e: E) -> MissionError {
    MissionError::Store(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_chapter_links_from_nested_json() {
        let chapter_id = ChapterId::new();
        let json = r#"{"sections": [{"body": "See [the filing](https://sec.gov/f.htm) and https://x.com/a."}],
                       "refs": ["https://sec.gov/f.htm", "https://y.org/b"]}"#;

        let links = extract_chapter_links(json, chapter_id).unwrap();
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://sec.gov/f.htm", "https://x.com/a", "https://y.org/b"]);
        assert_eq!(links[0].anchor_text, "the filing");
        assert_eq!(links[0].id, format!("{}-link-1", chapter_id));
        assert!(links.iter().all(|l| l.status == LinkStatus::Unverified));
    }

    #[test]
    fn test_extract_chapter_links_rejects_malformed_json() {
        let result = extract_chapter_links("{not json", ChapterId::new());
        match result {
            Err(MissionError::Processing(message)) => {
                assert!(message.starts_with("Failed to extract links from JSON content"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_batch_report_summary() {
        let report = BatchReport {
            processed: vec![ChapterId::new(), ChapterId::new()],
            failed: vec![ChapterFailure {
                chapter_id: ChapterId::new(),
                message: "bad".to_string(),
            }],
            processing_time_ms: 12,
        };
        assert_eq!(report.summary(), "2 chapters processed, 1 failed in 12ms");
    }
}
