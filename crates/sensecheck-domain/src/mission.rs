//! Missions and chapters
//!
//! A mission owns an ordered list of chapters; each chapter owns raw JSON
//! content, the links extracted from it and a rollup summary. The mission's
//! link counters are derived, so chapters are only reachable mutably through
//! [`Mission::update_chapter`], which recomputes them afterwards.

use crate::{ChapterId, Link, LinkStatus, MissionId};

/// Lifecycle of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    /// Work remains
    Active,
    /// Every chapter completed and every link judged
    Completed,
}

impl MissionStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Active => "active",
            MissionStatus::Completed => "completed",
        }
    }
}

/// Lifecycle of a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterStatus {
    /// Added, not processed
    Pending,
    /// Link extraction in progress
    Processing,
    /// Links extracted
    Completed,
    /// Processing failed; prior links are kept
    Error,
}

impl ChapterStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Pending => "pending",
            ChapterStatus::Processing => "processing",
            ChapterStatus::Completed => "completed",
            ChapterStatus::Error => "error",
        }
    }
}

/// Per-chapter link rollup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChapterSummary {
    /// All links
    pub total_links: usize,
    /// Links judged valid
    pub valid_links: usize,
    /// Links judged invalid
    pub invalid_links: usize,
    /// Links judged suspicious
    pub suspicious_links: usize,
    /// Links not yet judged
    pub unverified_links: usize,
    /// Short human-readable observations
    pub key_findings: Vec<String>,
}

impl ChapterSummary {
    /// Summarize a chapter's links
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::{ChapterSummary, Link, LinkStatus};
    ///
    /// let mut broken = Link::new("link-1", "https://x.com/a", "a");
    /// broken.status = LinkStatus::Invalid;
    /// let summary = ChapterSummary::from_links(&[broken]);
    /// assert_eq!(summary.key_findings, vec!["Found 1 broken link".to_string()]);
    /// ```
    pub fn from_links(links: &[Link]) -> Self {
        let count = |status: LinkStatus| links.iter().filter(|l| l.status == status).count();

        let mut summary = Self {
            total_links: links.len(),
            valid_links: count(LinkStatus::Valid),
            invalid_links: count(LinkStatus::Invalid),
            suspicious_links: count(LinkStatus::Suspicious),
            unverified_links: count(LinkStatus::Unverified),
            key_findings: Vec::new(),
        };

        if summary.invalid_links > 0 {
            summary.key_findings.push(format!(
                "Found {} broken {}",
                summary.invalid_links,
                plural(summary.invalid_links, "link", "links")
            ));
        }
        if summary.suspicious_links > 0 {
            summary.key_findings.push(format!(
                "Detected {} suspicious {}",
                summary.suspicious_links,
                plural(summary.suspicious_links, "source", "sources")
            ));
        }
        if summary.total_links > 0 && summary.valid_links == summary.total_links {
            summary
                .key_findings
                .push("All links verified successfully".to_string());
        }

        summary
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// A unit of batched content within a mission
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Identifier
    pub id: ChapterId,
    /// Owning mission
    pub mission_id: MissionId,
    /// Display name
    pub name: String,
    /// 1-based position in the mission
    pub order: usize,
    /// Raw JSON content as submitted
    pub json_content: String,
    /// Links extracted at the last successful processing
    pub links: Vec<Link>,
    /// Lifecycle
    pub status: ChapterStatus,
    /// Completion time of the last processing, seconds since the Unix epoch
    pub processed_at: Option<u64>,
    /// Duration of the last processing attempt
    pub processing_time_ms: Option<u64>,
    /// Message from the last failed processing
    pub error: Option<String>,
    /// Rollup of `links`
    pub summary: Option<ChapterSummary>,
}

impl Chapter {
    /// Summary of the current links, computing one if none is cached
    pub fn current_summary(&self) -> ChapterSummary {
        self.summary
            .clone()
            .unwrap_or_else(|| ChapterSummary::from_links(&self.links))
    }

    /// Find a link by id
    pub fn link_mut(&mut self, link_id: &str) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == link_id)
    }
}

/// Link counts across a mission, by reviewer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinksByStatus {
    /// Valid links
    pub valid: usize,
    /// Invalid links
    pub invalid: usize,
    /// Suspicious links
    pub suspicious: usize,
    /// Unverified links
    pub unverified: usize,
}

/// Exportable mission rollup
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSummary {
    /// Mission identifier
    pub mission_id: MissionId,
    /// Mission name
    pub mission_name: String,
    /// Number of chapters
    pub total_chapters: usize,
    /// Chapters in `Completed`
    pub completed_chapters: usize,
    /// Links across all chapters
    pub total_links: usize,
    /// Links across all chapters, by status
    pub links_by_status: LinksByStatus,
    /// One summary per chapter, in chapter order
    pub chapter_summaries: Vec<ChapterSummary>,
    /// Export time, seconds since the Unix epoch
    pub export_date: u64,
}

/// A named batch of chapters
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    /// Identifier
    pub id: MissionId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Creation time, seconds since the Unix epoch
    pub created_at: u64,
    /// Last mutation time, seconds since the Unix epoch
    pub updated_at: u64,
    chapters: Vec<Chapter>,
    status: MissionStatus,
    total_links: usize,
    verified_links: usize,
}

impl Mission {
    /// Create an empty, active mission
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = crate::unix_timestamp();
        Self {
            id: MissionId::new(),
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
            chapters: Vec::new(),
            status: MissionStatus::Active,
            total_links: 0,
            verified_links: 0,
        }
    }

    /// Append a pending chapter and return its id
    pub fn add_chapter(&mut self, name: impl Into<String>, json_content: impl Into<String>) -> ChapterId {
        let chapter = Chapter {
            id: ChapterId::new(),
            mission_id: self.id,
            name: name.into(),
            order: self.chapters.len() + 1,
            json_content: json_content.into(),
            links: Vec::new(),
            status: ChapterStatus::Pending,
            processed_at: None,
            processing_time_ms: None,
            error: None,
            summary: None,
        };
        let id = chapter.id;
        self.chapters.push(chapter);
        self.recompute_totals();
        id
    }

    /// Chapters in order
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Find a chapter by id
    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Mutate one chapter, then recompute the derived counters
    ///
    /// Returns `None` if the chapter does not exist.
    pub fn update_chapter<R>(&mut self, id: ChapterId, f: impl FnOnce(&mut Chapter) -> R) -> Option<R> {
        let chapter = self.chapters.iter_mut().find(|c| c.id == id)?;
        let result = f(chapter);
        self.recompute_totals();
        Some(result)
    }

    /// Current lifecycle status
    pub fn status(&self) -> MissionStatus {
        self.status
    }

    /// Links across all chapters
    pub fn total_links(&self) -> usize {
        self.total_links
    }

    /// Links with a status other than `Unverified`
    pub fn verified_links(&self) -> usize {
        self.verified_links
    }

    /// Recompute link counters and status by summing over chapters
    pub fn recompute_totals(&mut self) {
        self.total_links = self.chapters.iter().map(|c| c.links.len()).sum();
        self.verified_links = self
            .chapters
            .iter()
            .flat_map(|c| c.links.iter())
            .filter(|l| l.is_verified())
            .count();
        self.updated_at = crate::unix_timestamp();

        let all_completed = self
            .chapters
            .iter()
            .all(|c| c.status == ChapterStatus::Completed);
        let all_verified = self.total_links > 0 && self.verified_links == self.total_links;

        self.status = if all_completed && all_verified {
            MissionStatus::Completed
        } else {
            MissionStatus::Active
        };
    }

    /// Build the exportable rollup
    pub fn summary(&self) -> MissionSummary {
        let mut links_by_status = LinksByStatus::default();
        for link in self.chapters.iter().flat_map(|c| c.links.iter()) {
            match link.status {
                LinkStatus::Valid => links_by_status.valid += 1,
                LinkStatus::Invalid => links_by_status.invalid += 1,
                LinkStatus::Suspicious => links_by_status.suspicious += 1,
                LinkStatus::Unverified => links_by_status.unverified += 1,
            }
        }

        MissionSummary {
            mission_id: self.id,
            mission_name: self.name.clone(),
            total_chapters: self.chapters.len(),
            completed_chapters: self
                .chapters
                .iter()
                .filter(|c| c.status == ChapterStatus::Completed)
                .count(),
            total_links: self.total_links,
            links_by_status,
            chapter_summaries: self.chapters.iter().map(Chapter::current_summary).collect(),
            export_date: crate::unix_timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(n: usize, status: LinkStatus) -> Link {
        let mut link = Link::new(format!("link-{}", n), format!("https://x.com/{}", n), "x");
        link.status = status;
        link
    }

    #[test]
    fn test_summary_findings_pluralize() {
        let links = vec![
            link(1, LinkStatus::Invalid),
            link(2, LinkStatus::Invalid),
            link(3, LinkStatus::Suspicious),
        ];
        let summary = ChapterSummary::from_links(&links);
        assert_eq!(
            summary.key_findings,
            vec![
                "Found 2 broken links".to_string(),
                "Detected 1 suspicious source".to_string()
            ]
        );
    }

    #[test]
    fn test_all_valid_finding() {
        let links = vec![link(1, LinkStatus::Valid), link(2, LinkStatus::Valid)];
        let summary = ChapterSummary::from_links(&links);
        assert_eq!(summary.key_findings, vec!["All links verified successfully".to_string()]);
    }

    #[test]
    fn test_empty_chapter_has_no_findings() {
        assert!(ChapterSummary::from_links(&[]).key_findings.is_empty());
    }

    #[test]
    fn test_totals_recomputed_on_update() {
        let mut mission = Mission::new("Diligence", "");
        let a = mission.add_chapter("A", "{}");
        let b = mission.add_chapter("B", "{}");
        assert_eq!(mission.chapter(b).unwrap().order, 2);

        mission.update_chapter(a, |c| {
            c.links = vec![link(1, LinkStatus::Unverified), link(2, LinkStatus::Valid)];
            c.status = ChapterStatus::Completed;
        });
        assert_eq!(mission.total_links(), 2);
        assert_eq!(mission.verified_links(), 1);
        assert_eq!(mission.status(), MissionStatus::Active);
    }

    #[test]
    fn test_mission_completes_when_everything_is_judged() {
        let mut mission = Mission::new("Diligence", "");
        let a = mission.add_chapter("A", "{}");
        mission.update_chapter(a, |c| {
            c.links = vec![link(1, LinkStatus::Invalid)];
            c.status = ChapterStatus::Completed;
        });
        assert_eq!(mission.status(), MissionStatus::Completed);

        mission.update_chapter(a, |c| c.links[0].status = LinkStatus::Unverified);
        assert_eq!(mission.status(), MissionStatus::Active);
    }

    #[test]
    fn test_mission_without_links_stays_active() {
        let mut mission = Mission::new("Empty", "");
        let a = mission.add_chapter("A", "{}");
        mission.update_chapter(a, |c| c.status = ChapterStatus::Completed);
        assert_eq!(mission.status(), MissionStatus::Active);
    }

    #[test]
    fn test_export_summary_counts() {
        let mut mission = Mission::new("Diligence", "");
        let a = mission.add_chapter("A", "{}");
        mission.add_chapter("B", "{}");
        mission.update_chapter(a, |c| {
            c.links = vec![link(1, LinkStatus::Valid), link(2, LinkStatus::Suspicious)];
            c.status = ChapterStatus::Completed;
        });

        let summary = mission.summary();
        assert_eq!(summary.total_chapters, 2);
        assert_eq!(summary.completed_chapters, 1);
        assert_eq!(summary.total_links, 2);
        assert_eq!(summary.links_by_status.valid, 1);
        assert_eq!(summary.links_by_status.suspicious, 1);
        assert_eq!(summary.chapter_summaries.len(), 2);
    }

    #[test]
    fn test_update_missing_chapter() {
        let mut mission = Mission::new("Diligence", "");
        assert!(mission.update_chapter(ChapterId::new(), |_| ()).is_none());
    }
}
