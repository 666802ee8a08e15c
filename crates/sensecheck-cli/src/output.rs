//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sensecheck_domain::{
    Claim, DocumentVerdict, GroundedStatus, GroundedVerdict, Link, MissionSummary,
};
use sensecheck_links::ValidationSummary;
use sensecheck_missions::BatchReport;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest claim or reasoning text shown in a table cell
const CELL_CHARS: usize = 80;

/// Everything learned about one claim during a `check` run
#[derive(Debug, Clone)]
pub struct ClaimReport {
    /// The extracted claim
    pub claim: Claim,
    /// Web verdict, or the error that prevented one; `None` when skipped
    pub grounded: Option<std::result::Result<GroundedVerdict, String>>,
    /// Document verdict, or the error that prevented one; `None` when skipped
    pub document: Option<std::result::Result<DocumentVerdict, String>>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted claims.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = claims.iter().map(claim_json).collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(claims
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if claims.is_empty() {
                    return Ok(self.colorize("No claims found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Category", "Importance", "Confidence", "Range", "Claim"]);
                for (idx, claim) in claims.iter().enumerate() {
                    builder.push_record([
                        (idx + 1).to_string(),
                        claim.category.as_str().to_string(),
                        claim.importance.to_string(),
                        claim.confidence.to_string(),
                        format!("{}..{}", claim.range.start, claim.range.end),
                        truncate(&claim.text, CELL_CHARS),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a web verdict.
    pub fn format_grounded(&self, claim: &str, verdict: &GroundedVerdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&grounded_json(verdict))?),
            OutputFormat::Quiet => Ok(verdict.status.as_str().to_string()),
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("Claim:      {}", claim),
                    format!(
                        "Verdict:    {} ({})",
                        self.status_label(verdict.status),
                        verdict.confidence
                    ),
                    format!("Parsed:     {}", verdict.provenance.as_str()),
                    String::new(),
                    verdict.reasoning.clone(),
                ];
                if !verdict.sources.is_empty() {
                    lines.push(String::new());
                    lines.push("Sources:".to_string());
                    for (idx, source) in verdict.sources.iter().enumerate() {
                        lines.push(format!("  [{}] {}", idx + 1, source));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a document verdict.
    pub fn format_document_verdict(&self, claim: &str, verdict: &DocumentVerdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&document_json(verdict))?),
            OutputFormat::Quiet => Ok(verdict.status.as_str().to_string()),
            OutputFormat::Table => {
                let mut out = vec![
                    format!("Claim:      {}", claim),
                    format!("Verdict:    {} ({})", verdict.status.as_str(), verdict.confidence),
                    String::new(),
                    verdict.reasoning.clone(),
                ];
                if !verdict.citations.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["File", "Location", "Excerpt"]);
                    for citation in &verdict.citations {
                        builder.push_record([
                            citation.file_name.clone(),
                            citation.location.clone(),
                            truncate(&citation.content, CELL_CHARS),
                        ]);
                    }
                    out.push(String::new());
                    out.push(render(builder));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format the results of a `check` run.
    pub fn format_reports(&self, reports: &[ClaimReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = reports
                    .iter()
                    .map(|r| {
                        json!({
                            "claim": claim_json(&r.claim),
                            "grounded": r.grounded.as_ref().map(|v| match v {
                                Ok(verdict) => grounded_json(verdict),
                                Err(e) => json!({ "error": e }),
                            }),
                            "document": r.document.as_ref().map(|v| match v {
                                Ok(verdict) => document_json(verdict),
                                Err(e) => json!({ "error": e }),
                            }),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(reports
                .iter()
                .map(|r| {
                    let web = match &r.grounded {
                        Some(Ok(v)) => v.status.as_str(),
                        Some(Err(_)) => "verification_error",
                        None => "-",
                    };
                    format!("{}\t{}", web, r.claim.text)
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if reports.is_empty() {
                    return Ok(self.colorize("No claims found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Claim", "Web", "Sources", "Documents"]);
                for (idx, report) in reports.iter().enumerate() {
                    let (web, sources) = match &report.grounded {
                        Some(Ok(v)) => (
                            format!("{} ({})", v.status.as_str(), v.confidence),
                            v.sources.len().to_string(),
                        ),
                        Some(Err(_)) => ("verification_error".to_string(), "-".to_string()),
                        None => ("-".to_string(), "-".to_string()),
                    };
                    let documents = match &report.document {
                        Some(Ok(v)) => format!("{} ({})", v.status.as_str(), v.confidence),
                        Some(Err(_)) => "error".to_string(),
                        None => "-".to_string(),
                    };
                    builder.push_record([
                        (idx + 1).to_string(),
                        truncate(&report.claim.text, CELL_CHARS),
                        web,
                        sources,
                        documents,
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format extracted (and possibly probed) links.
    pub fn format_links(&self, links: &[Link], summary: Option<&ValidationSummary>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = links.iter().map(link_json).collect();
                let value = match summary {
                    Some(s) => json!({
                        "links": items,
                        "summary": {
                            "total": s.total,
                            "working": s.working,
                            "broken": s.broken,
                            "restricted": s.restricted,
                            "error": s.error,
                        }
                    }),
                    None => json!({ "links": items }),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(links
                .iter()
                .map(|l| l.url.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if links.is_empty() {
                    return Ok(self.colorize("No links found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "URL", "Anchor", "Status", "Probe", "HTTP", "Note"]);
                for link in links {
                    builder.push_record([
                        link.id.clone(),
                        link.url.clone(),
                        truncate(&link.anchor_text, 40),
                        link.status.as_str().to_string(),
                        link.validation_status.as_str().to_string(),
                        link.http_status.map(|s| s.to_string()).unwrap_or_default(),
                        link.validation_error.clone().unwrap_or_default(),
                    ]);
                }

                let mut out = render(builder);
                if let Some(summary) = summary {
                    out.push('\n');
                    out.push_str(&self.info(&summary.summary()));
                }
                Ok(out)
            }
        }
    }

    /// Format a processed mission.
    pub fn format_mission(
        &self,
        summary: &MissionSummary,
        chapter_names: &[String],
        report: &BatchReport,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&mission_json(summary, chapter_names))?),
            OutputFormat::Quiet => Ok(summary.mission_id.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Chapter", "Links", "Valid", "Invalid", "Suspicious", "Unverified", "Findings"]);
                for (name, chapter) in chapter_names.iter().zip(&summary.chapter_summaries) {
                    builder.push_record([
                        name.clone(),
                        chapter.total_links.to_string(),
                        chapter.valid_links.to_string(),
                        chapter.invalid_links.to_string(),
                        chapter.suspicious_links.to_string(),
                        chapter.unverified_links.to_string(),
                        chapter.key_findings.join("; "),
                    ]);
                }

                let mut lines = vec![
                    format!(
                        "Mission {} ({}): {}/{} chapters completed, {} links",
                        summary.mission_name,
                        summary.mission_id,
                        summary.completed_chapters,
                        summary.total_chapters,
                        summary.total_links
                    ),
                    render(builder),
                    self.info(&report.summary()),
                ];
                for failure in &report.failed {
                    lines.push(self.error(&format!("{}: {}", failure.chapter_id, failure.message)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn status_label(&self, status: GroundedStatus) -> String {
        let color = match status {
            GroundedStatus::VerifiedTrue => "green",
            GroundedStatus::VerifiedFalse => "red",
            GroundedStatus::PartiallyTrue | GroundedStatus::NeedsContext => "yellow",
            GroundedStatus::CannotFindAnswer => "magenta",
        };
        self.colorize(status.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Shorten `text` to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn claim_json(claim: &Claim) -> Value {
    json!({
        "id": claim.id.to_string(),
        "text": claim.text,
        "category": claim.category.as_str(),
        "confidence": claim.confidence.value(),
        "importance": claim.importance.value(),
        "range": { "start": claim.range.start, "end": claim.range.end },
        "status": claim.status.as_str(),
        "verificationState": claim.verification_state.as_str(),
    })
}

fn grounded_json(verdict: &GroundedVerdict) -> Value {
    json!({
        "status": verdict.status.as_str(),
        "reasoning": verdict.reasoning,
        "sources": verdict.sources,
        "confidence": verdict.confidence.value(),
        "searchPrompt": verdict.search_prompt,
        "searchQuery": verdict.search_query,
        "provenance": verdict.provenance.as_str(),
    })
}

fn document_json(verdict: &DocumentVerdict) -> Value {
    json!({
        "status": verdict.status.as_str(),
        "reasoning": verdict.reasoning,
        "citations": verdict.citations.iter().map(|c| json!({
            "fileName": c.file_name,
            "location": c.location,
            "content": c.content,
        })).collect::<Vec<_>>(),
        "confidence": verdict.confidence.value(),
    })
}

fn link_json(link: &Link) -> Value {
    json!({
        "id": link.id,
        "url": link.url,
        "anchorText": link.anchor_text,
        "status": link.status.as_str(),
        "validationStatus": link.validation_status.as_str(),
        "httpStatus": link.http_status,
        "validationError": link.validation_error,
        "retriesUsed": link.retries_used,
    })
}

fn mission_json(summary: &MissionSummary, chapter_names: &[String]) -> Value {
    json!({
        "missionId": summary.mission_id.to_string(),
        "missionName": summary.mission_name,
        "totalChapters": summary.total_chapters,
        "completedChapters": summary.completed_chapters,
        "totalLinks": summary.total_links,
        "linksByStatus": {
            "valid": summary.links_by_status.valid,
            "invalid": summary.links_by_status.invalid,
            "suspicious": summary.links_by_status.suspicious,
            "unverified": summary.links_by_status.unverified,
        },
        "chapterSummaries": summary.chapter_summaries.iter().zip(chapter_names).map(|(s, name)| json!({
            "chapterName": name,
            "totalLinks": s.total_links,
            "validLinks": s.valid_links,
            "invalidLinks": s.invalid_links,
            "suspiciousLinks": s.suspicious_links,
            "unverifiedLinks": s.unverified_links,
            "keyFindings": s.key_findings,
        })).collect::<Vec<_>>(),
        "exportDate": summary.export_date,
    })
}
