//! Retrying, batched link validation

use crate::probe::{HttpProbe, Probe, ProbeResult};
use crate::{LinkConfig, LinkError};
use futures::future::join_all;
use sensecheck_domain::{Link, ValidationOutcome, ValidationStatus};
use std::time::Instant;
use tracing::{debug, info};

/// Counts of links by probe result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationSummary {
    /// Links in the batch
    pub total: usize,
    /// 2xx
    pub working: usize,
    /// 404, 5xx, other statuses
    pub broken: usize,
    /// 401, 403, 429
    pub restricted: usize,
    /// Transport failures
    pub error: usize,
}

impl ValidationSummary {
    /// Count validation statuses across `links`
    pub fn from_links(links: &[Link]) -> Self {
        let count = |status: ValidationStatus| {
            links
                .iter()
                .filter(|l| l.validation_status == status)
                .count()
        };
        Self {
            total: links.len(),
            working: count(ValidationStatus::Working),
            broken: count(ValidationStatus::Broken),
            restricted: count(ValidationStatus::Restricted),
            error: count(ValidationStatus::Error),
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} links: {} working, {} broken, {} restricted, {} errors",
            self.total, self.working, self.broken, self.restricted, self.error
        )
    }
}

/// Result of validating a batch
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The input links, in input order, with their outcomes applied
    pub links: Vec<Link>,
    /// Counts by probe result
    pub summary: ValidationSummary,
    /// Wall-clock time for the batch
    pub processing_time_ms: u64,
}

/// Validates links by probing them with retry and bounded concurrency
pub struct LinkValidator<P: Probe = HttpProbe> {
    probe: P,
    config: LinkConfig,
}

impl LinkValidator<HttpProbe> {
    /// Create a validator backed by real HTTP HEAD requests
    pub fn http(config: LinkConfig) -> Result<Self, LinkError> {
        config.validate().map_err(LinkError::Config)?;
        let probe = HttpProbe::new(&config)?;
        Ok(Self { probe, config })
    }
}

impl<P: Probe> LinkValidator<P> {
    /// Create a validator with a custom probe
    pub fn new(probe: P, config: LinkConfig) -> Self {
        Self { probe, config }
    }

    /// The active configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Probe one URL, retrying 404/5xx and retryable network errors
    ///
    /// Every retry draws on the per-link `max_retries` budget; HTTP-level and
    /// network-level retries are further capped by their own budgets. The
    /// wait before retry `n` is `n` backoff units.
    pub async fn validate_link(&self, url: &str) -> ValidationOutcome {
        let mut retries = 0u32;
        let mut http_retries = 0u32;
        let mut network_retries = 0u32;

        loop {
            debug!("Validating {} (attempt {})", url, retries + 1);

            let finished = match self.probe.probe(url).await {
                ProbeResult::Status(status) => match status {
                    200..=299 => Some(outcome(ValidationStatus::Working, Some(status), None, retries)),
                    401 => Some(restricted(status, "Authentication required (401)", retries)),
                    403 => Some(restricted(status, "Access forbidden (403)", retries)),
                    429 => Some(restricted(status, "Rate limited (429)", retries)),
                    404 | 500..=599 => {
                        if retries < self.config.max_retries
                            && http_retries < self.config.max_http_retries
                        {
                            http_retries += 1;
                            debug!("Got {} from {}, retrying", status, url);
                            None
                        } else {
                            Some(outcome(
                                ValidationStatus::Broken,
                                Some(status),
                                Some(format!("HTTP {} after {} attempts", status, retries + 1)),
                                retries,
                            ))
                        }
                    }
                    _ => Some(outcome(
                        ValidationStatus::Broken,
                        Some(status),
                        Some(format!("HTTP {}", status)),
                        retries,
                    )),
                },
                ProbeResult::Network { kind, message } => {
                    if kind.is_retryable()
                        && retries < self.config.max_retries
                        && network_retries < self.config.max_network_retries
                    {
                        network_retries += 1;
                        debug!("Network error ({}) for {}, retrying", message, url);
                        None
                    } else {
                        Some(outcome(
                            ValidationStatus::Error,
                            None,
                            Some(format!("Network error: {}", message)),
                            retries,
                        ))
                    }
                }
            };

            if let Some(finished) = finished {
                return finished;
            }

            retries += 1;
            tokio::time::sleep(self.config.retry_backoff(retries)).await;
        }
    }

    /// Validate a batch with the configured concurrency
    pub async fn validate_all(&self, links: Vec<Link>) -> Result<ValidationReport, LinkError> {
        self.validate_all_with(links, self.config.max_concurrency).await
    }

    /// Validate a batch, probing `max_concurrency` links at a time
    ///
    /// Links are returned in input order with their outcomes applied.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the batch exceeds the configured maximum or
    /// `max_concurrency` is zero.
    pub async fn validate_all_with(
        &self,
        links: Vec<Link>,
        max_concurrency: usize,
    ) -> Result<ValidationReport, LinkError> {
        if max_concurrency == 0 {
            return Err(LinkError::InvalidInput(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if links.len() > self.config.max_links {
            return Err(LinkError::InvalidInput(format!(
                "Too many links: maximum {} links allowed per request",
                self.config.max_links
            )));
        }

        let start = Instant::now();
        let total_batches = links.len().div_ceil(max_concurrency);
        info!(
            "Starting validation of {} links with concurrency {}",
            links.len(),
            max_concurrency
        );

        let mut validated = Vec::with_capacity(links.len());
        for (idx, batch) in links.chunks(max_concurrency).enumerate() {
            debug!("Processing batch {}/{}", idx + 1, total_batches);

            let outcomes = join_all(batch.iter().map(|link| self.validate_link(&link.url))).await;
            for (link, outcome) in batch.iter().zip(outcomes) {
                let mut link = link.clone();
                link.apply_validation(outcome);
                validated.push(link);
            }

            if idx + 1 < total_batches {
                tokio::time::sleep(self.config.batch_delay()).await;
            }
        }

        let summary = ValidationSummary::from_links(&validated);
        info!("Link validation complete: {}", summary.summary());

        Ok(ValidationReport {
            links: validated,
            summary,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn outcome(
    status: ValidationStatus,
    http_status: Option<u16>,
    error: Option<String>,
    retries_used: u32,
) -> ValidationOutcome {
    ValidationOutcome {
        status,
        http_status,
        error,
        retries_used,
    }
}

fn restricted(status: u16, message: &str, retries_used: u32) -> ValidationOutcome {
    outcome(
        ValidationStatus::Restricted,
        Some(status),
        Some(message.to_string()),
        retries_used,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut working = Link::new("link-1", "https://a.com", "a");
        working.validation_status = ValidationStatus::Working;
        let mut broken = Link::new("link-2", "https://b.com", "b");
        broken.validation_status = ValidationStatus::Broken;
        let pending = Link::new("link-3", "https://c.com", "c");

        let summary = ValidationSummary::from_links(&[working, broken, pending]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.working, 1);
        assert_eq!(summary.broken, 1);
        assert_eq!(summary.error, 0);
        assert_eq!(
            summary.summary(),
            "3 links: 1 working, 1 broken, 0 restricted, 0 errors"
        );
    }
}
