//! SenseCheck Link Validation
//!
//! Extracts hyperlinks from free text and checks whether they are alive.
//!
//! # Overview
//!
//! - [`extract_links`]: markdown links first, then bare URLs, deduplicated
//!   after trailing punctuation is stripped with [`clean_url`]
//! - [`LinkValidator`]: probes links in fixed-size concurrent batches,
//!   retrying 404, 5xx and transient network failures with linear backoff
//! - [`Probe`]: the network seam; [`HttpProbe`] issues HEAD requests
//!
//! # Classification
//!
//! | observed | validation status |
//! |---|---|
//! | 2xx | working |
//! | 401 / 403 / 429 | restricted, never retried |
//! | 404, 5xx | broken once retries are spent |
//! | other status | broken |
//! | network failure | error once retries are spent |
//!
//! # Example Usage
//!
//! ```no_run
//! use sensecheck_links::{extract_links, LinkConfig, LinkValidator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let links = extract_links("See [report](https://example.com/report.pdf).");
//! let validator = LinkValidator::http(LinkConfig::default())?;
//! let report = validator.validate_all(links).await?;
//! println!("{}", report.summary.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extract;
mod probe;
mod validator;

pub use config::LinkConfig;
pub use error::LinkError;
pub use extract::{clean_url, extract_links, extract_links_with_prefix};
pub use probe::{HttpProbe, NetworkErrorKind, Probe, ProbeResult};
pub use validator::{LinkValidator, ValidationReport, ValidationSummary};
