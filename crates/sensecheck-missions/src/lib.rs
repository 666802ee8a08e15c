//! SenseCheck Missions
//!
//! Batches of JSON "chapters" grouped into missions, with link extraction per
//! chapter and link-status rollups per chapter and per mission.
//!
//! # Overview
//!
//! - [`MissionAggregator`] drives chapter processing on top of any
//!   [`MissionStore`](sensecheck_domain::traits::MissionStore)
//! - [`InMemoryMissionStore`] is the volatile, single-process store
//!
//! Chapters are processed one at a time. A chapter that fails keeps its
//! previous links and an error message, and can be retried on its own.
//!
//! # Usage
//!
//! ```
//! use sensecheck_missions::{InMemoryMissionStore, MissionAggregator, MissionsConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let aggregator = MissionAggregator::new(InMemoryMissionStore::new(), MissionsConfig::default());
//! let mission = aggregator.create_mission("Series A diligence", "")?;
//! let chapter = aggregator.add_chapter(
//!     mission,
//!     "Market",
//!     r#"{"text": "Sized in [the report](https://example.com/tam.pdf)."}"#,
//! )?;
//!
//! let summary = aggregator.process_chapter(mission, chapter)?;
//! assert_eq!(summary.total_links, 1);
//! assert_eq!(summary.unverified_links, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod store;

pub use aggregator::{extract_chapter_links, BatchReport, ChapterFailure, MissionAggregator};
pub use config::MissionsConfig;
pub use error::{MissionError, Result};
pub use store::InMemoryMissionStore;
