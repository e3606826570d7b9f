// External-source layer: statsapi.mlb.com models and the HTTP client behind
// the `StatsSource` seam.

pub mod client;
pub mod teams;
pub mod types;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use types::{BoxScore, ScheduledGame};

/// Per-request failure against an external stat source. Never fatal to the
/// pipeline; the affected game is skipped and counted in the coverage
/// manifest.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// The two lookups the pipeline needs from the live-stats API.
///
/// Behind a trait so the whole pipeline runs against an in-memory stub in
/// tests.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// All games scheduled on `date`, or an empty list for an off day.
    async fn schedule_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduledGame>, SourceError>;

    /// Full per-player box score for one game.
    async fn box_score(&self, game_pk: u64) -> Result<BoxScore, SourceError>;
}
