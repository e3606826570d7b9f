// reqwest client for statsapi.mlb.com plus the season feed download.
//
// Each request carries the configured timeout so one hung call bounds itself
// instead of stalling the whole run; the caller treats a timed-out game as
// unresolved/unfetched, not as a fatal error.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::types::{BoxScore, LiveFeed, ScheduleResponse, ScheduledGame};
use super::{SourceError, StatsSource};

const STATSAPI_BASE: &str = "https://statsapi.mlb.com/api";

/// Total unavailability of the season feed. The only error that aborts a run
/// before any computation.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("season feed request failed: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("season feed at {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("season feed is empty")]
    Empty,
}

/// HTTP client for the schedule-by-date and live box-score endpoints.
pub struct MlbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MlbClient {
    /// Build a client with a per-request timeout.
    ///
    /// Panics only if the TLS backend cannot initialize, which is
    /// unrecoverable at startup anyway.
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: STATSAPI_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Download the raw season feed CSV.
    pub async fn fetch_season_feed(&self, url: &str) -> Result<String, FeedError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Err(FeedError::Empty);
        }
        Ok(text)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        resp.json::<T>().await.map_err(|e| SourceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StatsSource for MlbClient {
    async fn schedule_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduledGame>, SourceError> {
        let url = format!(
            "{}/v1/schedule?sportId=1&date={}",
            self.base_url,
            date.format("%Y-%m-%d")
        );
        debug!(%url, "fetching schedule");
        let resp: ScheduleResponse = self.get_json(&url).await?;
        Ok(resp.dates.into_iter().flat_map(|d| d.games).collect())
    }

    async fn box_score(&self, game_pk: u64) -> Result<BoxScore, SourceError> {
        let url = format!("{}/v1.1/game/{game_pk}/feed/live", self.base_url);
        debug!(game_pk, "fetching box score");
        let feed: LiveFeed = self.get_json(&url).await?;
        Ok(feed.live_data.boxscore)
    }
}
