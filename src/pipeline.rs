// The season pipeline: resolve → fetch → fold → derive, carried by an
// explicit context instead of process-wide state, plus the cached wrapper
// that fronts the whole thing with a TTL.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, Clock, TtlPolicy};
use crate::mlb::client::FeedError;
use crate::mlb::{SourceError, StatsSource};
use crate::report::{Coverage, Report};
use crate::resolve::{resolve_games, ResolutionSummary};
use crate::schedule::{self, GameRecord};
use crate::stats::accumulate::SeasonTotals;
use crate::stats::categories::Mode;
use crate::stats::highlights::HighlightTracker;
use crate::stats::leaderboard::{rank_mode, CategoryLeaderboard};

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Everything computed from one pass over the season's box scores.
///
/// Totals and highlights share a single fetch of each game's box score.
/// Deriving a leaderboard view from the totals is pure, so switching modes
/// needs no re-fetch: call `derive` again with a different mode.
pub struct SeasonAnalysis {
    pub totals: SeasonTotals,
    pub highlights: HighlightTracker,
    pub resolution: ResolutionSummary,
    pub included_games: u32,
    pub unavailable_box_scores: u32,
}

impl SeasonAnalysis {
    /// Rank the accumulated totals under a mode. Pure; no I/O.
    pub fn derive(&self, mode: Mode) -> Vec<CategoryLeaderboard> {
        rank_mode(&self.totals, mode)
    }
}

/// The resolve/fetch/fold stages bound to one stat source.
pub struct Pipeline<S: StatsSource> {
    source: S,
    concurrency: usize,
}

impl<S: StatsSource> Pipeline<S> {
    pub fn new(source: S, concurrency: usize) -> Self {
        Self {
            source,
            concurrency,
        }
    }

    /// Resolve unresolved games, fetch every resolved game's box score
    /// once, and fold the results into season totals and highlights.
    ///
    /// Fetches fan out concurrently; the fold itself runs in feed order
    /// (date descending) so highlight tie-breaking stays deterministic.
    /// A failed fetch skips that one game and counts it in the manifest.
    pub async fn analyze(&self, games: &mut [GameRecord]) -> SeasonAnalysis {
        let resolution = resolve_games(games, &self.source, self.concurrency).await;

        let resolved: Vec<(usize, u64)> = games
            .iter()
            .enumerate()
            .filter_map(|(idx, g)| g.game_pk.map(|pk| (idx, pk)))
            .collect();
        info!(games = resolved.len(), "fetching box scores");

        let source = &self.source;
        let mut fetched: Vec<(usize, u64, Result<crate::mlb::types::BoxScore, SourceError>)> =
            stream::iter(resolved)
                .map(|(idx, pk)| async move { (idx, pk, source.box_score(pk).await) })
                .buffer_unordered(self.concurrency.max(1))
                .collect()
                .await;
        fetched.sort_by_key(|(idx, _, _)| *idx);

        let mut totals = SeasonTotals::new();
        let mut highlights = HighlightTracker::new();
        let mut included_games = 0u32;
        let mut unavailable_box_scores = 0u32;

        for (idx, pk, result) in fetched {
            match result {
                Ok(box_score) => {
                    totals.absorb(&box_score);
                    highlights.observe(&games[idx], &box_score);
                    included_games += 1;
                }
                Err(e) => {
                    warn!(game_pk = pk, "box score unavailable: {e}");
                    unavailable_box_scores += 1;
                }
            }
        }

        info!(
            included = included_games,
            unavailable = unavailable_box_scores,
            players = totals.len(),
            "season fold complete"
        );
        SeasonAnalysis {
            totals,
            highlights,
            resolution,
            included_games,
            unavailable_box_scores,
        }
    }
}

/// Assemble the output payload from loaded games and a completed analysis.
pub fn build_report(
    games: &[GameRecord],
    analysis: &SeasonAnalysis,
    mode: Mode,
    team: &str,
    generated_at: chrono::DateTime<chrono::Utc>,
) -> Report {
    Report {
        generated_at,
        mode,
        team: team.to_string(),
        record: schedule::team_record(games, team),
        stadiums: schedule::stadium_visits(games),
        leaderboards: analysis.derive(mode),
        best_hitting: analysis.highlights.best_hitting.clone(),
        best_pitching: analysis.highlights.best_pitching.clone(),
        coverage: Coverage {
            season_rows: games.len(),
            included_games: analysis.included_games,
            unmatched: analysis.resolution.unmatched.clone(),
            lookup_failures: analysis.resolution.lookup_failures,
            unavailable_box_scores: analysis.unavailable_box_scores,
        },
    }
}

// ---------------------------------------------------------------------------
// Cached wrapper
// ---------------------------------------------------------------------------

/// Fronts the full pipeline with the TTL cache. Within the TTL a request is
/// served from the stored payload without touching any external source —
/// not even the season feed.
pub struct CachedPipeline<S: StatsSource> {
    pipeline: Pipeline<S>,
    store: CacheStore,
    policy: TtlPolicy,
    clock: Arc<dyn Clock>,
    // Admission control: at most one recompute in flight.
    gate: tokio::sync::Mutex<()>,
}

impl<S: StatsSource> CachedPipeline<S> {
    pub fn new(
        pipeline: Pipeline<S>,
        store: CacheStore,
        policy: TtlPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pipeline,
            store,
            policy,
            clock,
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Cache slot for a mode. Mode-specific so switching modes never serves
    /// another mode's rendered payload.
    pub fn cache_slot(mode: Mode) -> String {
        format!("leaderboards:{mode}")
    }

    fn read_cached(&self, slot: &str) -> anyhow::Result<Option<Report>> {
        match self
            .store
            .read_fresh(slot, &self.policy, self.clock.as_ref())?
        {
            Some(entry) => {
                let report = serde_json::from_str(&entry.payload)
                    .context("corrupt cached leaderboard payload")?;
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    /// Serve the season report for `mode`, recomputing only on cache miss
    /// or expiry. `load_feed` is invoked at most once, and only when a
    /// recompute actually runs.
    pub async fn run<F, Fut>(&self, mode: Mode, team: &str, load_feed: F) -> anyhow::Result<Report>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, FeedError>>,
    {
        let slot = Self::cache_slot(mode);

        if let Some(report) = self.read_cached(&slot)? {
            debug!(%slot, "cache hit");
            return Ok(report);
        }

        let _permit = self.gate.lock().await;
        // A recompute may have landed while we waited on the gate.
        if let Some(report) = self.read_cached(&slot)? {
            debug!(%slot, "cache filled while waiting");
            return Ok(report);
        }

        info!(%slot, "cache miss, recomputing season");
        let feed_text = load_feed().await.context("season feed unavailable")?;
        let mut games = schedule::load_season(&feed_text);
        info!(rows = games.len(), "season feed loaded");

        let analysis = self.pipeline.analyze(&mut games).await;
        let report = build_report(&games, &analysis, mode, team, self.clock.now());

        let payload =
            serde_json::to_string(&report).context("failed to serialize report payload")?;
        self.store.write(&slot, &payload, report.generated_at)?;
        Ok(report)
    }
}
