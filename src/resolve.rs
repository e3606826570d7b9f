// Game resolution: matching season-feed rows to statsapi gamePk identifiers.
//
// Each unresolved record triggers one schedule-by-date lookup. Lookups have
// no data dependency on each other, so they fan out concurrently (bounded)
// and fan back in before any record is mutated; a failed or unmatched
// lookup never aborts its siblings. `game_pk` is set at most once and never
// overwritten.

use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::mlb::types::ScheduledGame;
use crate::mlb::{teams, SourceError, StatsSource};
use crate::schedule::GameRecord;

/// A feed row the external schedule could not account for. Diagnostic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedGame {
    pub date: Option<NaiveDate>,
    pub away: String,
    pub home: String,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Records that gained a gamePk this pass.
    pub resolved: u32,
    /// Records that already had a gamePk and were skipped.
    pub already_resolved: u32,
    /// Rows with no matching game on their date (includes rows with an
    /// unparseable date, which cannot be looked up at all).
    pub unmatched: Vec<UnmatchedGame>,
    /// Schedule lookups that failed at the transport/decode level.
    pub lookup_failures: u32,
}

fn names_match(candidate: &ScheduledGame, home_full: &str, away_full: &str) -> bool {
    let eq = |a: &str, b: &str| a.trim().eq_ignore_ascii_case(b.trim());
    eq(&candidate.teams.home.team.name, home_full)
        && eq(&candidate.teams.away.team.name, away_full)
}

/// Resolve every record still missing a `game_pk`.
///
/// `concurrency` bounds the number of schedule lookups in flight.
pub async fn resolve_games<S: StatsSource>(
    games: &mut [GameRecord],
    source: &S,
    concurrency: usize,
) -> ResolutionSummary {
    let mut summary = ResolutionSummary::default();

    // Snapshot the lookups before any await so the fan-out borrows nothing
    // mutable. Records are written only after all lookups complete.
    let mut pending: Vec<(usize, NaiveDate, String, String)> = Vec::new();
    for (idx, game) in games.iter().enumerate() {
        if game.game_pk.is_some() {
            summary.already_resolved += 1;
            continue;
        }
        match game.date {
            Some(date) => pending.push((
                idx,
                date,
                teams::full_name(&game.home).to_string(),
                teams::full_name(&game.away).to_string(),
            )),
            None => {
                // No date means no lookup key; record it as unmatched.
                summary.unmatched.push(UnmatchedGame {
                    date: None,
                    away: game.away.clone(),
                    home: game.home.clone(),
                });
            }
        }
    }

    let lookups: Vec<(usize, Result<Vec<ScheduledGame>, SourceError>, String, String)> =
        stream::iter(pending)
            .map(|(idx, date, home_full, away_full)| async move {
                let result = source.schedule_for_date(date).await;
                (idx, result, home_full, away_full)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    for (idx, result, home_full, away_full) in lookups {
        let game = &mut games[idx];
        match result {
            Ok(scheduled) => {
                match scheduled
                    .iter()
                    .find(|c| names_match(c, &home_full, &away_full))
                {
                    Some(found) => {
                        debug!(
                            game_pk = found.game_pk,
                            home = %game.home,
                            away = %game.away,
                            "resolved game"
                        );
                        game.game_pk = Some(found.game_pk);
                        summary.resolved += 1;
                    }
                    None => {
                        summary.unmatched.push(UnmatchedGame {
                            date: game.date,
                            away: game.away.clone(),
                            home: game.home.clone(),
                        });
                    }
                }
            }
            Err(e) => {
                warn!(
                    date = ?game.date,
                    home = %game.home,
                    away = %game.away,
                    "schedule lookup failed: {e}"
                );
                summary.lookup_failures += 1;
            }
        }
    }

    info!(
        resolved = summary.resolved,
        already_resolved = summary.already_resolved,
        unmatched = summary.unmatched.len(),
        failures = summary.lookup_failures,
        "resolution pass complete"
    );
    summary
}
