// Best single-game performance trackers.
//
// Two independent running maxima over the per-player, per-game lines:
// one for hitting, one for pitching. Replacement requires a strictly
// greater score, so the first performance encountered keeps a tie.

use serde::{Deserialize, Serialize};

use crate::mlb::types::BoxScore;
use crate::schedule::GameRecord;

use super::accumulate::innings_to_outs;

/// Weighted single-game hitting score: `H + 3*HR + 2*RBI + R`.
pub fn hitting_score(hits: u32, home_runs: u32, rbi: u32, runs: u32) -> i64 {
    hits as i64 + 3 * home_runs as i64 + 2 * rbi as i64 + runs as i64
}

/// Weighted single-game pitching score: `2*outs + 3*K - 3*ER`.
/// Negative for a short, battered outing.
pub fn pitching_score(outs: u32, strikeouts: u32, earned_runs: u32) -> i64 {
    2 * outs as i64 + 3 * strikeouts as i64 - 3 * earned_runs as i64
}

/// Best hitting game seen so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestHitting {
    pub player: String,
    pub score: i64,
    pub game: GameRecord,
    pub hits: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub runs: u32,
}

/// Best pitching game seen so far. `innings_pitched` keeps the feed's
/// "N.t" form for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPitching {
    pub player: String,
    pub score: i64,
    pub game: GameRecord,
    pub strikeouts: u32,
    pub innings_pitched: String,
    pub earned_runs: u32,
}

/// Scans box scores and keeps the single best hitting and pitching games.
#[derive(Debug, Clone, Default)]
pub struct HighlightTracker {
    pub best_hitting: Option<BestHitting>,
    pub best_pitching: Option<BestPitching>,
}

impl HighlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one game's box score. Shares the same fetched box score the
    /// accumulator folds; never triggers its own fetch.
    pub fn observe(&mut self, game: &GameRecord, box_score: &BoxScore) {
        for entry in box_score.all_players() {
            let name = &entry.person.full_name;

            // Hitting: only players who actually batted this game.
            if let Some(b) = &entry.stats.batting {
                if b.at_bats > 0 {
                    let score = hitting_score(b.hits, b.home_runs, b.rbi, b.runs);
                    let beats = self
                        .best_hitting
                        .as_ref()
                        .map_or(true, |best| score > best.score);
                    if beats {
                        self.best_hitting = Some(BestHitting {
                            player: name.clone(),
                            score,
                            game: game.clone(),
                            hits: b.hits,
                            home_runs: b.home_runs,
                            rbi: b.rbi,
                            runs: b.runs,
                        });
                    }
                }
            }

            // Pitching: only players with a recorded innings value.
            if let Some(p) = &entry.stats.pitching {
                if let Some(ip) = p.innings_pitched.as_deref() {
                    let outs = innings_to_outs(ip);
                    let score = pitching_score(outs, p.strike_outs, p.earned_runs);
                    let beats = self
                        .best_pitching
                        .as_ref()
                        .map_or(true, |best| score > best.score);
                    if beats {
                        self.best_pitching = Some(BestPitching {
                            player: name.clone(),
                            score,
                            game: game.clone(),
                            strikeouts: p.strike_outs,
                            innings_pitched: ip.to_string(),
                            earned_runs: p.earned_runs,
                        });
                    }
                }
            }
        }
    }
}
