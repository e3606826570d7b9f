// The rendered output contract: everything a frontend needs to draw the
// season page, as one serializable payload. The JSON form of this struct is
// exactly what the cache stores, so a cache hit round-trips through the same
// types as a fresh computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::resolve::UnmatchedGame;
use crate::schedule::TeamRecord;
use crate::stats::categories::Mode;
use crate::stats::highlights::{BestHitting, BestPitching};
use crate::stats::leaderboard::CategoryLeaderboard;

/// How much of the season actually made it into the numbers. Partial
/// coverage is steady state, not an error, but the consumer gets to see it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coverage {
    /// Season feed rows loaded.
    pub season_rows: usize,
    /// Games whose box score was fetched and folded.
    pub included_games: u32,
    /// Rows with no matching external game.
    pub unmatched: Vec<UnmatchedGame>,
    /// Schedule lookups that failed outright.
    pub lookup_failures: u32,
    /// Resolved games whose box-score fetch failed.
    pub unavailable_box_scores: u32,
}

/// The full computed season view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub mode: Mode,
    pub team: String,
    pub record: TeamRecord,
    pub stadiums: Vec<(String, u32)>,
    pub leaderboards: Vec<CategoryLeaderboard>,
    pub best_hitting: Option<BestHitting>,
    pub best_pitching: Option<BestPitching>,
    pub coverage: Coverage,
}

/// Shorten long names for narrow columns: "Giancarlo Stanton" stays,
/// anything over 18 characters collapses to "F. Lastname".
pub fn format_player_name(name: &str) -> String {
    const MAX_LENGTH: usize = 18;
    if name.chars().count() <= MAX_LENGTH {
        return name.to_string();
    }
    let mut parts = name.split_whitespace();
    let Some(first) = parts.next() else {
        return name.to_string();
    };
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return name.to_string();
    }
    let initial = first.chars().next().unwrap_or_default();
    format!("{}. {}", initial, rest.join(" "))
}

/// Plain-text rendering for the CLI.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Season scorecard ({} mode)", report.mode);
    let _ = writeln!(
        out,
        "{}: regular {}-{}, postseason {}-{}",
        report.team,
        report.record.regular_wins,
        report.record.regular_losses,
        report.record.postseason_wins,
        report.record.postseason_losses
    );
    let _ = writeln!(
        out,
        "Coverage: {} of {} games included ({} unmatched, {} lookup failures, {} box scores unavailable)",
        report.coverage.included_games,
        report.coverage.season_rows,
        report.coverage.unmatched.len(),
        report.coverage.lookup_failures,
        report.coverage.unavailable_box_scores
    );

    for board in &report.leaderboards {
        let _ = writeln!(out, "\nTop 10 {}", board.label);
        for (i, entry) in board.entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<20} {}",
                i + 1,
                format_player_name(&entry.player),
                entry.display
            );
        }
    }

    if let Some(best) = &report.best_hitting {
        let _ = writeln!(out, "\nBest hitting game: {}", format_player_name(&best.player));
        let _ = writeln!(
            out,
            "     {} H, {} HR, {} RBI, {} R ({} at {})",
            best.hits,
            best.home_runs,
            best.rbi,
            best.runs,
            best.game.away,
            best.game.home
        );
    }
    if let Some(best) = &report.best_pitching {
        let _ = writeln!(out, "\nBest pitching game: {}", format_player_name(&best.player));
        let _ = writeln!(
            out,
            "     {} IP, {} K, {} ER ({} at {})",
            best.innings_pitched,
            best.strikeouts,
            best.earned_runs,
            best.game.away,
            best.game.home
        );
    }

    let _ = writeln!(out, "\nStadiums visited");
    for (stadium, count) in &report.stadiums {
        let _ = writeln!(out, "  {stadium}: {count}");
    }

    out
}
