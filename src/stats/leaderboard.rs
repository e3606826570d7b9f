// Derived-stat ranking: qualification, ordering, top-10 truncation.

use serde::{Deserialize, Serialize};

use super::accumulate::{PlayerSeasonStats, SeasonTotals};
use super::categories::{Category, Mode, StatKind};

/// How many players each category keeps after qualification and sorting.
pub const TOP_N: usize = 10;

/// One ranked row: the player, the raw sortable value, and the formatted
/// display value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub value: f64,
    pub display: String,
}

/// A fully ranked category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLeaderboard {
    pub category: Category,
    pub label: String,
    pub kind: StatKind,
    pub entries: Vec<LeaderboardEntry>,
}

/// True when the player meets this category's minimum-sample qualifiers.
/// Qualification is category-local; it never bleeds into other categories.
fn qualifies(category: Category, stats: &PlayerSeasonStats) -> bool {
    if let Some(min_ab) = category.min_at_bats() {
        if stats.at_bats < min_ab {
            return false;
        }
    }
    if let Some(min_innings) = category.min_innings() {
        if stats.outs_pitched < min_innings * 3 {
            return false;
        }
    }
    true
}

/// Rank one category: qualify, sort descending by value, truncate.
///
/// Candidates arrive sorted by name, and the sort is stable, so equal values
/// tie-break alphabetically. Deterministic across runs regardless of map
/// iteration order.
pub fn rank_category(
    category: Category,
    candidates: &[(&String, &PlayerSeasonStats)],
) -> CategoryLeaderboard {
    let mut ranked: Vec<(&String, &PlayerSeasonStats, f64)> = candidates
        .iter()
        .filter(|&&(_, stats)| qualifies(category, stats))
        .map(|&(name, stats)| (name, stats, category.value(stats)))
        .collect();

    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(TOP_N);

    CategoryLeaderboard {
        category,
        label: category.label().to_string(),
        kind: category.kind(),
        entries: ranked
            .into_iter()
            .map(|(name, stats, value)| LeaderboardEntry {
                player: name.clone(),
                value,
                display: category.display(stats),
            })
            .collect(),
    }
}

/// Build the full leaderboard set for a mode: eight categories, hitting
/// first. Pure with respect to the totals, so switching modes needs no
/// re-fetch of anything.
pub fn rank_mode(totals: &SeasonTotals, mode: Mode) -> Vec<CategoryLeaderboard> {
    let candidates = totals.sorted_by_name();
    mode.categories()
        .into_iter()
        .map(|category| rank_category(category, &candidates))
        .collect()
}
