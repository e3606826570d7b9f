// Leaderboard categories and modes.
//
// A mode is a closed, statically validated set of exactly four hitting and
// four pitching categories. Each category tag maps to one pure evaluation
// function over `PlayerSeasonStats`, so every formula is unit-testable in
// isolation and adding a category cannot silently miss a dispatch arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::accumulate::{outs_to_innings, PlayerSeasonStats};

/// Minimum at-bats before a batting rate stat ranks a player.
pub const MIN_RATE_AT_BATS: u32 = 10;
/// Minimum innings pitched before a pitching rate stat ranks a player.
pub const MIN_RATE_INNINGS: u32 = 5;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// How a category's value is produced and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Raw cumulative counter passed through unchanged.
    Count,
    /// Derived ratio, subject to a minimum-sample qualifier.
    Rate,
    /// Counter with a compound display ("BF (pitches)").
    Special,
}

/// Every rankable statistic. Tags, not strings: the compiler checks that
/// each mode's list and each evaluation arm stays in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Hitting
    BattingAverage,
    Hits,
    HomeRuns,
    RunsBattedIn,
    OnBasePercentage,
    Slugging,
    Ops,
    ExtraBaseHits,
    TotalBases,
    StolenBases,
    Walks,
    HitByPitch,
    // Pitching
    Wins,
    Saves,
    Strikeouts,
    EarnedRunAverage,
    Whip,
    StrikeoutWalkRatio,
    InningsPitched,
    BattersFaced,
    HitBatsmen,
    WildPitches,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::BattingAverage => "Batting Average",
            Category::Hits => "Hits",
            Category::HomeRuns => "Home Runs",
            Category::RunsBattedIn => "RBI",
            Category::OnBasePercentage => "On-Base %",
            Category::Slugging => "Slugging",
            Category::Ops => "OPS",
            Category::ExtraBaseHits => "Extra-Base Hits",
            Category::TotalBases => "Total Bases",
            Category::StolenBases => "Stolen Bases",
            Category::Walks => "Walks",
            Category::HitByPitch => "Hit By Pitch",
            Category::Wins => "Wins",
            Category::Saves => "Saves",
            Category::Strikeouts => "Strikeouts (Pitching)",
            Category::EarnedRunAverage => "ERA",
            Category::Whip => "WHIP",
            Category::StrikeoutWalkRatio => "K/BB",
            Category::InningsPitched => "Innings Pitched",
            Category::BattersFaced => "Batters Faced",
            Category::HitBatsmen => "Hit Batsmen",
            Category::WildPitches => "Wild Pitches",
        }
    }

    pub fn kind(&self) -> StatKind {
        match self {
            Category::BattingAverage
            | Category::OnBasePercentage
            | Category::Slugging
            | Category::Ops
            | Category::EarnedRunAverage
            | Category::Whip
            | Category::StrikeoutWalkRatio => StatKind::Rate,
            Category::BattersFaced => StatKind::Special,
            _ => StatKind::Count,
        }
    }

    /// Minimum at-bats a player needs to rank in this category, if any.
    /// Category-local: falling short here never affects other categories.
    pub fn min_at_bats(&self) -> Option<u32> {
        match self {
            Category::BattingAverage
            | Category::OnBasePercentage
            | Category::Slugging
            | Category::Ops => Some(MIN_RATE_AT_BATS),
            _ => None,
        }
    }

    /// Minimum innings pitched to rank, if any. Compared in outs:
    /// `outs_pitched >= min * 3`.
    pub fn min_innings(&self) -> Option<u32> {
        match self {
            Category::EarnedRunAverage
            | Category::Whip
            | Category::StrikeoutWalkRatio => Some(MIN_RATE_INNINGS),
            _ => None,
        }
    }

    /// Evaluate this category for one player. Pure; ranking sorts on this.
    pub fn value(&self, s: &PlayerSeasonStats) -> f64 {
        match self {
            Category::BattingAverage => batting_average(s),
            Category::Hits => s.hits as f64,
            Category::HomeRuns => s.home_runs as f64,
            Category::RunsBattedIn => s.rbi as f64,
            Category::OnBasePercentage => on_base_percentage(s),
            Category::Slugging => slugging(s),
            Category::Ops => on_base_percentage(s) + slugging(s),
            Category::ExtraBaseHits => (s.doubles + s.triples + s.home_runs) as f64,
            Category::TotalBases => total_bases(s) as f64,
            Category::StolenBases => s.stolen_bases as f64,
            Category::Walks => s.walks as f64,
            Category::HitByPitch => s.hit_by_pitch as f64,
            Category::Wins => s.wins as f64,
            Category::Saves => s.saves as f64,
            Category::Strikeouts => s.strikeouts_pitched as f64,
            Category::EarnedRunAverage => earned_run_average(s),
            Category::Whip => whip(s),
            Category::StrikeoutWalkRatio => strikeout_walk_ratio(s),
            Category::InningsPitched => s.outs_pitched as f64,
            Category::BattersFaced => s.batters_faced as f64,
            Category::HitBatsmen => s.hit_batsmen as f64,
            Category::WildPitches => s.wild_pitches as f64,
        }
    }

    /// Human-readable value for rendered leaderboards.
    pub fn display(&self, s: &PlayerSeasonStats) -> String {
        match self.kind() {
            StatKind::Count => match self {
                Category::InningsPitched => outs_to_innings(s.outs_pitched),
                _ => format!("{}", self.value(s) as u64),
            },
            StatKind::Rate => match self {
                Category::EarnedRunAverage
                | Category::Whip
                | Category::StrikeoutWalkRatio => format!("{:.2}", self.value(s)),
                _ => format!("{:.3}", self.value(s)),
            },
            StatKind::Special => format!("{} ({})", s.batters_faced, s.pitches_thrown),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

fn batting_average(s: &PlayerSeasonStats) -> f64 {
    if s.at_bats == 0 {
        return 0.0;
    }
    s.hits as f64 / s.at_bats as f64
}

fn on_base_percentage(s: &PlayerSeasonStats) -> f64 {
    let numerator = (s.hits + s.walks + s.hit_by_pitch) as f64;
    // Denominator floors at 1 so a player with no plate time scores 0
    // instead of dividing by zero.
    let denominator = (s.at_bats + s.walks + s.hit_by_pitch).max(1) as f64;
    numerator / denominator
}

fn total_bases(s: &PlayerSeasonStats) -> u32 {
    s.hits + s.doubles + 2 * s.triples + 3 * s.home_runs
}

fn slugging(s: &PlayerSeasonStats) -> f64 {
    if s.at_bats == 0 {
        return 0.0;
    }
    total_bases(s) as f64 / s.at_bats as f64
}

fn whip(s: &PlayerSeasonStats) -> f64 {
    if s.outs_pitched == 0 {
        return 0.0;
    }
    (s.hits_allowed + s.walks_allowed) as f64 / (s.outs_pitched as f64 / 3.0)
}

fn earned_run_average(s: &PlayerSeasonStats) -> f64 {
    if s.outs_pitched == 0 {
        return 0.0;
    }
    (s.earned_runs as f64 * 9.0) / (s.outs_pitched as f64 / 3.0)
}

/// K/BB with the historical fallback: when a pitcher has issued no walks
/// the raw strikeout count stands in for the ratio. Not a true ratio in
/// that case, but it keeps unwalked seasons rankable.
fn strikeout_walk_ratio(s: &PlayerSeasonStats) -> f64 {
    if s.walks_allowed == 0 {
        return s.strikeouts_pitched as f64;
    }
    s.strikeouts_pitched as f64 / s.walks_allowed as f64
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// A named leaderboard view: exactly four hitting and four pitching
/// categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Classic,
    Modern,
    Fun,
}

impl Mode {
    pub fn hitting(&self) -> [Category; 4] {
        match self {
            Mode::Classic => [
                Category::BattingAverage,
                Category::Hits,
                Category::HomeRuns,
                Category::RunsBattedIn,
            ],
            Mode::Modern => [
                Category::OnBasePercentage,
                Category::Slugging,
                Category::Ops,
                Category::ExtraBaseHits,
            ],
            Mode::Fun => [
                Category::StolenBases,
                Category::Walks,
                Category::HitByPitch,
                Category::TotalBases,
            ],
        }
    }

    pub fn pitching(&self) -> [Category; 4] {
        match self {
            Mode::Classic => [
                Category::Wins,
                Category::Saves,
                Category::Strikeouts,
                Category::EarnedRunAverage,
            ],
            Mode::Modern => [
                Category::Whip,
                Category::StrikeoutWalkRatio,
                Category::InningsPitched,
                Category::BattersFaced,
            ],
            Mode::Fun => [
                Category::HitBatsmen,
                Category::WildPitches,
                Category::BattersFaced,
                Category::InningsPitched,
            ],
        }
    }

    /// All eight categories, hitting first.
    pub fn categories(&self) -> [Category; 8] {
        let h = self.hitting();
        let p = self.pitching();
        [h[0], h[1], h[2], h[3], p[0], p[1], p[2], p[3]]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Modern => "modern",
            Mode::Fun => "fun",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "modern" => Ok(Mode::Modern),
            "fun" => Ok(Mode::Fun),
            other => Err(format!(
                "unknown mode '{other}' (expected classic, modern, or fun)"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hitter() -> PlayerSeasonStats {
        PlayerSeasonStats {
            hits: 30,
            doubles: 6,
            triples: 1,
            home_runs: 8,
            rbi: 25,
            at_bats: 100,
            walks: 12,
            hit_by_pitch: 3,
            stolen_bases: 5,
            ..PlayerSeasonStats::default()
        }
    }

    fn pitcher() -> PlayerSeasonStats {
        PlayerSeasonStats {
            strikeouts_pitched: 40,
            outs_pitched: 90, // 30 IP
            earned_runs: 10,
            hits_allowed: 25,
            walks_allowed: 8,
            wins: 3,
            saves: 1,
            batters_faced: 120,
            pitches_thrown: 450,
            ..PlayerSeasonStats::default()
        }
    }

    #[test]
    fn batting_average_formula() {
        assert!((Category::BattingAverage.value(&hitter()) - 0.300).abs() < 1e-9);
        assert_eq!(
            Category::BattingAverage.value(&PlayerSeasonStats::default()),
            0.0
        );
    }

    #[test]
    fn obp_floors_denominator_at_one() {
        let s = hitter();
        let expected = (30.0 + 12.0 + 3.0) / (100.0 + 12.0 + 3.0);
        assert!((Category::OnBasePercentage.value(&s) - expected).abs() < 1e-9);
        assert_eq!(
            Category::OnBasePercentage.value(&PlayerSeasonStats::default()),
            0.0
        );
    }

    #[test]
    fn slugging_uses_total_bases() {
        // TB = 30 + 6 + 2*1 + 3*8 = 62
        assert!((Category::Slugging.value(&hitter()) - 0.62).abs() < 1e-9);
        assert_eq!(Category::TotalBases.value(&hitter()), 62.0);
    }

    #[test]
    fn ops_is_obp_plus_slg() {
        let s = hitter();
        let expected =
            Category::OnBasePercentage.value(&s) + Category::Slugging.value(&s);
        assert!((Category::Ops.value(&s) - expected).abs() < 1e-9);
    }

    #[test]
    fn extra_base_hits_counts_doubles_triples_homers() {
        assert_eq!(Category::ExtraBaseHits.value(&hitter()), 15.0);
    }

    #[test]
    fn era_per_nine_innings() {
        // (10 * 9) / 30 = 3.00
        assert!((Category::EarnedRunAverage.value(&pitcher()) - 3.0).abs() < 1e-9);
        assert_eq!(
            Category::EarnedRunAverage.value(&PlayerSeasonStats::default()),
            0.0
        );
    }

    #[test]
    fn era_worked_example() {
        let s = PlayerSeasonStats {
            outs_pitched: 18,
            earned_runs: 1,
            ..PlayerSeasonStats::default()
        };
        assert!((Category::EarnedRunAverage.value(&s) - 1.50).abs() < 1e-9);
    }

    #[test]
    fn whip_per_inning() {
        // (25 + 8) / 30 = 1.10
        assert!((Category::Whip.value(&pitcher()) - 1.1).abs() < 1e-9);
        assert_eq!(Category::Whip.value(&PlayerSeasonStats::default()), 0.0);
    }

    #[test]
    fn k_bb_fallback_when_no_walks() {
        let mut s = pitcher();
        assert!((Category::StrikeoutWalkRatio.value(&s) - 5.0).abs() < 1e-9);
        s.walks_allowed = 0;
        assert_eq!(Category::StrikeoutWalkRatio.value(&s), 40.0);
    }

    #[test]
    fn count_categories_pass_through_raw_values() {
        let s = pitcher();
        assert_eq!(Category::Wins.value(&s), 3.0);
        assert_eq!(Category::Saves.value(&s), 1.0);
        assert_eq!(Category::Strikeouts.value(&s), 40.0);
        assert_eq!(Category::InningsPitched.value(&s), 90.0);
    }

    #[test]
    fn displays_follow_category_kind() {
        let s = pitcher();
        assert_eq!(Category::InningsPitched.display(&s), "30.0");
        assert_eq!(Category::BattersFaced.display(&s), "120 (450)");
        assert_eq!(Category::EarnedRunAverage.display(&s), "3.00");
        assert_eq!(Category::BattingAverage.display(&hitter()), "0.300");
        assert_eq!(Category::Hits.display(&hitter()), "30");
    }

    #[test]
    fn every_mode_has_four_hitting_and_four_pitching() {
        for mode in [Mode::Classic, Mode::Modern, Mode::Fun] {
            assert_eq!(mode.hitting().len(), 4);
            assert_eq!(mode.pitching().len(), 4);
            assert_eq!(mode.categories().len(), 8);
        }
    }

    #[test]
    fn qualifiers_attach_to_rate_categories_only() {
        assert_eq!(Category::BattingAverage.min_at_bats(), Some(10));
        assert_eq!(Category::Hits.min_at_bats(), None);
        assert_eq!(Category::EarnedRunAverage.min_innings(), Some(5));
        assert_eq!(Category::InningsPitched.min_innings(), None);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Classic".parse::<Mode>().unwrap(), Mode::Classic);
        assert_eq!("MODERN".parse::<Mode>().unwrap(), Mode::Modern);
        assert_eq!("fun".parse::<Mode>().unwrap(), Mode::Fun);
        assert!("sabermetric".parse::<Mode>().is_err());
    }
}
