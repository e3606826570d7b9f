// Cumulative counting statistics, folded from per-game box scores.
//
// Innings pitched are stored as an integer count of outs (3 outs = 1
// inning). The feed's "6.2" notation means 6 innings and 2 outs, not a
// decimal fraction, so keeping outs avoids ever rounding ".1/.2" thirds.
//
// The fold is additive, associative, and commutative in game order: folding
// the same set of box scores in any permutation produces identical totals.
// Nothing else ever writes these records; re-runs recompute from scratch
// rather than mutating a persisted accumulator, so the fold cannot
// double-count.

use std::collections::HashMap;

use crate::mlb::types::{BattingLine, BoxScore, PitchingLine};

// ---------------------------------------------------------------------------
// Innings arithmetic
// ---------------------------------------------------------------------------

/// Parse an "innings.outs" string into total outs: `"6.2"` → 20.
///
/// A missing or unparseable value counts as zero outs.
pub fn innings_to_outs(ip: &str) -> u32 {
    let mut parts = ip.trim().splitn(2, '.');
    let innings = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(0);
    let outs = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(0);
    innings * 3 + outs
}

/// Format outs back into "innings.outs" display form: 20 → `"6.2"`.
///
/// Lossless: `innings_to_outs(&outs_to_innings(n)) == n` for any n.
pub fn outs_to_innings(outs: u32) -> String {
    format!("{}.{}", outs / 3, outs % 3)
}

// ---------------------------------------------------------------------------
// PlayerSeasonStats
// ---------------------------------------------------------------------------

/// One player's season-to-date counting totals across every folded game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSeasonStats {
    // Batting
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub at_bats: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub stolen_bases: u32,
    // Pitching
    pub strikeouts_pitched: u32,
    /// Innings pitched in outs (thirds of an inning).
    pub outs_pitched: u32,
    pub earned_runs: u32,
    pub hits_allowed: u32,
    pub walks_allowed: u32,
    pub wins: u32,
    pub saves: u32,
    pub hit_batsmen: u32,
    pub wild_pitches: u32,
    pub batters_faced: u32,
    pub pitches_thrown: u32,
}

impl PlayerSeasonStats {
    fn add_batting(&mut self, b: &BattingLine) {
        self.hits += b.hits;
        self.doubles += b.doubles;
        self.triples += b.triples;
        self.home_runs += b.home_runs;
        self.rbi += b.rbi;
        self.at_bats += b.at_bats;
        self.walks += b.base_on_balls;
        self.hit_by_pitch += b.hit_by_pitch;
        self.stolen_bases += b.stolen_bases;
    }

    fn add_pitching(&mut self, p: &PitchingLine) {
        self.strikeouts_pitched += p.strike_outs;
        self.outs_pitched += p
            .innings_pitched
            .as_deref()
            .map(innings_to_outs)
            .unwrap_or(0);
        self.earned_runs += p.earned_runs;
        self.hits_allowed += p.hits;
        self.walks_allowed += p.base_on_balls;
        self.wins += p.wins;
        self.saves += p.saves;
        self.hit_batsmen += p.hit_batsmen;
        self.wild_pitches += p.wild_pitches;
        self.batters_faced += p.batters_faced;
        self.pitches_thrown += p.number_of_pitches;
    }
}

// ---------------------------------------------------------------------------
// SeasonTotals
// ---------------------------------------------------------------------------

/// Season totals keyed by player full name.
///
/// Full name is the only identity the feed offers; two distinct players
/// sharing a name merge into one record. Known limitation.
#[derive(Debug, Clone, Default)]
pub struct SeasonTotals {
    players: HashMap<String, PlayerSeasonStats>,
}

impl SeasonTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one game's box score into the totals. Both sides, every player
    /// entry; a player appearing in many games accumulates across all of
    /// them.
    pub fn absorb(&mut self, box_score: &BoxScore) {
        for entry in box_score.all_players() {
            let stats = self
                .players
                .entry(entry.person.full_name.clone())
                .or_default();
            if let Some(batting) = &entry.stats.batting {
                stats.add_batting(batting);
            }
            if let Some(pitching) = &entry.stats.pitching {
                stats.add_pitching(pitching);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerSeasonStats> {
        self.players.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PlayerSeasonStats)> {
        self.players.iter()
    }

    /// Players sorted by name ascending. Ranking starts from this order so
    /// equal leaderboard values tie-break alphabetically instead of by
    /// whatever order the map happens to iterate in.
    pub fn sorted_by_name(&self) -> Vec<(&String, &PlayerSeasonStats)> {
        let mut players: Vec<_> = self.players.iter().collect();
        players.sort_by(|a, b| a.0.cmp(b.0));
        players
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{batting, box_score, pitching};
    use super::*;

    #[test]
    fn innings_parsing_handles_thirds() {
        assert_eq!(innings_to_outs("6.2"), 20);
        assert_eq!(innings_to_outs("0.1"), 1);
        assert_eq!(innings_to_outs("9"), 27);
        assert_eq!(innings_to_outs(""), 0);
        assert_eq!(innings_to_outs("garbage"), 0);
    }

    #[test]
    fn outs_round_trip_is_lossless() {
        for outs in 0..120 {
            assert_eq!(innings_to_outs(&outs_to_innings(outs)), outs);
        }
        assert_eq!(outs_to_innings(20), "6.2");
        assert_eq!(outs_to_innings(0), "0.0");
    }

    #[test]
    fn absorb_accumulates_across_games() {
        let mut totals = SeasonTotals::new();
        totals.absorb(&box_score(vec![(
            "Aaron Judge",
            Some(batting(2, 4, 1, 3, 2)),
            None,
        )]));
        totals.absorb(&box_score(vec![(
            "Aaron Judge",
            Some(batting(1, 5, 0, 0, 1)),
            None,
        )]));

        let judge = totals.get("Aaron Judge").unwrap();
        assert_eq!(judge.hits, 3);
        assert_eq!(judge.at_bats, 9);
        assert_eq!(judge.home_runs, 1);
        assert_eq!(judge.rbi, 3);
    }

    #[test]
    fn two_way_player_accumulates_both_lines() {
        let mut totals = SeasonTotals::new();
        totals.absorb(&box_score(vec![(
            "Shohei Ohtani",
            Some(batting(2, 4, 1, 2, 1)),
            Some(pitching("6.0", 8, 2)),
        )]));

        let ohtani = totals.get("Shohei Ohtani").unwrap();
        assert_eq!(ohtani.hits, 2);
        assert_eq!(ohtani.strikeouts_pitched, 8);
        assert_eq!(ohtani.outs_pitched, 18);
        assert_eq!(ohtani.earned_runs, 2);
    }

    #[test]
    fn accumulation_is_order_independent() {
        let games = vec![
            box_score(vec![
                ("Aaron Judge", Some(batting(2, 4, 1, 3, 2)), None),
                ("Gerrit Cole", None, Some(pitching("7.1", 9, 1))),
            ]),
            box_score(vec![
                ("Aaron Judge", Some(batting(0, 3, 0, 0, 0)), None),
                ("Gerrit Cole", None, Some(pitching("5.2", 6, 3))),
            ]),
            box_score(vec![("Aaron Judge", Some(batting(3, 5, 2, 4, 3)), None)]),
        ];

        let mut forward = SeasonTotals::new();
        for g in &games {
            forward.absorb(g);
        }
        let mut backward = SeasonTotals::new();
        for g in games.iter().rev() {
            backward.absorb(g);
        }

        for (name, stats) in forward.iter() {
            assert_eq!(backward.get(name), Some(stats));
        }
        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward.get("Gerrit Cole").unwrap().outs_pitched, 22 + 17);
    }

    #[test]
    fn missing_innings_counts_as_zero_outs() {
        let mut totals = SeasonTotals::new();
        let mut line = pitching("1.0", 2, 0);
        line.innings_pitched = None;
        totals.absorb(&box_score(vec![("Reliever", None, Some(line))]));
        assert_eq!(totals.get("Reliever").unwrap().outs_pitched, 0);
        assert_eq!(totals.get("Reliever").unwrap().strikeouts_pitched, 2);
    }

    #[test]
    fn sorted_by_name_is_alphabetical() {
        let mut totals = SeasonTotals::new();
        totals.absorb(&box_score(vec![
            ("Zack Wheeler", Some(batting(1, 3, 0, 0, 0)), None),
            ("Aaron Judge", Some(batting(1, 3, 0, 0, 0)), None),
            ("Mookie Betts", Some(batting(1, 3, 0, 0, 0)), None),
        ]));
        let names: Vec<_> = totals.sorted_by_name().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Aaron Judge", "Mookie Betts", "Zack Wheeler"]);
    }
}
