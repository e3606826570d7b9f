// Serde models for the two statsapi.mlb.com feeds the pipeline consumes:
// the schedule-by-date lookup and the per-game live feed box score.
//
// Every counting field defaults to zero because the API omits stats a player
// did not record. `inningsPitched` stays a raw string ("6.2" means 6 innings
// and 2 outs, not a decimal fraction); conversion to outs lives in
// `stats::accumulate`.

use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Schedule-by-date feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_pk: u64,
    pub teams: GameTeams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameTeams {
    pub away: GameTeamSide,
    pub home: GameTeamSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameTeamSide {
    pub team: TeamName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamName {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Live feed box score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeed {
    pub live_data: LiveData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveData {
    pub boxscore: BoxScore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxScore {
    pub teams: BoxScoreTeams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxScoreTeams {
    pub home: BoxScoreSide,
    pub away: BoxScoreSide,
}

/// One side of a box score. Players are keyed by an API-internal id
/// ("ID660271"); only the values matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxScoreSide {
    #[serde(default)]
    pub players: HashMap<String, PlayerEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub person: Person,
    #[serde(default)]
    pub stats: PlayerGameStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub full_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerGameStats {
    pub batting: Option<BattingLine>,
    pub pitching: Option<PitchingLine>,
}

/// Single-game batting line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub doubles: u32,
    #[serde(default)]
    pub triples: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub at_bats: u32,
    #[serde(default)]
    pub base_on_balls: u32,
    #[serde(default)]
    pub hit_by_pitch: u32,
    #[serde(default)]
    pub stolen_bases: u32,
}

/// Single-game pitching line. `innings_pitched` is `None` when the player
/// did not pitch (some feeds emit an empty pitching object for bench
/// players).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingLine {
    #[serde(default)]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub strike_outs: u32,
    #[serde(default)]
    pub earned_runs: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub base_on_balls: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub hit_batsmen: u32,
    #[serde(default)]
    pub wild_pitches: u32,
    #[serde(default)]
    pub batters_faced: u32,
    #[serde(default, alias = "pitchesThrown")]
    pub number_of_pitches: u32,
}

impl BoxScore {
    /// Iterate every player entry: home side first, each side in player-key
    /// order. The order is deterministic so downstream first-wins tie rules
    /// do not depend on map iteration.
    pub fn all_players(&self) -> impl Iterator<Item = &PlayerEntry> {
        let mut home: Vec<_> = self.teams.home.players.iter().collect();
        home.sort_by_key(|&(id, _)| id);
        let mut away: Vec<_> = self.teams.away.players.iter().collect();
        away.sort_by_key(|&(id, _)| id);
        home.into_iter().chain(away).map(|(_, entry)| entry)
    }
}
