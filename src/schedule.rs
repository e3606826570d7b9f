// Season feed loading: the header-led CSV of game results, plus the
// season summaries computed directly from it (focus-team record, stadium
// visit counts).
//
// Parsing is deliberately forgiving. A bad cell degrades that one field
// (scores become `None`, never zero) and the row survives; only a feed that
// cannot be read at all is fatal, and that is handled upstream.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// GameRecord
// ---------------------------------------------------------------------------

/// One scheduled/played game from the season feed.
///
/// `game_pk` starts out `None` and is set at most once by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameRecord {
    pub date: Option<NaiveDate>,
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub postseason: bool,
    pub round: Option<String>,
    pub stadium: String,
    pub game_pk: Option<u64>,
}

impl GameRecord {
    /// True when both scores parsed, i.e. the row participates in win/loss
    /// computation. Rows failing this still count toward stadium visits and
    /// listings.
    pub fn has_final_score(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// Raw CSV row as the feed publishes it. Every field is an optional string
/// so a short row deserializes instead of erroring.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Home")]
    home: Option<String>,
    #[serde(rename = "Away")]
    away: Option<String>,
    #[serde(rename = "HomeScore")]
    home_score: Option<String>,
    #[serde(rename = "AwayScore")]
    away_score: Option<String>,
    #[serde(rename = "Postseason")]
    postseason: Option<String>,
    #[serde(rename = "Round")]
    round: Option<String>,
    #[serde(rename = "Stadium")]
    stadium: Option<String>,
}

/// Parse the feed's date cell. The spreadsheet publishes ISO dates; a
/// US-style fallback covers hand-edited rows.
fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(cell, "%m/%d/%Y"))
        .ok()
}

fn parse_score(cell: Option<&str>) -> Option<u32> {
    cell.and_then(|c| c.trim().parse::<u32>().ok())
}

/// Parse the raw season feed text into game records, sorted by date
/// descending. The sort is stable: rows sharing a date keep their feed
/// order, and rows whose date failed to parse sink to the end in feed order.
pub fn load_season(text: &str) -> Vec<GameRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut games = Vec::new();
    for (idx, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping unreadable season row {}: {}", idx + 1, e);
                continue;
            }
        };
        let date = raw.date.as_deref().and_then(parse_date);
        if date.is_none() {
            warn!("season row {} has unparseable date {:?}", idx + 1, raw.date);
        }
        games.push(GameRecord {
            date,
            home: raw.home.unwrap_or_default(),
            away: raw.away.unwrap_or_default(),
            home_score: parse_score(raw.home_score.as_deref()),
            away_score: parse_score(raw.away_score.as_deref()),
            postseason: raw.postseason.as_deref() == Some("Yes"),
            round: raw.round.filter(|r| !r.is_empty()),
            stadium: raw.stadium.unwrap_or_default(),
            game_pk: None,
        });
    }

    // Option<NaiveDate> orders None first, so descending puts dated rows
    // first and undated rows last.
    games.sort_by(|a, b| b.date.cmp(&a.date));
    games
}

// ---------------------------------------------------------------------------
// Season summaries
// ---------------------------------------------------------------------------

/// Win/loss record for the configured focus team, split by season phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamRecord {
    pub regular_wins: u32,
    pub regular_losses: u32,
    pub postseason_wins: u32,
    pub postseason_losses: u32,
}

/// Compute the focus team's record. Games the team did not play, and rows
/// without both scores, are ignored.
pub fn team_record(games: &[GameRecord], team: &str) -> TeamRecord {
    let mut record = TeamRecord::default();
    for g in games {
        if !g.has_final_score() {
            continue;
        }
        let (home_score, away_score) = (g.home_score.unwrap_or(0), g.away_score.unwrap_or(0));
        let won = if g.home == team {
            home_score > away_score
        } else if g.away == team {
            away_score > home_score
        } else {
            continue;
        };
        match (g.postseason, won) {
            (false, true) => record.regular_wins += 1,
            (false, false) => record.regular_losses += 1,
            (true, true) => record.postseason_wins += 1,
            (true, false) => record.postseason_losses += 1,
        }
    }
    record
}

/// Count games per stadium, sorted descending by count. Ties keep
/// first-appearance order. Every row counts, including ones with missing
/// scores.
pub fn stadium_visits(games: &[GameRecord]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for g in games {
        match counts.iter_mut().find(|(name, _)| *name == g.stadium) {
            Some((_, n)) => *n += 1,
            None => counts.push((g.stadium.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
