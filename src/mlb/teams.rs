// Static short-code to franchise-name table.
//
// The season feed records teams by short code ("Yankees"); the schedule API
// reports official franchise names ("New York Yankees"). Codes missing from
// the table pass through unchanged so an unexpected code still has a chance
// to match.

/// Short feed code paired with the official franchise name.
const TEAM_NAMES: &[(&str, &str)] = &[
    ("Yankees", "New York Yankees"),
    ("Red Sox", "Boston Red Sox"),
    ("Blue Jays", "Toronto Blue Jays"),
    ("Orioles", "Baltimore Orioles"),
    ("Rays", "Tampa Bay Rays"),
    ("Rangers", "Texas Rangers"),
    ("White Sox", "Chicago White Sox"),
    ("Twins", "Minnesota Twins"),
    ("Guardians", "Cleveland Guardians"),
    ("Royals", "Kansas City Royals"),
    ("Athletics", "Oakland Athletics"),
    ("Angels", "Los Angeles Angels"),
    ("Mariners", "Seattle Mariners"),
    ("Diamondbacks", "Arizona Diamondbacks"),
    ("Rockies", "Colorado Rockies"),
    ("Dodgers", "Los Angeles Dodgers"),
    ("Giants", "San Francisco Giants"),
    ("Padres", "San Diego Padres"),
    ("Cubs", "Chicago Cubs"),
    ("Brewers", "Milwaukee Brewers"),
    ("Pirates", "Pittsburgh Pirates"),
    ("Cardinals", "St. Louis Cardinals"),
    ("Mets", "New York Mets"),
    ("Phillies", "Philadelphia Phillies"),
    ("Nationals", "Washington Nationals"),
    ("Marlins", "Miami Marlins"),
    ("Reds", "Cincinnati Reds"),
    ("Tigers", "Detroit Tigers"),
    ("Braves", "Atlanta Braves"),
];

/// Resolve a feed short code to the official franchise name.
///
/// Unmapped codes fall back to the code itself.
pub fn full_name(short: &str) -> &str {
    TEAM_NAMES
        .iter()
        .find(|(code, _)| *code == short)
        .map(|(_, full)| *full)
        .unwrap_or(short)
}
