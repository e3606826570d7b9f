// The statistics engine: accumulation, category derivation, ranking, and
// single-game highlights.

pub mod accumulate;
pub mod categories;
pub mod highlights;
pub mod leaderboard;
