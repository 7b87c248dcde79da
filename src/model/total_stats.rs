use serde::{Deserialize, Serialize};

/// Aggregates computed over every record in the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    /// Count of games with at least one recorded play.
    pub total_games_played: usize,
    pub total_play_count: u64,
    /// Seconds, summed across all closed sessions of all games.
    pub total_play_time: u64,
    pub total_favorites: usize,
}
