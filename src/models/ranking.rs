//! Student ranking models.

use serde::{Deserialize, Serialize};

/// Number of entries the backend returns in the leaderboard.
pub const TOP_RANKING_SIZE: u32 = 10;

/// One leaderboard row. Rows arrive already ordered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub prenom: String,
    pub xp: i64,
    pub streak_days: i64,
}

/// Response of `GET /api/student/ranking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub top10: Vec<RankingEntry>,
    pub user_position: u32,
    pub user_xp: i64,
}

impl RankingResponse {
    /// Whether the separate "your position" panel is needed below the leaderboard.
    pub fn shows_own_position(&self) -> bool {
        self.user_position > TOP_RANKING_SIZE
    }
}
