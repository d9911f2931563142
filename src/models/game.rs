//! Match (game) between two teams and its status.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Final score of a completed match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub team_1_goals: u32,
    pub team_2_goals: u32,
    /// `None` for a draw.
    pub winner: Option<TeamId>,
    pub completed_at: DateTime<Utc>,
}

/// Goals and winner exist only on a completed match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Completed(MatchScore),
}

/// A scheduled fixture between two distinct teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: TeamId,
    pub team_2: TeamId,
    /// Starts at 1.
    pub matchday: u32,
    #[serde(flatten)]
    pub status: MatchStatus,
}

impl GameMatch {
    pub fn new(team_1: TeamId, team_2: TeamId, matchday: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_1,
            team_2,
            matchday,
            status: MatchStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, MatchStatus::Completed(_))
    }

    pub fn score(&self) -> Option<&MatchScore> {
        match &self.status {
            MatchStatus::Pending => None,
            MatchStatus::Completed(score) => Some(score),
        }
    }
}
