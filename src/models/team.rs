//! Team and its cumulative league record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Cumulative record of a team. Also used as the delta produced by a single result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamRecord {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn played(&self) -> u32 {
        self.wins.saturating_add(self.draws).saturating_add(self.losses)
    }

    /// Add the delta of one result. `None` if any counter would overflow.
    pub fn checked_add(&self, delta: &TeamRecord) -> Option<TeamRecord> {
        Some(TeamRecord {
            points: self.points.checked_add(delta.points)?,
            wins: self.wins.checked_add(delta.wins)?,
            draws: self.draws.checked_add(delta.draws)?,
            losses: self.losses.checked_add(delta.losses)?,
            goals_for: self.goals_for.checked_add(delta.goals_for)?,
            goals_against: self.goals_against.checked_add(delta.goals_against)?,
        })
    }

    /// Remove a previously added delta. `None` if any counter would go below zero.
    pub fn checked_sub(&self, delta: &TeamRecord) -> Option<TeamRecord> {
        Some(TeamRecord {
            points: self.points.checked_sub(delta.points)?,
            wins: self.wins.checked_sub(delta.wins)?,
            draws: self.draws.checked_sub(delta.draws)?,
            losses: self.losses.checked_sub(delta.losses)?,
            goals_for: self.goals_for.checked_sub(delta.goals_for)?,
            goals_against: self.goals_against.checked_sub(delta.goals_against)?,
        })
    }
}

/// A team in the league. The record starts at zero and is only replaced by result processing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub record: TeamRecord,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            record: TeamRecord::default(),
        }
    }
}
