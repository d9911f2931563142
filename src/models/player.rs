//! Player data structure.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// A registered player. `team_id` stays `None` until teams are formed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
}

impl Player {
    /// Create a new, unassigned player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_id: None,
        }
    }

    pub fn assign_to(&mut self, team_id: TeamId) {
        self.team_id = Some(team_id);
    }

    pub fn unassign(&mut self) {
        self.team_id = None;
    }

    /// Names are compared ASCII case-insensitively.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
