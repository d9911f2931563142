//! Tournament aggregate and TournamentError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::player::{Player, PlayerId};
use crate::models::team::{Team, TeamId, TeamRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Coarse classification of errors, used by the HTTP layer to pick a status code.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    StateConflict,
    NotFound,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fixture generation needs at least 2 teams.
    NotEnoughTeams,
    /// The same team id was passed twice to the scheduler.
    DuplicateTeam,
    /// A result was submitted with the same team on both sides.
    SameTeam,
    /// A goal count below zero.
    NegativeGoals,
    /// A goal count above the per-match maximum.
    GoalsOutOfRange { goals: i64, max: u32 },
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// Team formation with no registered players.
    NoPlayers,
    /// The name list could not be parsed.
    InvalidNameList(String),
    /// The same player is listed more than once in one reassignment.
    DuplicateAssignment(String),
    /// Fixtures exist; they must be cleared before generating again.
    FixturesAlreadyGenerated,
    MatchAlreadyCompleted(MatchId),
    MatchNotCompleted(MatchId),
    /// A team record is lower than a result being removed from it.
    RecordsOutOfSync(TeamId),
    /// A team record counter would exceed its range.
    RecordOverflow(TeamId),
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    PlayerNotFound(PlayerId),
    TeamNameNotFound(String),
    PlayerNameNotFound(String),
    TournamentNotFound(Uuid),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            NotEnoughTeams
            | DuplicateTeam
            | SameTeam
            | NegativeGoals
            | GoalsOutOfRange { .. }
            | EmptyPlayerName
            | DuplicatePlayerName(_)
            | NoPlayers
            | InvalidNameList(_)
            | DuplicateAssignment(_) => ErrorKind::InvalidInput,
            FixturesAlreadyGenerated
            | MatchAlreadyCompleted(_)
            | MatchNotCompleted(_)
            | RecordsOutOfSync(_)
            | RecordOverflow(_) => ErrorKind::StateConflict,
            TeamNotFound(_)
            | MatchNotFound(_)
            | PlayerNotFound(_)
            | TeamNameNotFound(_)
            | PlayerNameNotFound(_)
            | TournamentNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to generate fixtures"),
            TournamentError::DuplicateTeam => write!(f, "Each team may only be scheduled once"),
            TournamentError::SameTeam => write!(f, "A team cannot play against itself"),
            TournamentError::NegativeGoals => write!(f, "Goal counts must not be negative"),
            TournamentError::GoalsOutOfRange { goals, max } => {
                write!(f, "Goal count {} is out of range (at most {})", goals, max)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "A player named '{}' already exists", name)
            }
            TournamentError::NoPlayers => write!(f, "Add players before forming teams"),
            TournamentError::InvalidNameList(reason) => write!(f, "Could not read name list: {}", reason),
            TournamentError::DuplicateAssignment(name) => {
                write!(f, "Player '{}' is listed more than once", name)
            }
            TournamentError::FixturesAlreadyGenerated => {
                write!(f, "Fixtures already exist; clear them before generating again")
            }
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Match already has a result"),
            TournamentError::MatchNotCompleted(_) => write!(f, "Match has no result yet"),
            TournamentError::RecordsOutOfSync(_) => {
                write!(f, "Team record does not contain this result")
            }
            TournamentError::RecordOverflow(_) => write!(f, "Team record is out of range"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::TeamNameNotFound(name) => write!(f, "No team named '{}'", name),
            TournamentError::PlayerNameNotFound(name) => write!(f, "No player named '{}'", name),
            TournamentError::TournamentNotFound(_) => write!(f, "No tournament"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: roster, teams and fixtures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    /// In creation order; this is also the tie order in the standings.
    pub teams: Vec<Team>,
    /// In scheduling order.
    pub matches: Vec<GameMatch>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            players: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Create a tournament with initial players (e.g. in tests).
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new()
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_index(&self, id: TeamId) -> Result<usize, TournamentError> {
        self.teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(TournamentError::TeamNotFound(id))
    }

    pub fn match_index(&self, id: MatchId) -> Result<usize, TournamentError> {
        self.matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    pub fn members_of(&self, team_id: TeamId) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .filter(move |p| p.team_id == Some(team_id))
    }

    fn check_new_name<'a>(&self, name: &'a str, batch: &[&str]) -> Result<&'a str, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let is_duplicate = self.players.iter().any(|p| p.has_name(name))
            || batch.iter().any(|n| n.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName(name.to_string()));
        }
        Ok(name)
    }

    /// Add a player. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, TournamentError> {
        let name = self.check_new_name(name, &[])?;
        let player = Player::new(name);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Add several players at once. Nothing is added if any name is rejected.
    pub fn add_players<S: AsRef<str>>(&mut self, names: &[S]) -> Result<Vec<PlayerId>, TournamentError> {
        let mut accepted: Vec<&str> = Vec::with_capacity(names.len());
        for name in names {
            let name = self.check_new_name(name.as_ref(), &accepted)?;
            accepted.push(name);
        }
        let new_players: Vec<Player> = accepted.into_iter().map(Player::new).collect();
        let ids = new_players.iter().map(|p| p.id).collect();
        self.players.extend(new_players);
        Ok(ids)
    }

    /// Remove a player by id. The player's team (if any) is kept.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Move players between teams by name: team name -> player names.
    /// Every name is resolved before any player is touched; a player may appear only once.
    pub fn assign_players(
        &mut self,
        assignments: &HashMap<String, Vec<String>>,
    ) -> Result<(), TournamentError> {
        let mut resolved: Vec<(usize, TeamId)> = Vec::new();
        let mut listed = HashSet::new();
        for (team_name, player_names) in assignments {
            let team_id = self
                .teams
                .iter()
                .find(|t| t.name == *team_name)
                .map(|t| t.id)
                .ok_or_else(|| TournamentError::TeamNameNotFound(team_name.clone()))?;
            for player_name in player_names {
                let idx = self
                    .players
                    .iter()
                    .position(|p| p.has_name(player_name))
                    .ok_or_else(|| TournamentError::PlayerNameNotFound(player_name.clone()))?;
                if !listed.insert(idx) {
                    return Err(TournamentError::DuplicateAssignment(player_name.clone()));
                }
                resolved.push((idx, team_id));
            }
        }
        for (idx, team_id) in resolved {
            self.players[idx].assign_to(team_id);
        }
        Ok(())
    }

    /// Delete all teams and fixtures and unassign every player.
    pub fn clear_teams(&mut self) {
        self.teams.clear();
        self.matches.clear();
        for p in &mut self.players {
            p.unassign();
        }
    }

    /// Delete all fixtures and zero every team record, so standings match the empty result set.
    pub fn clear_fixtures(&mut self) {
        self.matches.clear();
        for t in &mut self.teams {
            t.record = TeamRecord::default();
        }
    }

    /// Delete players, teams and fixtures.
    pub fn clear_data(&mut self) {
        self.players.clear();
        self.teams.clear();
        self.matches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_player_trims_and_rejects_duplicates() {
        let mut t = Tournament::new();
        t.add_player("  Ada ").unwrap();
        assert_eq!(t.players[0].name, "Ada");
        assert_eq!(
            t.add_player("ada"),
            Err(TournamentError::DuplicatePlayerName("ada".to_string()))
        );
        assert_eq!(t.add_player("   "), Err(TournamentError::EmptyPlayerName));
        assert_eq!(t.players.len(), 1);
    }

    #[test]
    fn add_players_is_all_or_nothing() {
        let mut t = Tournament::new();
        t.add_player("Ada").unwrap();
        let err = t.add_players(&["Bob", "Cy", "bob"]).unwrap_err();
        assert_eq!(err, TournamentError::DuplicatePlayerName("bob".to_string()));
        assert_eq!(t.players.len(), 1);

        let ids = t.add_players(&["Bob", "Cy"]).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(t.players.len(), 3);
    }

    #[test]
    fn remove_unknown_player_is_not_found() {
        let mut t = Tournament::new();
        let id = Uuid::new_v4();
        let err = t.remove_player(id).unwrap_err();
        assert_eq!(err, TournamentError::PlayerNotFound(id));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn assign_players_validates_before_mutating() {
        let mut t = Tournament::new();
        t.add_players(&["Ada", "Bob"]).unwrap();
        let team = Team::new("Team 1");
        let team_id = team.id;
        t.teams.push(team);

        let mut bad = HashMap::new();
        bad.insert("Team 1".to_string(), vec!["Ada".to_string(), "Zed".to_string()]);
        assert_eq!(
            t.assign_players(&bad),
            Err(TournamentError::PlayerNameNotFound("Zed".to_string()))
        );
        assert!(t.players.iter().all(|p| p.team_id.is_none()));

        let mut good = HashMap::new();
        good.insert("Team 1".to_string(), vec!["ada".to_string()]);
        t.assign_players(&good).unwrap();
        assert_eq!(t.members_of(team_id).count(), 1);
    }

    #[test]
    fn assign_players_rejects_player_listed_twice() {
        let mut t = Tournament::new();
        t.add_players(&["Ada", "Bob"]).unwrap();
        t.teams.push(Team::new("Team 1"));
        t.teams.push(Team::new("Team 2"));

        let mut twice = HashMap::new();
        twice.insert("Team 1".to_string(), vec!["Ada".to_string()]);
        twice.insert("Team 2".to_string(), vec!["ada".to_string(), "Bob".to_string()]);
        let err = t.assign_players(&twice).unwrap_err();
        assert!(matches!(err, TournamentError::DuplicateAssignment(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(t.players.iter().all(|p| p.team_id.is_none()));
    }

    #[test]
    fn clear_teams_unassigns_players_but_keeps_them() {
        let mut t = Tournament::new();
        t.add_player("Ada").unwrap();
        let team = Team::new("Team 1");
        t.players[0].assign_to(team.id);
        t.teams.push(team);

        t.clear_teams();
        assert!(t.teams.is_empty());
        assert_eq!(t.players.len(), 1);
        assert_eq!(t.players[0].team_id, None);
    }
}
